use cellgraph_engine::engine::{Cell, CellName, DependencyGraph};
use std::collections::BTreeMap;

/// A sparse store of named cells with cached values.
///
/// Only non-empty cells are stored. The dependency graph holds one
/// (dependee, dependent) pair for every variable referenced by every
/// formula cell, and the stored values are always consistent with the
/// contents. All mutation goes through [`Spreadsheet::set_cell_contents`]
/// or a load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spreadsheet {
    /// Non-empty cells, keyed by normalized name
    pub(crate) cells: BTreeMap<CellName, Cell>,
    /// Dependee/dependent pairs induced by formula cells
    pub(crate) graph: DependencyGraph,
    /// Whether the contents changed since creation, load or save
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any cell's contents changed since this spreadsheet was
    /// created, loaded or last saved.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Read-only view of the dependency graph.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }
}
