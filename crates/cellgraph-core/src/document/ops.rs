use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use cellgraph_engine::engine::{Cell, CellContent, CellName, CellValue, recalculation_order};
use log::{debug, trace, warn};
use std::collections::BTreeSet;

/// Validate and normalize a user-supplied cell name.
fn normalize_name(name: &str) -> Result<CellName> {
    CellName::parse(name).ok_or_else(|| SpreadsheetError::InvalidName(name.to_string()))
}

impl Spreadsheet {
    /// Set cell contents from input string.
    ///
    /// Input that parses as a number becomes a number, input starting with
    /// '=' becomes a formula, anything else is text. Empty input clears the
    /// cell. Returns the changed cell followed by every cell that depends on
    /// it (directly or indirectly), in the order they were recomputed.
    ///
    /// On an invalid name or formula nothing changes. If the new contents
    /// would create a circular dependency, the cell and the dependency graph
    /// are restored to their previous state before the error is returned.
    pub fn set_cell_contents(&mut self, name: &str, input: &str) -> Result<Vec<String>> {
        let name = normalize_name(name)?;
        let contents = CellContent::from_input(input)?;
        let kind = contents.kind();

        // Snapshot for rollback
        let previous_cell = self.cells.get(name.as_str()).cloned();
        let previous_dependees: Vec<String> = self
            .graph
            .dependees(name.as_str())
            .map(str::to_string)
            .collect();

        self.graph.replace_dependees(name.as_str(), contents.dependencies());
        if contents.is_empty() {
            self.cells.remove(name.as_str());
        } else {
            self.cells.insert(name.clone(), Cell::new(contents));
        }

        let order = match recalculation_order(&self.graph, name.as_str()) {
            Ok(order) => order,
            Err(e) => {
                warn!("Rejected contents of {}: {}", name, e);
                self.graph.replace_dependees(name.as_str(), previous_dependees);
                match previous_cell {
                    Some(cell) => {
                        self.cells.insert(name, cell);
                    }
                    None => {
                        self.cells.remove(name.as_str());
                    }
                }
                return Err(SpreadsheetError::CircularDependency);
            }
        };

        self.recalculate(&order);
        self.changed = true;
        debug!(
            "Set {} to {} contents, {} cell(s) recomputed",
            name,
            kind,
            order.len()
        );
        Ok(order)
    }

    /// Get the contents of a cell. Empty cells have empty text contents.
    pub fn cell_contents(&self, name: &str) -> Result<CellContent> {
        let name = normalize_name(name)?;
        Ok(self
            .cells
            .get(name.as_str())
            .map(|cell| cell.contents.clone())
            .unwrap_or_else(CellContent::empty))
    }

    /// Get the computed value of a cell. Empty cells have an empty text value.
    pub fn cell_value(&self, name: &str) -> Result<CellValue> {
        let name = normalize_name(name)?;
        Ok(self
            .cells
            .get(name.as_str())
            .map(|cell| cell.value.clone())
            .unwrap_or_else(CellValue::empty))
    }

    /// Names of all cells with non-empty contents.
    pub fn nonempty_cell_names(&self) -> BTreeSet<String> {
        self.cells.keys().map(|name| name.to_string()).collect()
    }

    /// Numeric value of a cell, or None if it is empty, text or an error.
    fn numeric_value(&self, name: &str) -> Option<f64> {
        self.cells.get(name).and_then(|cell| cell.value.as_number())
    }

    /// Recompute the value of every formula cell in `order`, in sequence.
    /// Cells no longer present (cleared) are skipped; their dependents see
    /// them as undefined.
    fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let Some(cell) = self.cells.get(name.as_str()) else {
                continue;
            };
            let CellContent::Formula(formula) = &cell.contents else {
                continue;
            };

            let value = match formula.evaluate(|var| self.numeric_value(var)) {
                Ok(n) => CellValue::Number(n),
                Err(e) => CellValue::Error(e),
            };
            trace!("Recomputed {} = {}", name, value);

            if let Some(cell) = self.cells.get_mut(name.as_str()) {
                cell.value = value;
            }
        }
    }
}
