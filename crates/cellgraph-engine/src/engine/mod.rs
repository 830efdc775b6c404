//! Cellgraph engine API.
//!
//! - [`Formula`] - validated arithmetic formulas and their evaluation
//! - [`CellName`] - cell name validation (A1 notation, case-insensitive)
//! - [`CellContent`], [`CellValue`], [`Cell`] - cell data structures
//! - [`DependencyGraph`] - dependee/dependent pairs between cells
//! - [`recalculation_order`] - ordering of recomputation and cycle detection
//! - [`format_number`] - canonical number text

mod cell;
mod cell_name;
mod cycle;
mod eval;
mod format;
mod formula;
mod graph;
mod token;

pub use cell::{Cell, CellContent, CellValue};
pub use cell_name::{CellName, is_valid_name};
pub use cycle::{CycleError, recalculation_order};
pub use eval::FormulaError;
pub use format::format_number;
pub use formula::{Formula, FormulaFormatError, Token};
pub use graph::DependencyGraph;
pub use token::{Operator, RawToken, tokenize};
