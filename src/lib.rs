//! cellgraph - a reactive cell store.
//!
//! Cells hold text, numbers or arithmetic formulas that reference other
//! cells. Changing a cell recomputes everything that depends on it, in
//! dependency order; changes that would create a circular dependency are
//! rejected and rolled back. The whole store serializes to a canonical JSON
//! document.
//!
//! ```
//! use cellgraph::{CellValue, Spreadsheet};
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_cell_contents("A1", "5").unwrap();
//! sheet.set_cell_contents("B1", "=A1 * 2").unwrap();
//! assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(10.0));
//! ```

pub use cellgraph_core::storage::{CellEntry, SheetDocument};
pub use cellgraph_core::{Result, Spreadsheet, SpreadsheetError};
pub use cellgraph_engine::engine::{
    CellContent, CellName, CellValue, CycleError, DependencyGraph, Formula, FormulaError,
    FormulaFormatError, format_number, recalculation_order,
};
