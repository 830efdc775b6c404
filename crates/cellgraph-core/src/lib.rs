//! cellgraph-core - cell store, recomputation driver and document storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Spreadsheet;
pub use error::{Result, SpreadsheetError};

pub use cellgraph_engine::engine::{CellContent, CellName, CellValue, Formula, FormulaError};
