//! Storage formats for spreadsheet documents.

pub mod json;

pub use json::{CellEntry, SheetDocument, parse_json_content, write_json_content};
