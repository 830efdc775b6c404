//! Canonical JSON document format.
//!
//! ```text
//! { "Cells": { "A1": {"StringForm": "5"}, "B3": {"StringForm": "=A1+2"} } }
//! ```
//!
//! Each entry's string form is the exact input that recreates the cell's
//! content. Cells missing from the map are empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SpreadsheetError};
use cellgraph_engine::engine::CellName;

/// A whole spreadsheet as stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(rename = "Cells")]
    pub cells: BTreeMap<CellName, CellEntry>,
}

/// One stored cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    #[serde(rename = "StringForm")]
    pub string_form: String,
}

/// Parse document text. Malformed JSON, a missing field or an invalid cell
/// name is a load failure.
pub fn parse_json_content(content: &str) -> Result<SheetDocument> {
    serde_json::from_str(content).map_err(|e| SpreadsheetError::Load {
        message: e.to_string(),
    })
}

/// Render a document, indented or on a single line.
pub fn write_json_content(doc: &SheetDocument, pretty: bool) -> Result<String> {
    let content = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    Ok(content)
}
