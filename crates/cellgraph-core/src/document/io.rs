use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use crate::storage::{CellEntry, SheetDocument, parse_json_content, write_json_content};
use log::{debug, warn};

impl Spreadsheet {
    /// Build the storage document: every non-empty cell with its string form.
    pub fn to_document(&self) -> SheetDocument {
        let cells = self
            .cells
            .iter()
            .map(|(name, cell)| {
                (
                    name.clone(),
                    CellEntry {
                        string_form: cell.contents.string_form(),
                    },
                )
            })
            .collect();
        SheetDocument { cells }
    }

    /// Serialize to indented JSON.
    pub fn to_json_string(&self) -> Result<String> {
        write_json_content(&self.to_document(), true)
    }

    /// Serialize to single-line JSON.
    pub fn to_json_string_compact(&self) -> Result<String> {
        write_json_content(&self.to_document(), false)
    }

    /// Serialize to indented JSON and mark the spreadsheet as unchanged.
    /// The caller is responsible for persisting the returned text.
    pub fn save(&mut self) -> Result<String> {
        let content = self.to_json_string()?;
        self.changed = false;
        Ok(content)
    }

    /// Rebuild a spreadsheet by replaying every stored cell through
    /// [`Spreadsheet::set_cell_contents`]. Any failure is reported as a
    /// single load error.
    pub fn from_document(doc: &SheetDocument) -> Result<Spreadsheet> {
        let mut sheet = Spreadsheet::new();
        for (name, entry) in &doc.cells {
            sheet
                .set_cell_contents(name.as_str(), &entry.string_form)
                .map_err(|e| SpreadsheetError::Load {
                    message: format!("{}: {}", name, e),
                })?;
        }
        sheet.changed = false;
        Ok(sheet)
    }

    /// Parse and replay a JSON document into a new spreadsheet.
    pub fn from_json_str(content: &str) -> Result<Spreadsheet> {
        let doc = parse_json_content(content)?;
        let sheet = Self::from_document(&doc)?;
        debug!("Loaded spreadsheet with {} cell(s)", sheet.cells.len());
        Ok(sheet)
    }

    /// Replace this spreadsheet's contents with a JSON document.
    ///
    /// The document is loaded into a fresh spreadsheet first, so on failure
    /// this spreadsheet is left untouched.
    pub fn load_from_json_str(&mut self, content: &str) -> Result<()> {
        match Self::from_json_str(content) {
            Ok(sheet) => {
                *self = sheet;
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }
}
