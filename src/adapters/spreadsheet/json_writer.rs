//! JSON rendering of the export tables, for inspection and scripting.

use crate::domain::export::TabularExport;
use crate::ports::{ExportError, SheetFormat, SpreadsheetWriter};

/// Writes the export as pretty-printed JSON.
///
/// Output shape: `{"tables": [{"name", "headers", "rows"}]}`.
#[derive(Debug, Clone, Default)]
pub struct JsonWorkbookWriter;

impl JsonWorkbookWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetWriter for JsonWorkbookWriter {
    fn format(&self) -> SheetFormat {
        SheetFormat::Json
    }

    fn write(&self, export: &TabularExport) -> Result<Vec<u8>, ExportError> {
        serde_json::to_vec_pretty(export).map_err(|e| ExportError::Encoding(e.to_string()))
    }
}
