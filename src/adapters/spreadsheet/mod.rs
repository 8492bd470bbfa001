//! Spreadsheet sink adapters.

mod json_writer;
mod xlsx_writer;

use std::sync::Arc;

pub use json_writer::JsonWorkbookWriter;
pub use xlsx_writer::XlsxWorkbookWriter;

use crate::ports::{SheetFormat, SpreadsheetWriter};

/// Builds the writer for a configured format.
pub fn writer_for(format: SheetFormat) -> Arc<dyn SpreadsheetWriter> {
    match format {
        SheetFormat::Xlsx => Arc::new(XlsxWorkbookWriter::new()),
        SheetFormat::Json => Arc::new(JsonWorkbookWriter::new()),
    }
}
