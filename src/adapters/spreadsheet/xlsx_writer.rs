//! rust_xlsxwriter based workbook adapter.
//!
//! Implements the `SpreadsheetWriter` port by writing one worksheet per
//! export table, with a bold header row and numbers stored as numbers.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::domain::export::{Cell, Table, TabularExport};
use crate::ports::{ExportError, SheetFormat, SpreadsheetWriter};

/// Writes `.xlsx` workbooks entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct XlsxWorkbookWriter;

impl XlsxWorkbookWriter {
    pub fn new() -> Self {
        Self
    }

    fn write_table(sheet: &mut Worksheet, table: &Table, header: &Format) -> Result<(), XlsxError> {
        sheet.set_name(table.name())?;

        for (col, title) in table.headers().iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, title, header)?;
        }

        for (idx, row) in table.rows().iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(value) => {
                        sheet.write_string(row_num, col as u16, value)?;
                    }
                    Cell::Integer(value) => {
                        sheet.write_number(row_num, col as u16, *value as f64)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl SpreadsheetWriter for XlsxWorkbookWriter {
    fn format(&self) -> SheetFormat {
        SheetFormat::Xlsx
    }

    fn write(&self, export: &TabularExport) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for table in export.tables() {
            let sheet = workbook.add_worksheet();
            Self::write_table(sheet, table, &header).map_err(encoding_error)?;
        }

        workbook.save_to_buffer().map_err(encoding_error)
    }
}

fn encoding_error(err: XlsxError) -> ExportError {
    ExportError::Encoding(err.to_string())
}
