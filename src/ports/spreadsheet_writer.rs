//! Spreadsheet Writer Port - turns export tables into a downloadable file.
//!
//! The export serializer produces sink-neutral tables; a writer renders
//! them into bytes. Adapters exist for `.xlsx` workbooks and JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::export::TabularExport;

/// Port for rendering a tabular export into a file.
///
/// # Contract
///
/// Implementations must:
/// - Emit one sheet per table, in table order, named after the table
/// - Write the header row first, then data rows in order
/// - Be deterministic for a given export
pub trait SpreadsheetWriter: Send + Sync {
    /// The file format this writer produces.
    fn format(&self) -> SheetFormat;

    /// Render the export into file bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the underlying encoder fails.
    fn write(&self, export: &TabularExport) -> Result<Vec<u8>, ExportError>;
}

/// File formats a writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetFormat {
    /// Office Open XML workbook.
    #[default]
    Xlsx,
    /// JSON document with the same tables.
    Json,
}

impl SheetFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            SheetFormat::Json => "application/json",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for SheetFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(SheetFormat::Xlsx),
            "json" => Ok(SheetFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported workbook with content and download metadata.
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    /// The file bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: SheetFormat,
}

impl ExportedWorkbook {
    pub fn new(content: Vec<u8>, format: SheetFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur while writing a workbook.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),


    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xlsx_content_type_is_spreadsheetml() {
        assert_eq!(
            SheetFormat::Xlsx.content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("XLSX".parse::<SheetFormat>().unwrap(), SheetFormat::Xlsx);
        assert_eq!("json".parse::<SheetFormat>().unwrap(), SheetFormat::Json);
        assert!("pdf".parse::<SheetFormat>().is_err());
    }

    #[test]
    fn exported_workbook_builds_filename() {
        let wb = ExportedWorkbook::new(vec![1, 2], SheetFormat::Xlsx, "writing_result_20240101_0900");
        assert_eq!(wb.filename, "writing_result_20240101_0900.xlsx");
        assert_eq!(wb.content_type, SheetFormat::Xlsx.content_type());
    }
}
