//! Export domain - tabular projection of a session record.

mod serializer;
mod table;

pub use serializer::{export_file_stem, serialize, REFLECTION_SHEET, SUMMARY_SHEET, SURVEY_SHEET};
pub use table::{Cell, Table, TabularExport};
