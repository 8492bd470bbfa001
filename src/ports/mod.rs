//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - wall-clock time for timers and transitions
//! - `SpreadsheetWriter` - renders export tables into a downloadable file

mod clock;
mod spreadsheet_writer;

pub use clock::Clock;
pub use spreadsheet_writer::{ExportError, ExportedWorkbook, SheetFormat, SpreadsheetWriter};
