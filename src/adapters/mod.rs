//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - system and manual clocks
//! - `spreadsheet` - `.xlsx` and JSON export writers
//! - `http` - axum JSON API

pub mod clock;
pub mod http;
pub mod spreadsheet;

pub use clock::{ManualClock, SystemClock};
pub use spreadsheet::{writer_for, JsonWorkbookWriter, XlsxWorkbookWriter};
