//! `scorecard-report`: performance review summary engine.
//!
//! Pure engine crate: receives an in-memory cell grid, locates the header,
//! normalizes columns, and aggregates monthly average scores per employee.
//! No CLI or file-format dependencies.

pub mod config;
pub mod error;
pub mod filter;
pub mod header;
pub mod model;
pub mod summary;
pub mod table;

pub use config::{HeaderOptions, ReportConfig};
pub use error::ReportError;
pub use header::{detect_header, locate_header, HeaderDetection};
pub use model::{Cell, EmployeeRecord, RawTable, SummaryRow, SummaryStats};
pub use summary::build_summary;
pub use table::NormalizedTable;
