//! Output formats for loaded benchmark tables.

pub mod csv;

pub use self::csv::{CSV_HEADERS, CsvExporter};
