//! CSV export for normalized benchmark tables.

use std::io::Write;
use std::path::Path;

use crate::core::table::{AVG_MS_COLUMN, BenchmarkTable, SIZE_COLUMN, STD_DEV_MS_COLUMN};
use crate::{PlotResult, ensure_parent_dir};

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[SIZE_COLUMN, AVG_MS_COLUMN, STD_DEV_MS_COLUMN];

/// Writes a loaded table back out with plain millisecond columns.
///
/// Values are written at full precision, so the output loads back through
/// [`load_table`](crate::core::load_table) unchanged.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export a table to a CSV file, creating the parent directory.
    ///
    /// # Arguments
    /// * `table` - The loaded table to write
    /// * `output` - Destination file; overwritten if it exists
    ///
    /// # Errors
    /// `Io` if the file can't be created, `Csv` if a record can't be written.
    pub fn export(&self, table: &BenchmarkTable, output: &Path) -> PlotResult<()> {
        ensure_parent_dir(output)?;
        let file = std::fs::File::create(output)?;
        self.export_to_writer(table, file)
    }

    /// Export a table to stdout.
    pub fn export_to_stdout(&self, table: &BenchmarkTable) -> PlotResult<()> {
        let stdout = std::io::stdout();
        let handle = stdout.lock();
        self.export_to_writer(table, handle)
    }

    /// Export a table to any writer: a header row, then one record per row.
    ///
    /// # Arguments
    /// * `table` - The loaded table to write
    /// * `writer` - Destination; flushed before returning
    ///
    /// # Errors
    /// `Csv` if a record can't be written, `Io` if the final flush fails.
    pub fn export_to_writer<W: Write>(&self, table: &BenchmarkTable, writer: W) -> PlotResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADERS)?;
        for row in &table.rows {
            csv_writer.write_record([
                row.datasize.clone(),
                row.write_duration_avg_ms.to_string(),
                row.write_duration_std_dev_ms.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
