use std::path::PathBuf;

use tracing::info;

use crate::PlotResult;
use crate::core::load_table;
use crate::storage::CsvExporter;

/// Load one benchmark table and write it back out in milliseconds.
///
/// Writes to `output` when given, otherwise to stdout.
pub fn run(input: PathBuf, output: Option<PathBuf>) -> PlotResult<()> {
    let table = load_table(&input)?;
    let exporter = CsvExporter::new();
    match output {
        Some(path) => {
            exporter.export(&table, &path)?;
            info!(input = %input.display(), output = %path.display(), rows = table.len(), "normalized table");
        }
        None => exporter.export_to_stdout(&table)?,
    }
    Ok(())
}
