//! Benchmark result tables: one row per measured data size.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::units::{parse_micros_as_millis, parse_millis, parse_plain_millis};
use crate::{PlotError, PlotResult};

pub const SIZE_COLUMN: &str = "datasize";
pub const AVG_COLUMN: &str = "write_duration_avg";
pub const STD_DEV_COLUMN: &str = "write_duration_std_dev";
/// Columns of a table that is already in plain milliseconds.
pub const AVG_MS_COLUMN: &str = "write_duration_avg_ms";
pub const STD_DEV_MS_COLUMN: &str = "write_duration_std_dev_ms";

type ParseFn = fn(&str) -> Result<f64, String>;

/// A single measured data size with latencies in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub datasize: String,
    pub write_duration_avg_ms: f64,
    pub write_duration_std_dev_ms: f64,
}

/// A loaded benchmark table for one storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkTable {
    pub source: PathBuf,
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    /// Read a table from any reader. `source` is only used in error messages.
    ///
    /// Accepts the benchmark's unit-suffixed columns (`1.5ms`, `250µs`) and
    /// the plain millisecond columns written by the normalized export.
    ///
    /// # Errors
    /// `Schema` if one of the expected columns is absent, `Parse` if a latency
    /// value is malformed, `Csv` if the input isn't a well-formed table.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> PlotResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| -> PlotResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PlotError::Schema {
                    path: source.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let (avg_name, std_dev_name, parse_avg, parse_std_dev): (&str, &str, ParseFn, ParseFn) =
            if headers.iter().any(|h| h == AVG_MS_COLUMN) {
                (AVG_MS_COLUMN, STD_DEV_MS_COLUMN, parse_plain_millis, parse_plain_millis)
            } else {
                (AVG_COLUMN, STD_DEV_COLUMN, parse_millis, parse_micros_as_millis)
            };
        let size_idx = column(SIZE_COLUMN)?;
        let avg_idx = column(avg_name)?;
        let std_dev_idx = column(std_dev_name)?;

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let field = |idx: usize| record.get(idx).unwrap_or_default();
            let parse_error = |column: &str, value: &str, reason: String| PlotError::Parse {
                path: source.to_path_buf(),
                row,
                column: column.to_string(),
                value: value.to_string(),
                reason,
            };

            let avg = field(avg_idx);
            let std_dev = field(std_dev_idx);
            rows.push(BenchmarkRow {
                datasize: field(size_idx).to_string(),
                write_duration_avg_ms: parse_avg(avg).map_err(|e| parse_error(avg_name, avg, e))?,
                write_duration_std_dev_ms: parse_std_dev(std_dev)
                    .map_err(|e| parse_error(std_dev_name, std_dev, e))?,
            });
        }

        debug!(source = %source.display(), rows = rows.len(), "loaded benchmark table");
        Ok(BenchmarkTable {
            source: source.to_path_buf(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sizes(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.datasize.clone()).collect()
    }

    pub fn averages(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.write_duration_avg_ms).collect()
    }

    pub fn std_devs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.write_duration_std_dev_ms).collect()
    }
}

/// Load a benchmark table from a CSV file on disk.
///
/// # Errors
/// `NotFound` if the file doesn't exist, otherwise as [`BenchmarkTable::from_reader`].
pub fn load_table(path: impl AsRef<Path>) -> PlotResult<BenchmarkTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PlotError::NotFound(path.to_path_buf()),
        _ => PlotError::Io(e),
    })?;
    BenchmarkTable::from_reader(file, path)
}
