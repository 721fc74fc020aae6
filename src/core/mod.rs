//! Benchmark tables and the unit handling needed to load them.
//!
//! Latency columns arrive as unit-suffixed text (or as plain milliseconds from
//! a normalized export) and are held in milliseconds once loaded.

pub mod table;
pub mod units;

// Re-export key types for convenience
pub use table::{
    AVG_COLUMN, AVG_MS_COLUMN, BenchmarkRow, BenchmarkTable, SIZE_COLUMN, STD_DEV_COLUMN, STD_DEV_MS_COLUMN,
    load_table,
};
