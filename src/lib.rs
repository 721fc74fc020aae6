pub mod chart;
pub mod core;
pub mod normalize_cmd;
pub mod plot;
pub mod plot_cmd;
pub mod storage;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{}: missing column `{column}`", .path.display())]
    Schema { path: PathBuf, column: String },
    #[error("{}: row {row}, column `{column}`: cannot parse `{value}`: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },
    #[error("unsupported chart configuration: {0}")]
    Configuration(String),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type PlotResult<T> = Result<T, PlotError>;

// Shared helpers
pub fn ensure_parent_dir(path: &Path) -> PlotResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> PlotResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_vec_pretty(value).map_err(|e| PlotError::Message(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
