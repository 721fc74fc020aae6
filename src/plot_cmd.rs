//! Write-delay comparison: one grouped bar chart across storage configurations.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::chart::{BarChart, SeriesMap, create_base_barchart};
use crate::core::{BenchmarkTable, load_table};
use crate::plot::{PlotConfig, load_plot_config};
use crate::{PlotError, PlotResult, write_json};

/// Command-line overrides applied on top of the (file or default) config.
#[derive(Debug, Clone, Default)]
pub struct PlotOverrides {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub configurations: Vec<String>,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

pub fn resolve_config(overrides: PlotOverrides) -> PlotResult<PlotConfig> {
    let mut cfg = match &overrides.config {
        Some(path) => load_plot_config(path)?,
        None => PlotConfig::default(),
    };
    if let Some(dir) = overrides.data_dir {
        cfg.data_dir = dir;
    }
    if !overrides.configurations.is_empty() {
        cfg.configurations = overrides.configurations;
    }
    if let Some(output) = overrides.output {
        cfg.output = output;
    }
    if overrides.json.is_some() {
        cfg.json = overrides.json;
    }
    Ok(cfg)
}

/// Load every selected table and assemble the chart.
///
/// Tables are paired positionally: category labels come from the first table
/// and every table must have the same number of rows.
pub fn build_write_delay_chart(cfg: &PlotConfig) -> PlotResult<BarChart> {
    let mut tables: Vec<(String, BenchmarkTable)> = Vec::with_capacity(cfg.configurations.len());
    for (name, path) in cfg.table_paths() {
        let table = load_table(&path)?;
        tables.push((name, table));
    }

    let (_, first) = tables
        .first()
        .ok_or_else(|| PlotError::Configuration("no storage configurations selected".into()))?;
    let categories = first.sizes();

    let mut series = SeriesMap::new();
    for (name, table) in &tables {
        if table.sizes() != categories {
            warn!(
                configuration = %name,
                source = %table.source.display(),
                "data sizes differ from the first table; pairing rows by position"
            );
        }
        series.insert_measured(name.as_str(), &table.averages(), &table.std_devs());
    }

    let chart = create_base_barchart(&series, &categories, cfg.legend)?
        .with_x_label(cfg.x_label.as_str())
        .with_title(cfg.title.as_str());
    Ok(chart)
}

/// Build the write-delay chart and export it. Returns the SVG path.
pub fn run(overrides: PlotOverrides) -> PlotResult<PathBuf> {
    let cfg = resolve_config(overrides)?;
    debug!(?cfg, "resolved plot config");

    let chart = build_write_delay_chart(&cfg)?;
    chart.save_svg(&cfg.output)?;
    if let Some(json_path) = &cfg.json {
        write_json(json_path, &chart)?;
    }

    info!(
        output = %cfg.output.display(),
        series = chart.series_labels.len(),
        categories = chart.ticks().len(),
        "wrote write-delay chart"
    );
    Ok(cfg.output)
}

/// Open a written chart in the platform's default viewer.
///
/// Returns as soon as the viewer has been launched.
///
/// # Errors
/// `NotFound` if `path` doesn't exist, `Io` if no viewer could be started.
pub fn show_chart(path: &Path) -> PlotResult<()> {
    if !path.exists() {
        return Err(PlotError::NotFound(path.to_path_buf()));
    }
    open::that(path)?;
    debug!(path = %path.display(), "opened chart viewer");
    Ok(())
}
