//! Grouped bar charts of latency means with standard-deviation error bars.
//!
//! This module provides:
//! - `SeriesMap` / `LegendConfig`: chart inputs
//! - `GroupedBarLayout`: bar and tick geometry
//! - `BarChart`: a fully configured figure, rendered to SVG by `render`

pub mod layout;
pub mod render;
pub mod series;

use serde::Serialize;

// Re-export key types
pub use layout::{BAR_WIDTH, Bar, GroupedBarLayout, Tick, format_value, tick_offset};
pub use series::{LegendConfig, LegendPosition, Series, SeriesMap};

use crate::{PlotError, PlotResult};

pub const DEFAULT_Y_LABEL: &str = "Latency (ms)";

/// Canvas size and font sizes, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub title_size: u32,
    pub axis_label_size: u32,
    pub y_tick_size: u32,
    pub x_tick_size: u32,
    pub value_label_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width_px: 1000,
            height_px: 600,
            title_size: 24,
            axis_label_size: 24,
            y_tick_size: 20,
            x_tick_size: 20,
            value_label_size: 14,
        }
    }
}

/// A configured grouped bar chart, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub series_labels: Vec<String>,
    pub layout: GroupedBarLayout,
    pub legend: LegendConfig,
    pub y_label: String,
    pub x_label: Option<String>,
    pub title: Option<String>,
    pub style: ChartStyle,
}

/// Build a grouped bar chart: one group per category, one bar per series.
///
/// # Errors
/// `Configuration` if the number of series isn't 2 or 3, if a series length
/// doesn't match the category count, or if the legend has no columns.
pub fn create_base_barchart(
    series: &SeriesMap,
    categories: &[String],
    legend: LegendConfig,
) -> PlotResult<BarChart> {
    if legend.columns == 0 {
        return Err(PlotError::Configuration("legend needs at least one column".into()));
    }
    let layout = GroupedBarLayout::compute(series, categories)?;
    Ok(BarChart {
        series_labels: series.labels(),
        layout,
        legend,
        y_label: DEFAULT_Y_LABEL.to_string(),
        x_label: None,
        title: None,
        style: ChartStyle::default(),
    })
}

impl BarChart {
    /// Set the category axis description. No description is drawn by default.
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Set the figure title drawn above the plotting area.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn bars(&self) -> &[Bar] {
        &self.layout.bars
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.layout.ticks
    }

    /// Value labels in drawing order (series by series).
    pub fn value_labels(&self) -> Vec<&str> {
        self.layout.bars.iter().map(|b| b.label.as_str()).collect()
    }
}
