//! Grouped bar geometry.
//!
//! Category `i` owns the unit slot starting at `x = i`. Within a group, series
//! `k` is centered at `i + width * (0.5 + k)`, so the group spans
//! `[i, i + group_size * width]` and the category tick sits at its middle.

use std::ops::Range;

use serde::Serialize;

use super::series::SeriesMap;
use crate::{PlotError, PlotResult};

pub const BAR_WIDTH: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub series: usize,
    pub category: usize,
    /// Horizontal center of the bar.
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub error: Option<f64>,
    pub label: String,
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Offset of the category tick from the start of its slot.
///
/// Only groups of 2 and 3 bars are supported.
pub fn tick_offset(group_size: usize, width: f64) -> PlotResult<f64> {
    match group_size {
        2 => Ok(width),
        3 => Ok(width * 1.5),
        n => Err(PlotError::Configuration(format!(
            "unsupported group size {n}, expected 2 or 3 series"
        ))),
    }
}

/// Text drawn above each bar.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarLayout {
    pub group_size: usize,
    pub bar_width: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
}

impl GroupedBarLayout {
    /// Place every bar and category tick.
    ///
    /// # Arguments
    /// * `series` - 2 or 3 series, drawn in insertion order within each group
    /// * `categories` - Tick labels; may be empty, which yields empty axes
    ///
    /// # Errors
    /// `Configuration` for an unsupported group size or a series whose length
    /// doesn't match `categories`.
    pub fn compute(series: &SeriesMap, categories: &[String]) -> PlotResult<Self> {
        let group_size = series.len();
        let offset = tick_offset(group_size, BAR_WIDTH)?;

        let mut bars = Vec::with_capacity(group_size * categories.len());
        let mut multiplier = 0.5;
        for (k, s) in series.iter().enumerate() {
            if s.averages.len() != categories.len() {
                return Err(PlotError::Configuration(format!(
                    "series `{}` has {} averages for {} categories",
                    s.label,
                    s.averages.len(),
                    categories.len()
                )));
            }
            if let Some(devs) = &s.deviations {
                if devs.len() != categories.len() {
                    return Err(PlotError::Configuration(format!(
                        "series `{}` has {} deviations for {} categories",
                        s.label,
                        devs.len(),
                        categories.len()
                    )));
                }
            }

            let shift = BAR_WIDTH * multiplier;
            for (i, avg) in s.averages.iter().enumerate() {
                let height = avg.unwrap_or(0.0);
                let error = s.deviations.as_ref().and_then(|d| d[i]);
                bars.push(Bar {
                    series: k,
                    category: i,
                    x: i as f64 + shift,
                    width: BAR_WIDTH,
                    height,
                    error,
                    label: format_value(height),
                });
            }
            multiplier += 1.0;
        }

        let ticks = categories
            .iter()
            .enumerate()
            .map(|(i, label)| Tick {
                position: i as f64 + offset,
                label: label.clone(),
            })
            .collect();

        Ok(GroupedBarLayout {
            group_size,
            bar_width: BAR_WIDTH,
            bars,
            ticks,
        })
    }

    pub fn series_bars(&self, series: usize) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |b| b.series == series)
    }

    /// Horizontal extent with one bar width of padding on each side.
    pub fn x_range(&self) -> Range<f64> {
        let last = self.ticks.len().saturating_sub(1) as f64;
        let group_span = self.group_size as f64 * self.bar_width;
        -self.bar_width..last + group_span + self.bar_width
    }

    /// Top of the value axis, leaving headroom for the value labels.
    pub fn y_max(&self) -> f64 {
        let top = self
            .bars
            .iter()
            .map(|b| b.height + b.error.unwrap_or(0.0).abs())
            .fold(0.0, f64::max);
        if top > 0.0 { top * 1.15 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}", 1 << (i + 3))).collect()
    }

    fn map(n: usize, len: usize) -> SeriesMap {
        let mut map = SeriesMap::new();
        for k in 0..n {
            let values: Vec<f64> = (0..len).map(|i| (k * len + i) as f64).collect();
            map.insert_measured(format!("s{k}"), &values, &values);
        }
        map
    }

    #[test]
    fn test_two_series_ticks() {
        let layout = GroupedBarLayout::compute(&map(2, 4), &categories(4)).unwrap();
        for (i, tick) in layout.ticks.iter().enumerate() {
            assert_eq!(tick.position, i as f64 + BAR_WIDTH);
        }
    }

    #[test]
    fn test_three_series_ticks() {
        let layout = GroupedBarLayout::compute(&map(3, 4), &categories(4)).unwrap();
        for (i, tick) in layout.ticks.iter().enumerate() {
            assert_eq!(tick.position, i as f64 + 1.5 * BAR_WIDTH);
        }
    }

    #[test]
    fn test_tick_is_group_center() {
        for n in [2, 3] {
            let layout = GroupedBarLayout::compute(&map(n, 3), &categories(3)).unwrap();
            for tick in &layout.ticks {
                let group: Vec<&Bar> = layout
                    .bars
                    .iter()
                    .filter(|b| b.category as f64 == tick.position.floor())
                    .collect();
                let left = group.iter().map(|b| b.left()).fold(f64::INFINITY, f64::min);
                let right = group.iter().map(|b| b.right()).fold(f64::NEG_INFINITY, f64::max);
                assert!(((left + right) / 2.0 - tick.position).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_bar_offsets() {
        let layout = GroupedBarLayout::compute(&map(3, 1), &categories(1)).unwrap();
        let xs: Vec<f64> = layout.bars.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0.125, 0.375, 0.625]);
    }

    #[test]
    fn test_unsupported_group_sizes() {
        for n in [0, 1, 4, 5] {
            let err = GroupedBarLayout::compute(&map(n, 2), &categories(2)).unwrap_err();
            assert!(matches!(err, PlotError::Configuration(_)), "n={n}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = GroupedBarLayout::compute(&map(2, 3), &categories(2)).unwrap_err();
        assert!(matches!(err, PlotError::Configuration(_)));
    }

    #[test]
    fn test_missing_averages_render_as_zero() {
        let mut series = SeriesMap::new();
        series.insert("p99-a", vec![Some(1.5), None, Some(2.0)], None);
        series.insert("p99-b", vec![None, None, Some(3.0)], None);
        let layout = GroupedBarLayout::compute(&series, &categories(3)).unwrap();

        assert_eq!(layout.series_bars(0).count(), 3);
        assert_eq!(layout.series_bars(1).count(), 3);
        let heights: Vec<f64> = layout.series_bars(1).map(|b| b.height).collect();
        assert_eq!(heights, vec![0.0, 0.0, 3.0]);
        assert_eq!(layout.bars[1].label, "0.00");
        assert!(layout.bars.iter().all(|b| b.error.is_none()));
    }

    #[test]
    fn test_missing_deviation_has_no_error_bar() {
        let mut series = SeriesMap::new();
        series.insert("ssd", vec![Some(1.0), Some(2.0)], Some(vec![Some(0.1), None]));
        series.insert("hdd", vec![Some(3.0), Some(4.0)], Some(vec![None, Some(0.5)]));
        let layout = GroupedBarLayout::compute(&series, &categories(2)).unwrap();

        let errors: Vec<Option<f64>> = layout.bars.iter().map(|b| b.error).collect();
        assert_eq!(errors, vec![Some(0.1), None, None, Some(0.5)]);
        assert_eq!(layout.bars[1].height, 2.0);
        assert!((layout.y_max() - 4.5 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_no_categories_gives_empty_axes() {
        let layout = GroupedBarLayout::compute(&map(2, 0), &[]).unwrap();
        assert!(layout.bars.is_empty());
        assert!(layout.ticks.is_empty());
        assert_eq!(layout.y_max(), 1.0);
        assert!(layout.x_range().start < layout.x_range().end);

        // group size is still checked first
        let err = GroupedBarLayout::compute(&map(4, 0), &[]).unwrap_err();
        assert!(matches!(err, PlotError::Configuration(_)));
    }

    #[test]
    fn test_y_max_covers_error_bars() {
        let series = SeriesMap::new()
            .with_measured("a", &[1.0], &[1.0])
            .with_measured("b", &[0.5], &[0.0]);
        let layout = GroupedBarLayout::compute(&series, &categories(1)).unwrap();
        assert!((layout.y_max() - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_y_max_all_zero() {
        let mut series = SeriesMap::new();
        series.insert("a", vec![None], None);
        series.insert("b", vec![Some(0.0)], None);
        let layout = GroupedBarLayout::compute(&series, &categories(1)).unwrap();
        assert_eq!(layout.y_max(), 1.0);
    }

    #[test]
    fn test_x_range_covers_all_groups() {
        let layout = GroupedBarLayout::compute(&map(2, 3), &categories(3)).unwrap();
        let range = layout.x_range();
        assert!(layout.bars.iter().all(|b| b.left() > range.start && b.right() < range.end));
    }
}
