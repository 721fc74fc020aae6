use serde::{Deserialize, Serialize};

/// One named data source contributing one bar per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    /// `None` entries are drawn as zero-height bars.
    pub averages: Vec<Option<f64>>,
    /// `None` means no error bars for the whole series.
    pub deviations: Option<Vec<Option<f64>>>,
}

/// Ordered mapping from series label to `(averages, deviations)`.
///
/// Insertion order is the drawing order. Re-inserting an existing label
/// replaces its data and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesMap {
    series: Vec<Series>,
}

impl SeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, or replace the data of an existing label in place.
    ///
    /// # Arguments
    /// * `label` - Legend label; also the key for replacement
    /// * `averages` - One value per category; `None` draws a zero-height bar
    /// * `deviations` - Error bar half-heights per category, `None` for no error
    ///   bars at all; a `None` entry skips the error bar of that one bar
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        averages: Vec<Option<f64>>,
        deviations: Option<Vec<Option<f64>>>,
    ) {
        let label = label.into();
        let entry = Series {
            label,
            averages,
            deviations,
        };
        match self.series.iter_mut().find(|s| s.label == entry.label) {
            Some(existing) => *existing = entry,
            None => self.series.push(entry),
        }
    }

    /// Insert fully measured data, as loaded from a benchmark table.
    pub fn insert_measured(&mut self, label: impl Into<String>, averages: &[f64], deviations: &[f64]) {
        self.insert(
            label,
            averages.iter().copied().map(Some).collect(),
            Some(deviations.iter().copied().map(Some).collect()),
        );
    }

    /// Builder form of [`SeriesMap::insert_measured`].
    pub fn with_measured(mut self, label: impl Into<String>, averages: &[f64], deviations: &[f64]) -> Self {
        self.insert_measured(label, averages, deviations);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(|s| s.label.clone()).collect()
    }
}

/// Corner of the plotting area the legend is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub position: LegendPosition,
    pub columns: usize,
    pub font_size: u32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            position: LegendPosition::UpperRight,
            columns: 1,
            font_size: 16,
        }
    }
}

impl LegendConfig {
    pub fn new(position: LegendPosition, columns: usize, font_size: u32) -> Self {
        LegendConfig {
            position,
            columns,
            font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let map = SeriesMap::new()
            .with_measured("ssd", &[1.0], &[0.1])
            .with_measured("hdd", &[2.0], &[0.2])
            .with_measured("balanced", &[3.0], &[0.3]);
        assert_eq!(map.labels(), vec!["ssd", "hdd", "balanced"]);
    }

    #[test]
    fn test_insert_replaces_existing_label() {
        let mut map = SeriesMap::new()
            .with_measured("ssd", &[1.0], &[0.1])
            .with_measured("hdd", &[2.0], &[0.2]);
        map.insert("ssd", vec![None], None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.labels(), vec!["ssd", "hdd"]);
        let ssd = map.iter().next().unwrap();
        assert_eq!(ssd.averages, vec![None]);
        assert!(ssd.deviations.is_none());
    }

    #[test]
    fn test_legend_defaults() {
        let legend = LegendConfig::default();
        assert_eq!(legend.position, LegendPosition::UpperRight);
        assert_eq!(legend.columns, 1);
        assert_eq!(legend.font_size, 16);
    }

    #[test]
    fn test_legend_from_toml() {
        let legend: LegendConfig = toml::from_str("position = \"upper-left\"\ncolumns = 2\n").unwrap();
        assert_eq!(legend, LegendConfig::new(LegendPosition::UpperLeft, 2, 16));
    }
}
