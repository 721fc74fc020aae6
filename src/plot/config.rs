use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::{LegendConfig, LegendPosition};
use crate::{PlotError, PlotResult};

pub const DEFAULT_CONFIGURATIONS: &[&str] = &["ssd", "hdd"];
pub const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub title: String,
    pub x_label: String,
    pub data_dir: PathBuf,
    /// File name of each table; `{name}` is replaced by the configuration name.
    pub file_template: String,
    pub configurations: Vec<String>,
    pub output: PathBuf,
    pub json: Option<PathBuf>,
    pub legend: LegendConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            title: "File Fsync Write Delays".to_string(),
            x_label: "Data size (bytes)".to_string(),
            data_dir: PathBuf::from("."),
            file_template: "output_{name}.csv".to_string(),
            configurations: DEFAULT_CONFIGURATIONS.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from("write_delays.svg"),
            json: None,
            legend: LegendConfig::new(LegendPosition::UpperLeft, 1, 16),
        }
    }
}

impl PlotConfig {
    /// Path of the benchmark table for one storage configuration.
    ///
    /// # Arguments
    /// * `configuration` - Name substituted for `{name}` in `file_template`
    pub fn table_path(&self, configuration: &str) -> PathBuf {
        self.data_dir
            .join(self.file_template.replace(NAME_PLACEHOLDER, configuration))
    }

    /// `(name, path)` for every selected configuration, in selection order.
    pub fn table_paths(&self) -> Vec<(String, PathBuf)> {
        self.configurations
            .iter()
            .map(|name| (name.clone(), self.table_path(name)))
            .collect()
    }
}

/// Load a TOML plot configuration. Missing keys keep their defaults.
///
/// # Errors
/// `NotFound` if the file doesn't exist, `Message` if it isn't valid TOML for
/// [`PlotConfig`].
pub fn load_plot_config(path: &Path) -> PlotResult<PlotConfig> {
    let s = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PlotError::NotFound(path.to_path_buf()),
        _ => PlotError::Io(e),
    })?;
    toml::from_str(&s).map_err(|e| PlotError::Message(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compares_ssd_and_hdd() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.configurations, vec!["ssd", "hdd"]);
        assert_eq!(cfg.legend.position, LegendPosition::UpperLeft);
        assert_eq!(
            cfg.table_paths(),
            vec![
                ("ssd".to_string(), PathBuf::from("./output_ssd.csv")),
                ("hdd".to_string(), PathBuf::from("./output_hdd.csv")),
            ]
        );
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.toml");
        std::fs::write(
            &path,
            r#"
configurations = ["ssd", "hdd", "balanced"]
data_dir = "results"
output = "plots/write_delays.svg"

[legend]
position = "upper-right"
columns = 3
"#,
        )
        .unwrap();

        let cfg = load_plot_config(&path).unwrap();
        assert_eq!(cfg.configurations.len(), 3);
        assert_eq!(cfg.table_path("balanced"), PathBuf::from("results/output_balanced.csv"));
        assert_eq!(cfg.output, PathBuf::from("plots/write_delays.svg"));
        assert_eq!(cfg.legend, LegendConfig::new(LegendPosition::UpperRight, 3, 16));
        assert_eq!(cfg.title, PlotConfig::default().title);
    }

    #[test]
    fn test_load_missing_config() {
        let err = load_plot_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, PlotError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.toml");
        std::fs::write(&path, "configurations = 3\n").unwrap();
        assert!(matches!(load_plot_config(&path), Err(PlotError::Message(_))));
    }
}
