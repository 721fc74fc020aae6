//! Configuration of the write-delay comparison chart.

pub mod config;

pub use config::{PlotConfig, load_plot_config};
