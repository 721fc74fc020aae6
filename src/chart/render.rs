//! SVG rendering of a [`BarChart`] with plotters.

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{BarChart, LegendConfig, LegendPosition};
use crate::{PlotError, PlotResult, ensure_parent_dir};

const FONT: &str = "sans-serif";

/// Default categorical palette (blue, orange, green, red).
const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

const LEGEND_INSET: i32 = 10;
const LEGEND_PAD: i32 = 8;
const LEGEND_SWATCH: i32 = 20;
const VALUE_LABEL_PADDING: i32 = 3;
const TICK_LENGTH: i32 = 5;

pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Pixel placement of the legend box and its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendGeometry {
    /// Upper-left and lower-right corners of the frame.
    pub frame: ((i32, i32), (i32, i32)),
    /// Upper-left corner of each entry, in series order.
    pub entries: Vec<(i32, i32)>,
}

/// Lay out legend entries column-major in `legend.columns` columns, anchored
/// at the configured corner of `area` (pixel ranges of the plotting area).
pub fn legend_geometry(
    labels: &[String],
    legend: &LegendConfig,
    area: (Range<i32>, Range<i32>),
) -> LegendGeometry {
    let font = legend.font_size as i32;
    let columns = legend.columns.clamp(1, labels.len().max(1));
    let rows = labels.len().div_ceil(columns).max(1);

    // Rough glyph width; the SVG viewer does the real layout.
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let col_width = LEGEND_SWATCH + LEGEND_PAD + widest * font * 3 / 5 + LEGEND_PAD;
    let row_height = font + LEGEND_PAD;

    let width = columns as i32 * col_width + LEGEND_PAD;
    let height = rows as i32 * row_height + LEGEND_PAD;

    let (xs, ys) = area;
    let left = match legend.position {
        LegendPosition::UpperLeft | LegendPosition::LowerLeft => xs.start + LEGEND_INSET,
        LegendPosition::UpperRight | LegendPosition::LowerRight => xs.end - LEGEND_INSET - width,
    };
    let top = match legend.position {
        LegendPosition::UpperLeft | LegendPosition::UpperRight => ys.start + LEGEND_INSET,
        LegendPosition::LowerLeft | LegendPosition::LowerRight => ys.end - LEGEND_INSET - height,
    };

    let entries = (0..labels.len())
        .map(|i| {
            let col = (i / rows) as i32;
            let row = (i % rows) as i32;
            (
                left + LEGEND_PAD + col * col_width,
                top + LEGEND_PAD + row * row_height,
            )
        })
        .collect();

    LegendGeometry {
        frame: ((left, top), (left + width, top + height)),
        entries,
    }
}

impl BarChart {
    /// Render the chart as an SVG document.
    pub fn to_svg_string(&self) -> PlotResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.style.width_px, self.style.height_px))
                .into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }

    /// Render the chart to an SVG file, creating the parent directory.
    pub fn save_svg(&self, path: &Path) -> PlotResult<()> {
        ensure_parent_dir(path)?;
        let root = SVGBackend::new(path, (self.style.width_px, self.style.height_px))
            .into_drawing_area();
        self.draw(&root)?;
        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult<()> {
        root.fill(&WHITE).map_err(render_err)?;
        let area = match &self.title {
            Some(title) => root
                .titled(title, (FONT, self.style.title_size).into_font())
                .map_err(render_err)?,
            None => root.clone(),
        };

        let x_label_area = if self.x_label.is_some() { 90 } else { 50 };
        let mut chart = ChartBuilder::on(&area)
            .margin(15)
            .x_label_area_size(x_label_area)
            .y_label_area_size(90)
            .build_cartesian_2d(self.layout.x_range(), 0f64..self.layout.y_max())
            .map_err(render_err)?;

        let no_x_labels = |_: &f64| String::new();
        let y_labels = |y: &f64| format!("{y:.1}");
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_label_formatter(&no_x_labels)
            .y_label_formatter(&y_labels)
            .y_label_style((FONT, self.style.y_tick_size).into_font())
            .y_desc(self.y_label.as_str())
            .axis_desc_style((FONT, self.style.axis_label_size).into_font());
        if let Some(x_label) = &self.x_label {
            mesh.x_desc(x_label.as_str());
        }
        mesh.draw().map_err(render_err)?;

        for series in 0..self.series_labels.len() {
            let color = series_color(series);
            chart
                .draw_series(self.layout.series_bars(series).map(|bar| {
                    Rectangle::new([(bar.left(), 0.0), (bar.right(), bar.height)], color.filled())
                }))
                .map_err(render_err)?;
        }

        chart
            .draw_series(self.layout.bars.iter().filter_map(|bar| {
                bar.error.map(|err| {
                    let err = err.abs();
                    ErrorBar::new_vertical(
                        bar.x,
                        bar.height - err,
                        bar.height,
                        bar.height + err,
                        BLACK.stroke_width(1),
                        8,
                    )
                })
            }))
            .map_err(render_err)?;

        let value_style = (FONT, self.style.value_label_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(self.layout.bars.iter().map(|bar| {
                EmptyElement::at((bar.x, bar.height))
                    + Text::new(bar.label.clone(), (0, -VALUE_LABEL_PADDING), value_style.clone())
            }))
            .map_err(render_err)?;

        // Category ticks and the legend are placed in backend pixels, so they
        // are drawn on the untitled root area.
        let tick_style = (FONT, self.style.x_tick_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for tick in &self.layout.ticks {
            let (px, py) = chart.backend_coord(&(tick.position, 0.0));
            root.draw(&PathElement::new(vec![(px, py), (px, py + TICK_LENGTH)], BLACK))
                .map_err(render_err)?;
            root.draw(&Text::new(
                tick.label.as_str(),
                (px, py + TICK_LENGTH + 3),
                tick_style.clone(),
            ))
            .map_err(render_err)?;
        }

        self.draw_legend(root, chart.plotting_area().get_pixel_range())
    }

    fn draw_legend<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        area: (Range<i32>, Range<i32>),
    ) -> PlotResult<()> {
        let geometry = legend_geometry(&self.series_labels, &self.legend, area);
        let (upper_left, lower_right) = geometry.frame;
        root.draw(&Rectangle::new([upper_left, lower_right], WHITE.mix(0.8).filled()))
            .map_err(render_err)?;
        root.draw(&Rectangle::new([upper_left, lower_right], BLACK.mix(0.3)))
            .map_err(render_err)?;

        let font = self.legend.font_size as i32;
        let label_style = (FONT, self.legend.font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (i, (label, (x, y))) in self.series_labels.iter().zip(geometry.entries).enumerate() {
            root.draw(&Rectangle::new(
                [(x, y), (x + LEGEND_SWATCH, y + font)],
                series_color(i).filled(),
            ))
            .map_err(render_err)?;
            root.draw(&Text::new(
                label.as_str(),
                (x + LEGEND_SWATCH + LEGEND_PAD, y + font / 2),
                label_style.clone(),
            ))
            .map_err(render_err)?;
        }
        Ok(())
    }
}
