//! PlotChart: the egui_plot implementation of [`ChartRenderer`].

use std::collections::BTreeMap;

use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::config::ChartConfig;
use crate::data::payload::SensorKey;
use crate::data::sensor_panel::{ChartRenderer, SeriesSnapshot};

use super::series_look::SeriesLook;

struct DrawnSeries {
    key: SensorKey,
    /// `[sample index, temperature]`
    points: Vec<[f64; 2]>,
}

/// Line chart of every sensor series against its sample index.
///
/// `render` only rebuilds the point lists; [`PlotChart::show`] draws them
/// each frame. Colours are allocated per sensor in first-seen order and
/// survive [`ChartRenderer::clear`].
pub struct PlotChart {
    x_label: String,
    y_label: String,
    show_points: bool,
    looks: BTreeMap<SensorKey, SeriesLook>,
    series: Vec<DrawnSeries>,
    renders: u64,
}

impl PlotChart {
    pub fn new(cfg: &ChartConfig) -> Self {
        Self {
            x_label: cfg.x_label.clone(),
            y_label: cfg.y_axis_label(),
            show_points: cfg.show_points,
            looks: BTreeMap::new(),
            series: Vec::new(),
            renders: 0,
        }
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Points currently drawn for `key`.
    pub fn points(&self, key: &str) -> Option<&[[f64; 2]]> {
        self.series
            .iter()
            .find(|s| s.key.as_str() == key)
            .map(|s| s.points.as_slice())
    }

    pub fn look(&self, key: &str) -> Option<&SeriesLook> {
        self.looks.get(key)
    }

    /// Number of snapshots received so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let plot = Plot::new("temperature_plot")
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_boxed_zoom(true)
            .x_axis_label(self.x_label.clone())
            .y_axis_label(self.y_label.clone());

        plot.show(ui, |plot_ui| {
            for series in &self.series {
                let look = self.looks.get(&series.key).cloned().unwrap_or_default();
                let name = series.key.to_string();
                plot_ui.line(
                    Line::new(name.clone(), series.points.clone())
                        .color(look.color)
                        .width(look.width),
                );
                if look.show_points && !series.points.is_empty() {
                    plot_ui.points(
                        Points::new(name, series.points.clone())
                            .radius(look.point_size)
                            .shape(look.marker)
                            .color(look.color),
                    );
                }
            }
        });
    }
}

impl ChartRenderer for PlotChart {
    fn render(&mut self, snapshot: &SeriesSnapshot) {
        self.series.clear();
        for (key, values) in snapshot {
            if !self.looks.contains_key(key) {
                let index = self.looks.len();
                self.looks
                    .insert(key.clone(), SeriesLook::new(index, self.show_points));
            }
            let points = values
                .iter()
                .enumerate()
                .map(|(i, v)| [i as f64, *v])
                .collect();
            self.series.push(DrawnSeries {
                key: key.clone(),
                points,
            });
        }
        self.renders += 1;
    }

    fn clear(&mut self) {
        self.series.clear();
    }
}
