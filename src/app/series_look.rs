//! SeriesLook: how one sensor's series is drawn.

use eframe::egui;
use egui_plot::MarkerShape;

/// Colour and marker styling of one sensor series.
#[derive(Debug, Clone)]
pub struct SeriesLook {
    pub color: egui::Color32,
    pub width: f32,
    pub show_points: bool,
    pub point_size: f32,
    pub marker: MarkerShape,
}

impl Default for SeriesLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 1.5,
            show_points: true,
            point_size: 3.0,
            marker: MarkerShape::Circle,
        }
    }
}

impl SeriesLook {
    /// Look for the `index`-th sensor ever seen.
    pub fn new(index: usize, show_points: bool) -> Self {
        Self {
            color: Self::alloc_color(index),
            show_points,
            ..Default::default()
        }
    }

    /// Distinct colour for the given series index; wraps after ten.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(140, 86, 75),
            egui::Color32::from_rgb(227, 119, 194),
            egui::Color32::from_rgb(127, 127, 127),
            egui::Color32::from_rgb(188, 189, 34),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }
}
