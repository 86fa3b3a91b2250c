//! Top-level entry points for running tempscope as a native window.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::TempScopeConfig;
use crate::error::{Error, Result};
use crate::sink::{FeedEvent, FeedSink};

use super::TempScopeApp;

/// Open the window and block until it is closed.
///
/// Broker sessions are started from the connection bar, or right away when
/// `cfg.auto_connect` is set.
pub fn run_tempscope(cfg: TempScopeConfig) -> Result<()> {
    let app = TempScopeApp::new(&cfg);
    run_app(app, &cfg)
}

/// Like [`run_tempscope`], but fed by an existing channel instead of (or in
/// addition to) a broker session.
pub fn run_tempscope_with_feed(
    cfg: TempScopeConfig,
    sink: FeedSink,
    rx: Receiver<FeedEvent>,
) -> Result<()> {
    let app = TempScopeApp::with_feed(&cfg, sink, rx);
    run_app(app, &cfg)
}

fn run_app(mut app: TempScopeApp, cfg: &TempScopeConfig) -> Result<()> {
    start_audio(&mut app, cfg);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(cfg.chart.title.clone())
            .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1])),
        ..Default::default()
    };

    tracing::info!("opening window \"{}\"", cfg.chart.title);
    eframe::run_native(
        &cfg.chart.title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| Error::Ui(e.to_string()))
}

#[cfg(feature = "audio")]
fn start_audio(app: &mut TempScopeApp, cfg: &TempScopeConfig) {
    let Some(path) = &cfg.audio else {
        return;
    };
    // Audio is decoration; the plot works without it.
    match crate::audio::BackgroundLoop::start(path) {
        Ok(audio) => app.audio = Some(audio),
        Err(e) => tracing::warn!("background audio disabled: {e}"),
    }
}

#[cfg(not(feature = "audio"))]
fn start_audio(_app: &mut TempScopeApp, cfg: &TempScopeConfig) {
    if let Some(path) = &cfg.audio {
        tracing::warn!(
            "ignoring audio file {}: built without the `audio` feature",
            path.display()
        );
    }
}
