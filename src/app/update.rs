//! Per-frame update logic for [`TempScopeApp`].
//!
//! Each frame drains the feed channel first, so every widget below renders
//! the state after all queued payloads were applied.

use eframe::egui;

use super::TempScopeApp;

impl eframe::App for TempScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if std::mem::take(&mut self.pending_auto_connect) {
            self.connect();
        }
        self.process_feed_events();

        egui::TopBottomPanel::top("connection_bar").show(ctx, |ui| {
            self.render_connection_bar(ui);
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.renderer().show(ui);
        });
        self.render_error_window(ctx);

        // Poll the feed channel even when the user is idle.
        ctx.request_repaint_after(self.repaint_interval);
    }
}

impl TempScopeApp {
    fn render_connection_bar(&mut self, ui: &mut egui::Ui) {
        let editable = self.connection.can_connect();
        ui.horizontal(|ui| {
            ui.label("Server Address:");
            ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut self.broker.host).desired_width(140.0),
            );
            ui.label("Port:");
            ui.add_enabled(
                editable,
                egui::DragValue::new(&mut self.broker.port).range(1..=65535),
            );
            ui.label("Topic:");
            ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut self.broker.topic).desired_width(140.0),
            );
            ui.separator();

            let connect = egui::Button::new(format!(
                "{} Connect",
                egui_phosphor::regular::PLUGS_CONNECTED
            ));
            if ui.add_enabled(self.connection.can_connect(), connect).clicked() {
                self.connect();
            }
            let disconnect =
                egui::Button::new(format!("{} Disconnect", egui_phosphor::regular::PLUGS));
            if ui
                .add_enabled(self.connection.can_disconnect(), disconnect)
                .clicked()
            {
                self.disconnect();
            }
            if ui
                .button(format!("{} Clear", egui_phosphor::regular::BROOM))
                .on_hover_text("Drop all buffered samples")
                .clicked()
            {
                self.panel.reset();
            }
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        let stats = self.panel.stats();
        ui.horizontal(|ui| {
            ui.label(self.connection.label());
            ui.separator();
            ui.label(format!("Messages: {}", stats.payloads));
            if stats.malformed > 0 {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("Malformed: {}", stats.malformed),
                );
            }
            if stats.rejected > 0 {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("Skipped readings: {}", stats.rejected),
                );
            }
            ui.separator();
            ui.label(format!("Sensors: {}", self.panel.sensor_count()));
            ui.label(format!("Window: {} samples", self.panel.capacity()));
            if let Some(at) = self.last_payload_at {
                ui.separator();
                ui.label(format!("Last update: {}", at.format("%H:%M:%S")));
            }
        });
    }

    fn render_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        let mut open = true;
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if !open || dismissed {
            self.dismiss_error();
        }
    }
}
