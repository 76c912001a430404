//! Top toolbar: transcript name, reload, theme toggle and status line.

use crossbeam_channel::Sender;
use eframe::egui::{self, RichText};

use crate::protocol::ViewerEvent;

use super::theme::ChatTheme;

pub fn render_toolbar(
    ui: &mut egui::Ui,
    title: &str,
    status: Option<&str>,
    theme: &ChatTheme,
    event_tx: &Sender<ViewerEvent>,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.spacing_mut().button_padding = egui::vec2(8.0, 4.0);

        ui.label(RichText::new(title).strong().color(theme.text_primary));

        if ui.button("⟳ Reload").on_hover_text("Reload transcript (F5)").clicked() {
            let _ = event_tx.send(ViewerEvent::ReloadRequested);
        }

        let toggle_label = if theme.dark_mode { "☀ Light" } else { "🌙 Dark" };
        if ui.button(toggle_label).clicked() {
            let _ = event_tx.send(ViewerEvent::ToggleTheme);
        }

        if let Some(status) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(status).size(12.0).color(theme.text_muted));
            });
        }
    });
}
