//! Main update loop

use eframe::egui;

use super::ViewerApp;
use crate::protocol::ViewerEvent;
use crate::ui;

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_events() {
            self.apply_style(ctx);
        }

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.record_window_size(rect.size());
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_settings();
        }

        // F5: reload transcript
        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            let _ = self.event_tx.send(ViewerEvent::ReloadRequested);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(
                ui,
                &self.transcript_title(),
                self.status.as_deref(),
                &self.theme,
                &self.event_tx,
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_transcript(ui);
        });
    }
}

impl ViewerApp {
    pub fn render_transcript(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(16.0);

                if self.transcript.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("Open a transcript: research-chat <file.json>")
                                .color(self.theme.text_muted),
                        );
                    });
                    return;
                }

                for (index, entry) in self.transcript.entries.iter().enumerate() {
                    let tx = self.event_tx.clone();
                    entry
                        .chat_message()
                        .on_retry(move || {
                            let _ = tx.send(ViewerEvent::RetryRequested { index });
                        })
                        .show(ui, &self.renderer, &self.theme);
                }
            });
    }
}
