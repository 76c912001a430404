//! Paint a [`MessageView`] with egui.

use eframe::egui::{self, Align, CornerRadius, Layout, Margin, RichText, Stroke};

use crate::view::{AssistantCard, Fragment, MessageView, MethodologyPanel, SourcesRegion, UserBody};

use super::rich_text::{self, TextLook};
use super::theme::ChatTheme;
use super::widgets;

const USER_MAX_WIDTH: f32 = 338.0;
const ASSISTANT_MAX_WIDTH: f32 = 768.0;
const BODY_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 18.0;
const SMALL_SIZE: f32 = 14.0;
const URL_SIZE: f32 = 12.0;
const MESSAGE_GAP: f32 = 24.0;
const SECTION_GAP: f32 = 16.0;
const CONTENT_INDENT: f32 = 16.0;

/// Result of painting one message
pub struct Painted {
    pub response: egui::Response,
    pub retry_clicked: bool,
    /// Where the retry button landed, for assistant cards
    pub retry_rect: Option<egui::Rect>,
}

pub fn paint(ui: &mut egui::Ui, view: &MessageView, theme: &ChatTheme) -> Painted {
    let painted = match view {
        MessageView::User(bubble) => Painted {
            response: paint_user(ui, &bubble.body, theme),
            retry_clicked: false,
            retry_rect: None,
        },
        MessageView::Assistant(card) => paint_assistant(ui, card, theme),
    };
    ui.add_space(MESSAGE_GAP);
    painted
}

/// Right-aligned bubble, square top-right corner
fn paint_user(ui: &mut egui::Ui, body: &UserBody, theme: &ChatTheme) -> egui::Response {
    ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
        egui::Frame::new()
            .fill(theme.user_bubble_fill)
            .corner_radius(CornerRadius {
                nw: 16,
                ne: 2,
                sw: 16,
                se: 16,
            })
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.set_max_width(USER_MAX_WIDTH);
                ui.with_layout(Layout::top_down(Align::LEFT), |ui| {
                    let look = TextLook::new(BODY_SIZE, theme.user_text);
                    match body {
                        UserBody::Rendered(text) => rich_text::label(ui, text, look, theme),
                        UserBody::Placeholder(text) => {
                            ui.label(RichText::new(*text).size(BODY_SIZE).color(theme.user_text))
                        }
                    }
                });
            })
            .response
    })
    .inner
}

/// Card with icon column, content, sources, methodology and retry
fn paint_assistant(ui: &mut egui::Ui, card: &AssistantCard, theme: &ChatTheme) -> Painted {
    let mut retry_clicked = false;
    let mut retry_rect = None;

    let response = egui::Frame::new()
        .fill(theme.card_fill)
        .stroke(Stroke::new(1.0, theme.card_border))
        .corner_radius(CornerRadius {
            nw: 2,
            ne: 16,
            sw: 16,
            se: 16,
        })
        .inner_margin(Margin::same(24))
        .show(ui, |ui| {
            ui.set_max_width(ASSISTANT_MAX_WIDTH);
            ui.horizontal_top(|ui| {
                widgets::assistant_icon(ui, theme, crate::view::ASSISTANT_ICON_ALT);
                ui.add_space(CONTENT_INDENT);
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing.y = SECTION_GAP;

                    paint_content(ui, &card.content, theme);

                    if let Some(sources) = &card.sources {
                        paint_sources(ui, sources, theme);
                    }

                    if let Some(panel) = &card.methodology {
                        paint_methodology(ui, panel, theme);
                    }

                    ui.horizontal(|ui| {
                        let retry = widgets::retry_button(ui, theme, card.retry.tooltip);
                        retry_rect = Some(retry.rect);
                        retry_clicked = retry.clicked();
                    });
                });
            });
        })
        .response;

    Painted {
        response,
        retry_clicked,
        retry_rect,
    }
}

fn paint_content(ui: &mut egui::Ui, content: &[Fragment], theme: &ChatTheme) {
    let body = TextLook::new(BODY_SIZE, theme.text_primary);

    for fragment in content {
        match fragment {
            Fragment::Body(text) | Fragment::Paragraph(text) => {
                rich_text::label(ui, text, body, theme);
            }
            Fragment::Heading(text) => {
                ui.add_space(4.0);
                rich_text::label(ui, text, TextLook::new(HEADING_SIZE, theme.heading).strong(), theme);
            }
            Fragment::List { ordered, lead, items } => {
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing.y = 4.0;
                    if let Some(lead) = lead {
                        rich_text::label(ui, lead, TextLook::new(BODY_SIZE, theme.text_strong), theme);
                    }
                    for (i, item) in items.iter().enumerate() {
                        ui.horizontal_top(|ui| {
                            ui.add_space(8.0);
                            let marker = if *ordered {
                                format!("{}.", i + 1)
                            } else {
                                "•".to_string()
                            };
                            ui.label(RichText::new(marker).size(BODY_SIZE).color(theme.text_muted));
                            rich_text::label(ui, item, body, theme);
                        });
                    }
                });
            }
            Fragment::Equation(text) => {
                egui::Frame::new()
                    .fill(theme.equation_fill)
                    .corner_radius(CornerRadius::same(4))
                    .inner_margin(Margin::symmetric(16, 8))
                    .show(ui, |ui| {
                        egui::ScrollArea::horizontal()
                            .id_salt(ui.next_auto_id())
                            .show(ui, |ui| {
                                rich_text::label(ui, text, body, theme);
                            });
                    });
            }
            Fragment::Plain(raw) => {
                let job = rich_text::plain_job(raw, body, ui.available_width());
                ui.add(egui::Label::new(job).wrap());
            }
        }
    }
}

fn paint_sources(ui: &mut egui::Ui, sources: &SourcesRegion, theme: &ChatTheme) {
    widgets::separator(ui, theme.separator);

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 8.0;
        ui.label(RichText::new(sources.label).size(SMALL_SIZE).color(theme.text_muted));

        for row in &sources.rows {
            ui.horizontal(|ui| {
                let title = RichText::new(&row.title)
                    .size(SMALL_SIZE)
                    .strong()
                    .color(theme.link);
                ui.add(egui::Hyperlink::from_label_and_url(title, &row.url).open_in_new_tab(true))
                    .on_hover_text(&row.url);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(&row.url).size(URL_SIZE).color(theme.text_muted));
                });
            });
        }
    });
}

fn paint_methodology(ui: &mut egui::Ui, panel: &MethodologyPanel, theme: &ChatTheme) {
    egui::Frame::new()
        .fill(theme.methodology_fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.spacing_mut().item_spacing.y = 8.0;
            ui.label(
                RichText::new(panel.title)
                    .size(SMALL_SIZE)
                    .color(theme.methodology_title),
            );
            rich_text::label(
                ui,
                &panel.body,
                TextLook::new(SMALL_SIZE, theme.methodology_text),
                theme,
            );
        });
}
