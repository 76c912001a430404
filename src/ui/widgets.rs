//! Painted icons for the assistant card.

use eframe::egui::{self, Color32, Pos2, Sense, Stroke};

use super::theme::ChatTheme;

/// Size of the assistant icon tile
pub const ICON_TILE: egui::Vec2 = egui::vec2(36.0, 32.0);
/// Size of the retry button
pub const RETRY_SIZE: f32 = 30.0;

/// Paint the assistant icon: a rounded tile with a four-point spark.
pub fn assistant_icon(ui: &mut egui::Ui, theme: &ChatTheme, alt: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(ICON_TILE, Sense::hover());
    let painter = ui.painter();

    painter.rect_filled(rect, 8.0, theme.icon_fill);

    let c = rect.center();
    let r = 8.0;
    let w = 2.5;
    let spark = vec![
        Pos2::new(c.x, c.y - r),
        Pos2::new(c.x + w, c.y - w),
        Pos2::new(c.x + r, c.y),
        Pos2::new(c.x + w, c.y + w),
        Pos2::new(c.x, c.y + r),
        Pos2::new(c.x - w, c.y + w),
        Pos2::new(c.x - r, c.y),
        Pos2::new(c.x - w, c.y - w),
    ];
    painter.add(egui::Shape::convex_polygon(spark, theme.icon_fg, Stroke::NONE));

    response.on_hover_text(alt)
}

/// Paint the retry button (a circular arrow); returns the click response.
pub fn retry_button(ui: &mut egui::Ui, theme: &ChatTheme, tooltip: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(RETRY_SIZE, RETRY_SIZE), Sense::click());
    let painter = ui.painter();

    if response.hovered() {
        painter.rect_filled(rect, 6.0, theme.retry_hover);
    }

    let color = if response.hovered() { theme.link_hover } else { theme.text_muted };
    let stroke = Stroke::new(1.5, color);
    let center = rect.center();
    let radius = 6.0;

    // Open circle from 40° to 320°, arrow head at the open end
    let points: Vec<Pos2> = (0..=24)
        .map(|i| {
            let angle = (40.0 + 280.0 * i as f32 / 24.0).to_radians();
            Pos2::new(center.x + radius * angle.cos(), center.y - radius * angle.sin())
        })
        .collect();
    let tip = points[0];
    painter.add(egui::Shape::line(points, stroke));
    painter.line_segment([tip, tip + egui::vec2(0.0, -3.5)], stroke);
    painter.line_segment([tip, tip + egui::vec2(-3.5, 0.5)], stroke);

    response.on_hover_text(tooltip)
}

/// Thin horizontal rule in the theme's separator color
pub fn separator(ui: &mut egui::Ui, color: Color32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 1.0), Sense::hover());
    ui.painter().hline(rect.x_range(), rect.center().y, Stroke::new(1.0, color));
}
