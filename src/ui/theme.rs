//! Colors and text styles for the chat view.
//!
//! The dark palette follows the research assistant's web frontend: cyan
//! accents on translucent slate cards. The light palette keeps the same
//! hierarchy on a white background.
//!
//! # Roles
//!
//! - **User bubble**: translucent cyan fill, right aligned
//! - **Assistant card**: translucent slate fill with a subtle border
//! - **Headings / links**: cyan accent
//! - **Equation blocks**: near-black inset
//! - **Methodology panel**: lighter slate inset with muted text

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

/// Semantic colors for every region of a chat message
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTheme {
    pub name: String,
    pub dark_mode: bool,
    pub background: Color32,
    pub user_bubble_fill: Color32,
    pub user_text: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
    pub text_primary: Color32,
    pub text_strong: Color32,
    pub text_muted: Color32,
    pub heading: Color32,
    pub math: Color32,
    pub code_fill: Color32,
    pub equation_fill: Color32,
    pub separator: Color32,
    pub methodology_fill: Color32,
    pub methodology_title: Color32,
    pub methodology_text: Color32,
    pub link: Color32,
    pub link_hover: Color32,
    pub icon_fill: Color32,
    pub icon_fg: Color32,
    pub retry_hover: Color32,
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            dark_mode: true,
            background: Color32::from_rgb(3, 7, 18),                        // gray-950
            user_bubble_fill: Color32::from_rgba_unmultiplied(6, 182, 212, 0x33),
            user_text: Color32::from_rgb(236, 254, 255),                   // cyan-50
            card_fill: Color32::from_rgba_unmultiplied(31, 41, 55, 0x80),
            card_border: Color32::from_rgb(55, 65, 81),                    // gray-700
            text_primary: Color32::from_rgb(243, 244, 246),                // gray-100
            text_strong: Color32::WHITE,
            text_muted: Color32::from_rgb(156, 163, 175),                  // gray-400
            heading: Color32::from_rgb(34, 211, 238),                      // cyan-400
            math: Color32::from_rgb(165, 243, 252),                        // cyan-200
            code_fill: Color32::from_rgb(17, 24, 39),
            equation_fill: Color32::from_rgb(17, 24, 39),                  // gray-900
            separator: Color32::from_rgb(55, 65, 81),
            methodology_fill: Color32::from_rgba_unmultiplied(55, 65, 81, 0x4c),
            methodology_title: Color32::from_rgb(243, 244, 246),
            methodology_text: Color32::from_rgb(209, 213, 219),            // gray-300
            link: Color32::from_rgb(34, 211, 238),
            link_hover: Color32::from_rgb(103, 232, 249),                  // cyan-300
            icon_fill: Color32::from_rgba_unmultiplied(6, 182, 212, 0x33),
            icon_fg: Color32::from_rgb(34, 211, 238),
            retry_hover: Color32::from_rgba_unmultiplied(6, 182, 212, 0x33),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            dark_mode: false,
            background: Color32::from_rgb(249, 250, 251),
            user_bubble_fill: Color32::from_rgba_unmultiplied(6, 182, 212, 0x26),
            user_text: Color32::from_rgb(22, 78, 99),                      // cyan-900
            card_fill: Color32::WHITE,
            card_border: Color32::from_rgb(229, 231, 235),                 // gray-200
            text_primary: Color32::from_rgb(31, 41, 55),                   // gray-800
            text_strong: Color32::from_rgb(3, 7, 18),
            text_muted: Color32::from_rgb(107, 114, 128),                  // gray-500
            heading: Color32::from_rgb(8, 145, 178),                       // cyan-600
            math: Color32::from_rgb(14, 116, 144),                         // cyan-700
            code_fill: Color32::from_rgb(243, 244, 246),
            equation_fill: Color32::from_rgb(243, 244, 246),
            separator: Color32::from_rgb(229, 231, 235),
            methodology_fill: Color32::from_rgb(243, 244, 246),
            methodology_title: Color32::from_rgb(31, 41, 55),
            methodology_text: Color32::from_rgb(75, 85, 99),               // gray-600
            link: Color32::from_rgb(8, 145, 178),
            link_hover: Color32::from_rgb(14, 116, 144),
            icon_fill: Color32::from_rgba_unmultiplied(6, 182, 212, 0x26),
            icon_fg: Color32::from_rgb(8, 145, 178),
            retry_hover: Color32::from_rgba_unmultiplied(6, 182, 212, 0x26),
        }
    }

    /// Theme by settings name; anything but "light" is dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Text styles used by the chat view.
///
/// - **Body**: 16px, message text
/// - **Small**: 12px, source URLs
/// - **Heading**: 18px, section headings
/// - **source_title**: 14px, source links
/// - **methodology**: 14px, methodology panel
/// - **equation**: 18px, display math
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(12.0, Proportional)),
        (TextStyle::Body, FontId::new(16.0, Proportional)),
        (TextStyle::Button, FontId::new(14.0, Proportional)),
        (TextStyle::Heading, FontId::new(18.0, Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, Monospace)),
        (TextStyle::Name("source_title".into()), FontId::new(14.0, Proportional)),
        (TextStyle::Name("methodology".into()), FontId::new(14.0, Proportional)),
        (TextStyle::Name("equation".into()), FontId::new(18.0, Proportional)),
    ]
    .into()
}

/// Apply spacing, text styles and visuals for `theme` to the context.
pub fn apply_app_style(ctx: &egui::Context, theme: &ChatTheme) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = configure_text_styles();
    style.visuals = if theme.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    style.visuals.panel_fill = theme.background;
    style.visuals.hyperlink_color = theme.link;
    style.visuals.widgets.hovered.weak_bg_fill = theme.retry_hover;
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);
    style.visuals.selection.bg_fill = theme.user_bubble_fill;

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let dark = ChatTheme::dark();
        assert_eq!(dark.name, "Dark");
        assert!(dark.dark_mode);

        let light = ChatTheme::light();
        assert_eq!(light.name, "Light");
        assert!(!light.dark_mode);
    }

    #[test]
    fn test_theme_by_name() {
        assert_eq!(ChatTheme::by_name("light"), ChatTheme::light());
        assert_eq!(ChatTheme::by_name("dark"), ChatTheme::dark());
        assert_eq!(ChatTheme::by_name("solarized"), ChatTheme::dark());
    }

    #[test]
    fn test_text_styles_include_custom_names() {
        let styles = configure_text_styles();
        assert!(styles.contains_key(&TextStyle::Name("equation".into())));
        assert_eq!(styles[&TextStyle::Body].size, 16.0);
    }

    #[test]
    fn test_apply_app_style_sets_visuals() {
        let ctx = egui::Context::default();
        apply_app_style(&ctx, &ChatTheme::light());
        assert!(!ctx.style().visuals.dark_mode);
        apply_app_style(&ctx, &ChatTheme::dark());
        assert!(ctx.style().visuals.dark_mode);
    }
}
