//! Styled spans to egui layout jobs.

use eframe::egui::{self, text::LayoutJob, Color32, FontFamily, FontId, TextFormat};

use crate::math::{MathMode, RenderedText, SpanStyle};

use super::theme::ChatTheme;

/// Base look of a block of text before span styling is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLook {
    pub size: f32,
    pub color: Color32,
    /// Render every span as strong (headings)
    pub strong: bool,
}

impl TextLook {
    pub fn new(size: f32, color: Color32) -> Self {
        Self {
            size,
            color,
            strong: false,
        }
    }

    pub fn strong(mut self) -> Self {
        self.strong = true;
        self
    }
}

/// Display math is drawn this much larger than the surrounding text
const DISPLAY_MATH_SCALE: f32 = 1.15;

/// Build a wrapping layout job for `text`.
pub fn layout_job(text: &RenderedText, look: TextLook, theme: &ChatTheme, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    let last = text.spans.len().saturating_sub(1);
    for (i, span) in text.spans.iter().enumerate() {
        let format = span_format(span.style, look, theme);
        if span.style.math == Some(MathMode::Display) {
            // Display math sits on its own line
            if !job.text.is_empty() && !job.text.ends_with('\n') {
                job.append("\n", 0.0, format.clone());
            }
            job.append(&span.text, 0.0, format.clone());
            if i < last {
                job.append("\n", 0.0, format);
            }
        } else {
            job.append(&span.text, 0.0, format);
        }
    }
    job
}

/// Plain single-format job for raw fallback text
pub fn plain_job(text: &str, look: TextLook, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;
    job.append(
        text,
        0.0,
        TextFormat {
            font_id: FontId::proportional(look.size),
            color: look.color,
            ..Default::default()
        },
    );
    job
}

fn span_format(style: SpanStyle, look: TextLook, theme: &ChatTheme) -> TextFormat {
    let mut format = TextFormat {
        font_id: FontId::new(look.size, FontFamily::Proportional),
        color: look.color,
        italics: style.italic,
        ..Default::default()
    };

    // The default fonts have no bold face; emphasis is carried by color
    if style.bold || look.strong {
        format.color = if look.strong { look.color } else { theme.text_strong };
    }

    if style.code {
        format.font_id = FontId::new(look.size * 0.9, FontFamily::Monospace);
        format.background = theme.code_fill;
    }

    match style.math {
        Some(MathMode::Inline) => {
            format.color = theme.math;
            format.italics = true;
        }
        Some(MathMode::Display) => {
            format.color = theme.math;
            format.font_id = FontId::new(look.size * DISPLAY_MATH_SCALE, FontFamily::Proportional);
        }
        None => {}
    }

    format
}

/// Add a label for `text` to `ui`
pub fn label(ui: &mut egui::Ui, text: &RenderedText, look: TextLook, theme: &ChatTheme) -> egui::Response {
    let job = layout_job(text, look, theme, ui.available_width());
    ui.add(egui::Label::new(job).wrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TextSpan;

    fn span(text: &str, style: SpanStyle) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn test_plain_spans_concatenate() {
        let theme = ChatTheme::dark();
        let text = RenderedText::plain("hello");
        let job = layout_job(&text, TextLook::new(16.0, theme.text_primary), &theme, 200.0);
        assert_eq!(job.text, "hello");
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.sections[0].format.color, theme.text_primary);
        assert_eq!(job.wrap.max_width, 200.0);
    }

    #[test]
    fn test_display_math_on_own_line() {
        let theme = ChatTheme::dark();
        let display = SpanStyle {
            math: Some(MathMode::Display),
            ..Default::default()
        };
        let text = RenderedText {
            spans: vec![
                span("before", SpanStyle::default()),
                span("x²", display),
                span("after", SpanStyle::default()),
            ],
        };
        let job = layout_job(&text, TextLook::new(16.0, theme.text_primary), &theme, 300.0);
        assert_eq!(job.text, "before\nx²\nafter");
    }

    #[test]
    fn test_lone_display_math_has_no_newlines() {
        let theme = ChatTheme::dark();
        let text = RenderedText {
            spans: vec![span(
                "E = mc²",
                SpanStyle {
                    math: Some(MathMode::Display),
                    ..Default::default()
                },
            )],
        };
        let job = layout_job(&text, TextLook::new(16.0, theme.text_primary), &theme, 300.0);
        assert_eq!(job.text, "E = mc²");
        assert_eq!(job.sections[0].format.color, theme.math);
    }

    #[test]
    fn test_code_and_bold_formats() {
        let theme = ChatTheme::light();
        let text = RenderedText {
            spans: vec![
                span("b", SpanStyle { bold: true, ..Default::default() }),
                span("c", SpanStyle { code: true, ..Default::default() }),
            ],
        };
        let job = layout_job(&text, TextLook::new(16.0, theme.text_primary), &theme, 300.0);
        assert_eq!(job.sections[0].format.color, theme.text_strong);
        assert_eq!(job.sections[1].format.font_id.family, FontFamily::Monospace);
        assert_eq!(job.sections[1].format.background, theme.code_fill);
    }
}
