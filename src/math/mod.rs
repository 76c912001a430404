//! Math-aware text rendering.
//!
//! Message text mixes prose, inline markdown and TeX math. A [`MathRenderer`]
//! turns such a string into styled spans; the chat view never interprets the
//! text itself, so tests can inject a closure in place of the real renderer.

mod markdown;
pub mod tex;

use once_cell::sync::Lazy;
use regex::Regex;

/// How a math span is typeset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

/// Styling flags for one span of rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub math: Option<MathMode>,
}

/// A styled run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// Output of a [`MathRenderer`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedText {
    pub spans: Vec<TextSpan>,
}

impl RenderedText {
    /// A single unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![TextSpan {
                text,
                style: SpanStyle::default(),
            }],
        }
    }

    /// Concatenated text of all spans, styling dropped
    pub fn to_plain_string(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// Append a span, merging with the previous one when the style matches
    pub(crate) fn push(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(TextSpan {
            text: text.to_string(),
            style,
        });
    }
}

/// Turns raw message text into styled spans
pub trait MathRenderer {
    fn render(&self, source: &str) -> RenderedText;
}

impl<F> MathRenderer for F
where
    F: Fn(&str) -> RenderedText,
{
    fn render(&self, source: &str) -> RenderedText {
        self(source)
    }
}

/// Renders text verbatim, without markdown or math handling
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MathRenderer for PlainTextRenderer {
    fn render(&self, source: &str) -> RenderedText {
        RenderedText::plain(source)
    }
}

/// Default renderer: inline markdown with embedded TeX math.
///
/// Recognized math delimiters:
///
/// - `$$ ... $$` and `\[ ... \]` for display math
/// - `\( ... \)` and `$ ... $` for inline math
///
/// The inline dollar form must not begin or end with whitespace, which keeps
/// amounts like "$5 and $10" as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridMathRenderer;

/// A math fragment cut out of the source before markdown parsing
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MathSegment {
    /// Original text including delimiters
    pub raw: String,
    pub body: String,
    pub mode: MathMode,
}

static MATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\$\$(?P<dd>.+?)\$\$|\\\[(?P<db>.+?)\\\]|\\\((?P<ib>.+?)\\\)|\$(?P<id>[^\s$](?:[^$\n]*?[^\s$\\])?)\$",
    )
    .expect("math delimiter regex pattern is valid")
});

/// Replace math fragments with private-use placeholders.
///
/// Returns the rewritten text and the extracted segments; placeholder `n`
/// is `PLACEHOLDER_OPEN`, the decimal index, `PLACEHOLDER_CLOSE`.
pub(crate) fn extract_math(source: &str) -> (String, Vec<MathSegment>) {
    let mut out = String::with_capacity(source.len());
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in MATH_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let (body, mode) = if let Some(m) = caps.name("dd").or_else(|| caps.name("db")) {
            (m.as_str(), MathMode::Display)
        } else if let Some(m) = caps.name("ib").or_else(|| caps.name("id")) {
            (m.as_str(), MathMode::Inline)
        } else {
            continue;
        };

        out.push_str(&source[last..whole.start()]);
        out.push(markdown::PLACEHOLDER_OPEN);
        out.push_str(&segments.len().to_string());
        out.push(markdown::PLACEHOLDER_CLOSE);
        segments.push(MathSegment {
            raw: whole.as_str().to_string(),
            body: body.trim().to_string(),
            mode,
        });
        last = whole.end();
    }
    out.push_str(&source[last..]);

    (out, segments)
}

impl MathRenderer for HybridMathRenderer {
    fn render(&self, source: &str) -> RenderedText {
        if source.trim().is_empty() {
            return RenderedText::default();
        }
        let (text, segments) = extract_math(source);
        markdown::render_inline(&text, &segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_display_and_inline() {
        let (text, segments) = extract_math(r"Area $A = \pi r^2$ and $$\int_0^1 x\,dx$$ done");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].mode, MathMode::Inline);
        assert_eq!(segments[0].body, r"A = \pi r^2");
        assert_eq!(segments[1].mode, MathMode::Display);
        assert_eq!(segments[1].raw, r"$$\int_0^1 x\,dx$$");
        assert!(text.starts_with("Area "));
        assert!(text.ends_with(" done"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_extract_bracket_delimiters() {
        let (_, segments) = extract_math(r"\(a+b\) then \[c\]");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].body, "a+b");
        assert_eq!(segments[0].mode, MathMode::Inline);
        assert_eq!(segments[1].body, "c");
        assert_eq!(segments[1].mode, MathMode::Display);
    }

    #[test]
    fn test_currency_is_not_math() {
        let (text, segments) = extract_math("It costs $5 and $10 today");
        assert!(segments.is_empty());
        assert_eq!(text, "It costs $5 and $10 today");
    }

    #[test]
    fn test_hybrid_renders_math_span() {
        let rendered = HybridMathRenderer.render(r"Let $\alpha$ be small");
        assert_eq!(rendered.to_plain_string(), "Let α be small");
        let math = rendered
            .spans
            .iter()
            .find(|s| s.style.math.is_some())
            .unwrap();
        assert_eq!(math.text, "α");
        assert_eq!(math.style.math, Some(MathMode::Inline));
    }

    #[test]
    fn test_hybrid_display_equation() {
        let rendered = HybridMathRenderer.render(r"$$E = mc^2$$");
        assert_eq!(rendered.spans.len(), 1);
        assert_eq!(rendered.spans[0].text, "E = mc²");
        assert_eq!(rendered.spans[0].style.math, Some(MathMode::Display));
    }

    #[test]
    fn test_hybrid_empty_input() {
        assert!(HybridMathRenderer.render("").is_empty());
        assert!(HybridMathRenderer.render("   ").is_empty());
    }

    #[test]
    fn test_plain_renderer_is_verbatim() {
        let rendered = PlainTextRenderer.render("**not bold** $x$");
        assert_eq!(rendered.spans.len(), 1);
        assert_eq!(rendered.spans[0].text, "**not bold** $x$");
        assert_eq!(rendered.spans[0].style, SpanStyle::default());
    }

    #[test]
    fn test_closure_renderer() {
        let shout = |s: &str| RenderedText::plain(s.to_uppercase());
        assert_eq!(shout.render("hi").to_plain_string(), "HI");
    }

    #[test]
    fn test_push_merges_equal_styles() {
        let mut text = RenderedText::default();
        text.push("a", SpanStyle::default());
        text.push("b", SpanStyle::default());
        text.push("", SpanStyle { bold: true, ..Default::default() });
        text.push("c", SpanStyle { bold: true, ..Default::default() });
        assert_eq!(text.spans.len(), 2);
        assert_eq!(text.spans[0].text, "ab");
    }
}
