//! Inline markdown to styled spans.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::{tex, MathSegment, RenderedText, SpanStyle};

/// Delimiters of a math placeholder; both are in the Unicode private use area.
pub(crate) const PLACEHOLDER_OPEN: char = '\u{E000}';
pub(crate) const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// Parse `text` as markdown, expanding math placeholders from `segments`.
pub(crate) fn render_inline(text: &str, segments: &[MathSegment]) -> RenderedText {
    let mut out = RenderedText::default();
    let mut style = SpanStyle::default();
    let mut bold_depth = 0usize;
    let mut italic_depth = 0usize;
    let mut list_depth = 0usize;
    let mut ordered_counters: Vec<Option<u64>> = Vec::new();
    let mut started_block = false;

    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH);

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph | Tag::Heading { .. } | Tag::CodeBlock(_) => {
                    // Paragraphs inside list items stay on the item's line
                    if started_block && list_depth == 0 {
                        out.push("\n", SpanStyle::default());
                    }
                    started_block = true;
                    if matches!(tag, Tag::Heading { .. }) {
                        bold_depth += 1;
                    }
                    if matches!(tag, Tag::CodeBlock(_)) {
                        style.code = true;
                    }
                }
                Tag::List(start) => {
                    list_depth += 1;
                    ordered_counters.push(start);
                }
                Tag::Item => {
                    if started_block {
                        out.push("\n", SpanStyle::default());
                    }
                    started_block = true;
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    let marker = match ordered_counters.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{indent}{n}. ");
                            *n += 1;
                            marker
                        }
                        _ => format!("{indent}• "),
                    };
                    out.push(&marker, SpanStyle::default());
                }
                Tag::Strong => bold_depth += 1,
                Tag::Emphasis => italic_depth += 1,
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => {}
                TagEnd::Heading(_) => bold_depth = bold_depth.saturating_sub(1),
                TagEnd::CodeBlock => style.code = false,
                TagEnd::List(_) => {
                    list_depth = list_depth.saturating_sub(1);
                    ordered_counters.pop();
                }
                TagEnd::Strong => bold_depth = bold_depth.saturating_sub(1),
                TagEnd::Emphasis => italic_depth = italic_depth.saturating_sub(1),
                _ => {}
            },
            Event::Text(t) => {
                style.bold = bold_depth > 0;
                style.italic = italic_depth > 0;
                if style.code {
                    // Code blocks show math source untouched
                    out.push(&restore_raw(&t, segments), style);
                } else {
                    push_with_math(&mut out, &t, style, segments);
                }
            }
            Event::Code(code) => {
                let code_style = SpanStyle {
                    code: true,
                    ..SpanStyle::default()
                };
                out.push(&restore_raw(&code, segments), code_style);
            }
            Event::InlineMath(m) | Event::DisplayMath(m) => {
                out.push(&m, style);
            }
            Event::SoftBreak => out.push(" ", SpanStyle::default()),
            Event::HardBreak => out.push("\n", SpanStyle::default()),
            Event::Html(html) | Event::InlineHtml(html) => {
                out.push(&restore_raw(&html, segments), SpanStyle::default());
            }
            _ => {}
        }
    }

    out
}

/// Split `text` at placeholders, pushing prose spans and converted math spans.
fn push_with_math(out: &mut RenderedText, text: &str, style: SpanStyle, segments: &[MathSegment]) {
    let mut rest = text;
    while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
        out.push(&rest[..open], style);
        let after = &rest[open + PLACEHOLDER_OPEN.len_utf8()..];
        let Some(close) = after.find(PLACEHOLDER_CLOSE) else {
            rest = after;
            continue;
        };
        let segment = after[..close]
            .parse::<usize>()
            .ok()
            .and_then(|idx| segments.get(idx));
        if let Some(segment) = segment {
            let math_style = SpanStyle {
                math: Some(segment.mode),
                ..style
            };
            out.push(&tex::to_unicode(&segment.body), math_style);
        }
        rest = &after[close + PLACEHOLDER_CLOSE.len_utf8()..];
    }
    out.push(rest, style);
}

/// Put the original math source back in place of every placeholder.
fn restore_raw(text: &str, segments: &[MathSegment]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
        out.push_str(&rest[..open]);
        let after = &rest[open + PLACEHOLDER_OPEN.len_utf8()..];
        let Some(close) = after.find(PLACEHOLDER_CLOSE) else {
            rest = after;
            continue;
        };
        if let Some(segment) = after[..close]
            .parse::<usize>()
            .ok()
            .and_then(|idx| segments.get(idx))
        {
            out.push_str(&segment.raw);
        }
        rest = &after[close + PLACEHOLDER_CLOSE.len_utf8()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::super::{extract_math, MathMode};
    use super::*;

    fn render(source: &str) -> RenderedText {
        let (text, segments) = extract_math(source);
        render_inline(&text, &segments)
    }

    #[test]
    fn test_plain_text() {
        let rendered = render("Hello world");
        assert_eq!(rendered.to_plain_string(), "Hello world");
        assert_eq!(rendered.spans.len(), 1);
    }

    #[test]
    fn test_bold_and_italic() {
        let rendered = render("A **bold** and *soft* word");
        assert_eq!(rendered.to_plain_string(), "A bold and soft word");
        let bold = rendered.spans.iter().find(|s| s.text == "bold").unwrap();
        assert!(bold.style.bold);
        let soft = rendered.spans.iter().find(|s| s.text == "soft").unwrap();
        assert!(soft.style.italic);
        assert!(!soft.style.bold);
    }

    #[test]
    fn test_inline_code_keeps_math_source() {
        let rendered = render("Type `$x$` literally");
        let code = rendered.spans.iter().find(|s| s.style.code).unwrap();
        assert_eq!(code.text, "$x$");
    }

    #[test]
    fn test_math_inside_bold() {
        let rendered = render(r"**ratio $\beta$**");
        let math = rendered.spans.iter().find(|s| s.style.math.is_some()).unwrap();
        assert_eq!(math.text, "β");
        assert!(math.style.bold);
        assert_eq!(math.style.math, Some(MathMode::Inline));
    }

    #[test]
    fn test_paragraphs_separated_by_newline() {
        let rendered = render("First\n\nSecond");
        assert_eq!(rendered.to_plain_string(), "First\nSecond");
    }

    #[test]
    fn test_list_items_get_markers() {
        let rendered = render("- one\n- two");
        assert_eq!(rendered.to_plain_string(), "• one\n• two");

        let rendered = render("1. one\n2. two");
        assert_eq!(rendered.to_plain_string(), "1. one\n2. two");
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let rendered = render("line one\nline two");
        assert_eq!(rendered.to_plain_string(), "line one line two");
    }
}
