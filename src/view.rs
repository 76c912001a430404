//! The chat message component.
//!
//! [`ChatMessage`] takes a message plus optional sources, methodology text and
//! retry callback, and produces a [`MessageView`] layout tree. Painting the
//! tree with egui lives in `ui::chat_message`; everything here is pure so the
//! layout can be checked without a UI context.

use eframe::egui;
use tracing::debug;

use crate::math::{MathRenderer, RenderedText};
use crate::model::{ChatSource, Message, MessageContent, Role, Section};
use crate::ui::theme::ChatTheme;

/// Shown in place of structured content sent by the user
pub const USER_PLACEHOLDER: &str = "User message";
pub const SOURCES_LABEL: &str = "Sources:";
pub const METHODOLOGY_TITLE: &str = "Analysis Methodology";
pub const RETRY_TOOLTIP: &str = "Retry response";
pub const ASSISTANT_ICON_ALT: &str = "AI icon";

/// Layout tree for one message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageView {
    User(UserBubble),
    Assistant(AssistantCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBubble {
    pub body: UserBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserBody {
    Rendered(RenderedText),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantCard {
    pub content: Vec<Fragment>,
    pub sources: Option<SourcesRegion>,
    pub methodology: Option<MethodologyPanel>,
    pub retry: RetryAction,
}

/// One top-level piece of assistant content
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Plain string content of the whole message
    Body(RenderedText),
    Heading(RenderedText),
    Paragraph(RenderedText),
    List {
        ordered: bool,
        lead: Option<RenderedText>,
        items: Vec<RenderedText>,
    },
    Equation(RenderedText),
    /// Unrecognized section: raw body, no rich formatting
    Plain(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourcesRegion {
    pub label: &'static str,
    pub rows: Vec<SourceRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodologyPanel {
    pub title: &'static str,
    pub body: RenderedText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryAction {
    pub tooltip: &'static str,
}

impl Default for RetryAction {
    fn default() -> Self {
        Self {
            tooltip: RETRY_TOOLTIP,
        }
    }
}

/// A chat message ready to be laid out or painted.
///
/// ```ignore
/// ChatMessage::new(&message)
///     .sources(&sources)
///     .analysis_methodology("Compared quarterly filings")
///     .on_retry(|| {
///         let _ = tx.send(ViewerEvent::RetryRequested { index });
///     })
///     .show(ui, &HybridMathRenderer, &theme);
/// ```
pub struct ChatMessage<'a> {
    message: &'a Message,
    sources: Option<&'a [ChatSource]>,
    analysis_methodology: Option<&'a str>,
    on_retry: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> ChatMessage<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            message,
            sources: None,
            analysis_methodology: None,
            on_retry: None,
        }
    }

    pub fn sources(mut self, sources: &'a [ChatSource]) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn analysis_methodology(mut self, text: &'a str) -> Self {
        self.analysis_methodology = Some(text);
        self
    }

    pub fn on_retry(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_retry = Some(Box::new(callback));
        self
    }

    pub fn message(&self) -> &Message {
        self.message
    }

    /// Activate the retry action. No-op without a callback.
    pub fn retry(&mut self) {
        if let Some(callback) = self.on_retry.as_mut() {
            callback();
        }
    }

    /// Build the layout tree
    pub fn layout(&self, renderer: &dyn MathRenderer) -> MessageView {
        match self.message.role {
            Role::User => MessageView::User(self.layout_user(renderer)),
            Role::Assistant => MessageView::Assistant(self.layout_assistant(renderer)),
        }
    }

    fn layout_user(&self, renderer: &dyn MathRenderer) -> UserBubble {
        let body = match &self.message.content {
            MessageContent::Text(text) => UserBody::Rendered(renderer.render(text)),
            MessageContent::Structured(_) => UserBody::Placeholder(USER_PLACEHOLDER),
        };
        UserBubble { body }
    }

    fn layout_assistant(&self, renderer: &dyn MathRenderer) -> AssistantCard {
        let content = match &self.message.content {
            MessageContent::Text(text) => vec![Fragment::Body(renderer.render(text))],
            MessageContent::Structured(structured) => structured
                .sections
                .iter()
                .map(|section| layout_section(section, renderer))
                .collect(),
        };

        let sources = self
            .sources
            .filter(|sources| !sources.is_empty())
            .map(|sources| SourcesRegion {
                label: SOURCES_LABEL,
                rows: sources
                    .iter()
                    .map(|s| SourceRow {
                        title: s.title.clone(),
                        url: s.url.clone(),
                    })
                    .collect(),
            });

        let methodology = self
            .analysis_methodology
            .filter(|text| !text.is_empty())
            .map(|text| MethodologyPanel {
                title: METHODOLOGY_TITLE,
                body: renderer.render(text),
            });

        debug!(
            fragments = content.len(),
            sources = sources.as_ref().map_or(0, |s| s.rows.len()),
            methodology = methodology.is_some(),
            "laid out assistant message"
        );

        AssistantCard {
            content,
            sources,
            methodology,
            retry: RetryAction::default(),
        }
    }

    /// Lay out and paint the message; clicking retry calls the callback.
    pub fn show(
        mut self,
        ui: &mut egui::Ui,
        renderer: &dyn MathRenderer,
        theme: &ChatTheme,
    ) -> egui::Response {
        let view = self.layout(renderer);
        let painted = crate::ui::chat_message::paint(ui, &view, theme);
        if painted.retry_clicked {
            self.retry();
        }
        painted.response
    }
}

/// Map one section to its fragment
fn layout_section(section: &Section, renderer: &dyn MathRenderer) -> Fragment {
    let render = |body: &Option<String>| renderer.render(body.as_deref().unwrap_or_default());
    match section {
        Section::Heading(body) => Fragment::Heading(render(body)),
        Section::Paragraph(body) => Fragment::Paragraph(render(body)),
        Section::NumberedList { lead, items } => layout_list(true, lead, items, renderer),
        Section::BulletList { lead, items } => layout_list(false, lead, items, renderer),
        Section::Equation(body) => match body.as_deref().map(str::trim) {
            Some(tex) if !tex.is_empty() => Fragment::Equation(renderer.render(&format!("$${tex}$$"))),
            _ => Fragment::Equation(RenderedText::default()),
        },
        Section::Other { body, .. } => Fragment::Plain(body.clone().unwrap_or_default()),
    }
}

fn layout_list(
    ordered: bool,
    lead: &Option<String>,
    items: &[String],
    renderer: &dyn MathRenderer,
) -> Fragment {
    Fragment::List {
        ordered,
        lead: lead
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| renderer.render(text)),
        items: items.iter().map(|item| renderer.render(item)).collect(),
    }
}
