//! research-chat library.
//!
//! Renders research assistant chat messages (rich sections, equations,
//! citations, methodology notes) with egui. The [`view::ChatMessage`]
//! component is the entry point; the viewer app in [`app`] uses it to show
//! a JSON transcript.

pub mod app;
pub mod config;
pub mod logging;
pub mod math;
pub mod model;
pub mod protocol;
pub mod transcript;
pub mod ui;
pub mod view;


pub use math::{HybridMathRenderer, MathRenderer, PlainTextRenderer, RenderedText};
pub use model::{ChatSource, Message, MessageContent, Role, Section};
pub use view::{ChatMessage, MessageView};
