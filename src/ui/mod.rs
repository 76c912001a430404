//! egui rendering for the chat view.
//!
//! - `chat_message`: paints a message layout tree
//! - `rich_text`: styled spans to layout jobs
//! - `widgets`: painted icons and separators
//! - `theme`: color palettes and text styles
//! - `toolbar`: viewer top bar

pub mod chat_message;
pub mod rich_text;
pub mod theme;
pub mod toolbar;
pub mod widgets;

pub use theme::{apply_app_style, configure_text_styles, ChatTheme};
pub use toolbar::render_toolbar;
