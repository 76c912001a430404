//! Transcript viewer application.
//!
//! - `core`: ViewerApp struct and initialization
//! - `events`: ViewerEvent processing
//! - `update`: eframe update loop and panels

pub mod core;
pub mod events;
pub mod update;

pub use core::ViewerApp;
