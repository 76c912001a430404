//! research-chat - transcript viewer for research assistant conversations
//!
//! Loads a JSON transcript and renders every message with the chat view.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing::{error, info};

use research_chat::app::ViewerApp;
use research_chat::config;
use research_chat::logging;

#[derive(Parser, Debug)]
#[command(name = "research-chat", version, about = "View research assistant chat transcripts")]
struct Args {
    /// Transcript JSON file (defaults to the last one opened)
    transcript: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_parser = ["dark", "light"])]
    theme: Option<String>,

    /// Log filter, e.g. "debug" or "research_chat=trace"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log.as_deref()) {
        eprintln!("{e}");
    }

    let settings = config::load_settings_or_default();
    info!(transcript = ?args.transcript, theme = ?args.theme, "starting viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Research Chat",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, args.transcript, args.theme)))),
    );
    if let Err(e) = &result {
        error!("viewer exited with error: {e}");
    }
    result
}
