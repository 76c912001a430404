//! Core ViewerApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{self, Settings};
use crate::math::HybridMathRenderer;
use crate::protocol::ViewerEvent;
use crate::transcript::Transcript;
use crate::ui::theme::{self, ChatTheme};

pub struct ViewerApp {
    pub transcript: Transcript,
    pub transcript_path: Option<PathBuf>,

    // Persisted settings and where to write them (None = don't persist)
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,

    pub theme: ChatTheme,
    pub renderer: HybridMathRenderer,

    // Widgets report user actions through this channel
    pub event_tx: Sender<ViewerEvent>,
    pub event_rx: Receiver<ViewerEvent>,

    /// Retry activations per transcript entry
    pub retry_counts: Vec<usize>,
    pub status: Option<String>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, transcript_path: Option<PathBuf>, theme_override: Option<String>) -> Self {
        let settings_path = match config::settings_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("settings will not be saved: {e}");
                None
            }
        };
        let mut settings = match &settings_path {
            Some(path) => config::load_settings_from(path).unwrap_or_else(|e| {
                warn!("failed to load settings: {e}");
                Settings::default()
            }),
            None => Settings::default(),
        };
        if let Some(theme) = theme_override {
            settings.theme = theme;
        }

        let app = Self::from_parts(settings, settings_path, transcript_path);
        theme::apply_app_style(&cc.egui_ctx, &app.theme);
        app
    }

    /// Build the app without an egui context.
    ///
    /// The transcript comes from `transcript_path`, falling back to the last
    /// one recorded in `settings`; load errors end up in the status line.
    pub fn from_parts(settings: Settings, settings_path: Option<PathBuf>, transcript_path: Option<PathBuf>) -> Self {
        let (event_tx, event_rx) = unbounded::<ViewerEvent>();
        let transcript_path = transcript_path.or_else(|| settings.last_transcript.clone());
        let theme = ChatTheme::by_name(&settings.theme);

        let mut app = Self {
            transcript: Transcript::default(),
            transcript_path,
            settings,
            settings_path,
            theme,
            renderer: HybridMathRenderer,
            event_tx,
            event_rx,
            retry_counts: Vec::new(),
            status: None,
        };
        app.reload_transcript();
        app
    }

    /// Re-read the transcript file; on failure the previous transcript stays.
    pub fn reload_transcript(&mut self) {
        let Some(path) = self.transcript_path.clone() else {
            self.status = Some("No transcript loaded".to_string());
            return;
        };

        match Transcript::load(&path) {
            Ok(transcript) => {
                self.status = Some(format!(
                    "Loaded {} messages from {}",
                    transcript.len(),
                    path.display()
                ));
                self.retry_counts = vec![0; transcript.len()];
                self.transcript = transcript;
                if self.settings.last_transcript.as_ref() != Some(&path) {
                    self.settings.last_transcript = Some(path);
                    self.save_settings();
                }
            }
            Err(e) => {
                warn!("{e}");
                self.status = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn transcript_title(&self) -> String {
        self.transcript_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No transcript".to_string())
    }

    /// Remember the window size for the next launch; true if it changed
    pub fn record_window_size(&mut self, size: egui::Vec2) -> bool {
        let size = [size.x.round(), size.y.round()];
        if size[0] <= 0.0 || size[1] <= 0.0 || size == self.settings.window_size {
            return false;
        }
        self.settings.window_size = size;
        true
    }

    pub(super) fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = config::save_settings_to(&self.settings, path) {
            warn!("failed to save settings: {e}");
        } else {
            info!(path = %path.display(), "saved settings");
        }
    }

    /// Apply the current theme to `ctx`
    pub(super) fn apply_style(&self, ctx: &egui::Context) {
        theme::apply_app_style(ctx, &self.theme);
    }
}
