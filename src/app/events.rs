//! Event processing from widgets

use tracing::{info, warn};

use super::ViewerApp;
use crate::protocol::ViewerEvent;
use crate::ui::theme::ChatTheme;

impl ViewerApp {
    /// Drain pending events. Returns true when the style must be re-applied.
    pub fn process_events(&mut self) -> bool {
        let mut restyle = false;
        while let Ok(event) = self.event_rx.try_recv() {
            restyle |= self.handle_event(event);
        }
        restyle
    }

    pub fn handle_event(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::RetryRequested { index } => {
                let Some(count) = self.retry_counts.get_mut(index) else {
                    warn!(index, "retry for unknown transcript entry");
                    return false;
                };
                *count += 1;
                info!(index, attempts = *count, "retry requested");
                self.status = Some(format!("Retry requested for message #{}", index + 1));
                false
            }
            ViewerEvent::ReloadRequested => {
                self.reload_transcript();
                false
            }
            ViewerEvent::ToggleTheme => {
                let next = if self.theme.dark_mode { "light" } else { "dark" };
                self.settings.theme = next.to_string();
                self.theme = ChatTheme::by_name(next);
                self.save_settings();
                true
            }
        }
    }
}
