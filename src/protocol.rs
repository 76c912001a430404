/// Events sent from widgets to the viewer app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The retry button of the transcript entry at `index` was pressed
    RetryRequested { index: usize },
    /// Re-read the transcript file from disk
    ReloadRequested,
    /// Switch between the dark and light theme
    ToggleTheme,
}
