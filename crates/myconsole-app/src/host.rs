//! The host editor as seen from the console.
//!
//! Everything the console needs from the editor it is embedded in goes
//! through [`EditorHost`]. Implementations are called from whichever thread
//! delivered a log event, hence the `Send + Sync` bound.

/// Operations the console asks of its host editor
#[cfg_attr(test, mockall::automock)]
pub trait EditorHost: Send + Sync {
    /// Clear the host's own built-in console
    fn clear_host_log(&self);

    /// The console content changed and should be redrawn
    fn request_repaint(&self);

    /// Whether the host is currently in play mode
    fn is_playing(&self) -> bool;

    /// Pause play mode
    fn pause_playback(&self);

    /// Open a project source file at a position. Returns whether it opened.
    fn open_source(&self, path: &str, line: u32, column: u32) -> bool;

    fn copy_to_clipboard(&self, text: &str);
}

/// Host that ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl EditorHost for NullHost {
    fn clear_host_log(&self) {}

    fn request_repaint(&self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn pause_playback(&self) {}

    fn open_source(&self, _path: &str, _line: u32, _column: u32) -> bool {
        false
    }

    fn copy_to_clipboard(&self, _text: &str) {}
}

/// Host lifecycle notifications that may clear the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    EnteredPlayMode,
    PostBuild,
    ScriptsReloaded,
}

impl LifecycleEvent {
    pub fn display_name(&self) -> &'static str {
        match self {
            LifecycleEvent::EnteredPlayMode => "entered play mode",
            LifecycleEvent::PostBuild => "post build",
            LifecycleEvent::ScriptsReloaded => "scripts reloaded",
        }
    }
}
