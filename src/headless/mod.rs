//! Headless mode - replay recorded host events into a console
//!
//! Stands in for the editor a console is normally embedded in. Host events are
//! read as NDJSON, one per line, and fed to a [`Console`] the same way the
//! editor's callbacks would.
//!
//! # Event Format
//!
//! ```json
//! {"event":"entered_play_mode"}
//! {"event":"log","message":"Player spawned","stack_trace":"Player.Start () (at Assets/Player.cs:12)","severity":"info"}
//! {"event":"log","message":"NullReferenceException","severity":"exception","at":"2024-05-01T10:00:00+02:00"}
//! {"event":"post_build"}
//! {"event":"scripts_reloaded"}
//! {"event":"clear"}
//! ```
//!
//! [`Console`]: myconsole_app::Console

pub mod runner;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use myconsole_app::{EditorHost, LifecycleEvent, VisibleRow};
use myconsole_core::prelude::*;
use myconsole_core::Severity;

/// Events a host editor delivers to the console
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Engine log callback
    Log {
        message: String,
        #[serde(default)]
        stack_trace: String,
        #[serde(default = "default_severity")]
        severity: Severity,
        /// Capture time; the replay time is used when absent
        #[serde(default)]
        at: Option<DateTime<Local>>,
    },

    EnteredPlayMode,

    ExitedPlayMode,

    PostBuild,

    ScriptsReloaded,

    /// Clear button
    Clear,

    /// Console window gained focus
    Focus,
}

fn default_severity() -> Severity {
    Severity::Info
}

impl HostEvent {
    /// Parse one NDJSON line. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| Error::host_event(format!("{}: {}", e, trimmed)))
    }

    /// Lifecycle notification carried by this event, if any
    pub fn lifecycle(&self) -> Option<LifecycleEvent> {
        match self {
            HostEvent::EnteredPlayMode => Some(LifecycleEvent::EnteredPlayMode),
            HostEvent::PostBuild => Some(LifecycleEvent::PostBuild),
            HostEvent::ScriptsReloaded => Some(LifecycleEvent::ScriptsReloaded),
            _ => None,
        }
    }
}

/// Host backed by the replay: tracks play state and records what the console asked for
#[derive(Debug, Default)]
pub struct ReplayHost {
    project: PathBuf,
    playing: AtomicBool,
    paused: AtomicBool,
    host_clears: AtomicUsize,
    repaints: AtomicUsize,
    clipboard: Mutex<Option<String>>,
}

impl ReplayHost {
    pub fn new(project: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Relaxed);
        if playing {
            self.paused.store(false, Ordering::Relaxed);
        }
    }

    /// Whether error pause stopped playback
    pub fn was_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn host_clears(&self) -> usize {
        self.host_clears.load(Ordering::Relaxed)
    }

    pub fn repaints(&self) -> usize {
        self.repaints.load(Ordering::Relaxed)
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn project(&self) -> &Path {
        &self.project
    }
}

impl EditorHost for ReplayHost {
    fn clear_host_log(&self) {
        self.host_clears.fetch_add(1, Ordering::Relaxed);
    }

    fn request_repaint(&self) {
        self.repaints.fetch_add(1, Ordering::Relaxed);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    fn pause_playback(&self) {
        info!("Playback paused on error");
        self.playing.store(false, Ordering::Relaxed);
        self.paused.store(true, Ordering::Relaxed);
    }

    fn open_source(&self, path: &str, line: u32, column: u32) -> bool {
        let full = self.project.join(path);
        let exists = full.exists();
        debug!("Open {}:{}:{} (exists: {})", full.display(), line, column, exists);
        exists
    }

    fn copy_to_clipboard(&self, text: &str) {
        *self
            .clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
    }
}

/// A visible row as written by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct RowOutput<'a> {
    pub time: &'a str,
    pub severity: Severity,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub stack_trace: &'a str,
}

impl<'a> From<&'a VisibleRow> for RowOutput<'a> {
    fn from(row: &'a VisibleRow) -> Self {
        Self {
            time: row.record.captured_at(),
            severity: row.record.severity(),
            message: row.record.message(),
            count: row.count,
            stack_trace: row.record.stack_trace(),
        }
    }
}

/// Plain-text rendering of a row: `ERR [12:00:00] message (x3)`
pub fn format_row(row: &VisibleRow) -> String {
    let mut line = format!("{} {}", row.record.severity().prefix(), row.label);
    if let Some(count) = row.count {
        line.push_str(&format!(" (x{})", count));
    }
    line
}
