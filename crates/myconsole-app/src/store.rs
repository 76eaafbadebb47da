//! Log store and the intake handle that feeds it.
//!
//! The store and its collapse index sit behind one mutex so they are always
//! updated together. Log callbacks may arrive on any thread; they go through a
//! [`LogIntake`], which normalizes the event before taking the lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::{DateTime, Local};

use myconsole_core::prelude::*;
use myconsole_core::{annotate_stack_trace, first_line, LogRecord, Severity, TimeFormat, TracePattern};

use crate::collapse::CollapseIndex;
use crate::host::EditorHost;

/// Append-only record list plus its collapse index
#[derive(Debug, Default)]
pub struct LogState {
    records: Vec<LogRecord>,
    index: CollapseIndex,
}

impl LogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and count it in the index
    pub fn push(&mut self, record: LogRecord) {
        self.index.note_new(&record);
        self.records.push(record);
    }

    /// Recompute the collapse index from the full record list
    pub fn rebuild_index(&mut self) {
        self.index = CollapseIndex::rebuild(&self.records);
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    /// Records in arrival order
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn index(&self) -> &CollapseIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lock the shared state.
///
/// The state is only ever appended to or cleared wholesale, so a panic while
/// holding the lock can't leave it half-updated and poisoning is ignored.
pub(crate) fn lock(state: &Mutex<LogState>) -> MutexGuard<'_, LogState> {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Normalization settings shared by every intake handle
#[derive(Debug, Clone, Default)]
pub struct IntakeConfig {
    pub time_format: TimeFormat,
    pub trace_pattern: TracePattern,
}

/// Thread-safe entry point for host log callbacks.
///
/// Holds only a weak reference to the store, so a handle that outlives its
/// console silently discards events.
#[derive(Clone)]
pub struct LogIntake {
    state: Weak<Mutex<LogState>>,
    config: Arc<IntakeConfig>,
    error_pause: Arc<AtomicBool>,
    host: Arc<dyn EditorHost>,
}

impl std::fmt::Debug for LogIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogIntake")
            .field("attached", &(self.state.strong_count() > 0))
            .field("config", &self.config)
            .field("error_pause", &self.error_pause.load(Ordering::Relaxed))
            .finish()
    }
}

impl LogIntake {
    pub(crate) fn new(
        state: &Arc<Mutex<LogState>>,
        config: Arc<IntakeConfig>,
        error_pause: Arc<AtomicBool>,
        host: Arc<dyn EditorHost>,
    ) -> Self {
        Self {
            state: Arc::downgrade(state),
            config,
            error_pause,
            host,
        }
    }

    /// Record a log event stamped with the current local time.
    ///
    /// Returns `false` when the console is gone and the event was dropped.
    pub fn on_log_received(&self, message: &str, stack_trace: &str, severity: Severity) -> bool {
        self.ingest_at(message, stack_trace, severity, Local::now())
    }

    /// Record a log event with an explicit capture time
    pub fn ingest_at(
        &self,
        message: &str,
        stack_trace: &str,
        severity: Severity,
        captured_at: DateTime<Local>,
    ) -> bool {
        let Some(state) = self.state.upgrade() else {
            trace!("Console dropped, discarding {} log", severity.name());
            return false;
        };

        let record = self.normalize(message, stack_trace, severity, &captured_at);
        lock(&state).push(record);

        if severity.pauses_playback()
            && self.error_pause.load(Ordering::Relaxed)
            && self.host.is_playing()
        {
            debug!("Error pause: pausing playback on {}", severity.name());
            self.host.pause_playback();
        }

        self.host.request_repaint();
        true
    }

    fn normalize(
        &self,
        message: &str,
        stack_trace: &str,
        severity: Severity,
        captured_at: &DateTime<Local>,
    ) -> LogRecord {
        let raw_trace = if stack_trace.is_empty() {
            message
        } else {
            stack_trace
        };
        let trace = annotate_stack_trace(raw_trace, &self.config.trace_pattern);
        LogRecord::new(
            severity,
            first_line(message),
            trace,
            self.config.time_format.format(captured_at),
        )
    }
}
