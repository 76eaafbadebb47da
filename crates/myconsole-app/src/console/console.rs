//! Console - the view/controller state of one console window

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use myconsole_core::prelude::*;
use myconsole_core::{find_source_link, LogRecord, Severity, SeverityGroup};

use crate::collapse::SeverityCounts;
use crate::config::Settings;
use crate::environment::EnvironmentFacts;
use crate::export::Exporter;
use crate::filter::FilterState;
use crate::host::{EditorHost, LifecycleEvent};
use crate::store::{lock, IntakeConfig, LogIntake, LogState};

/// One row of the log list as the rendering layer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub record: LogRecord,
    /// Occurrences of this identity, only in collapsed view
    pub count: Option<usize>,
    /// Row text, prefixed with the capture time when enabled
    pub label: String,
}

/// Log list state, selection and host interaction for one console
pub struct Console {
    state: Arc<Mutex<LogState>>,
    settings: Settings,
    intake_config: Arc<IntakeConfig>,
    error_pause: Arc<AtomicBool>,
    host: Arc<dyn EditorHost>,

    /// Severity toggles and search text
    filter: FilterState,

    /// Index into `visible_rows()`
    selected: Option<usize>,

    /// Stack trace shown in the detail pane
    displayed_trace: String,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("logs", &self.len())
            .field("settings", &self.settings)
            .field("filter", &self.filter)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Console {
    pub fn new(settings: Settings, host: Arc<dyn EditorHost>) -> Self {
        let intake_config = Arc::new(IntakeConfig {
            time_format: settings.general.time_format(),
            trace_pattern: settings.trace.clone(),
        });
        let error_pause = Arc::new(AtomicBool::new(settings.view.error_pause));

        Self {
            state: Arc::new(Mutex::new(LogState::new())),
            settings,
            intake_config,
            error_pause,
            host,
            filter: FilterState::default(),
            selected: None,
            displayed_trace: String::new(),
        }
    }

    /// Handle for delivering log callbacks from any thread
    pub fn intake(&self) -> LogIntake {
        LogIntake::new(
            &self.state,
            Arc::clone(&self.intake_config),
            Arc::clone(&self.error_pause),
            Arc::clone(&self.host),
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings, for style lookups and display toggles.
    ///
    /// Trace pattern and time format are fixed when the console is created.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn title(&self) -> &str {
        &self.settings.general.title
    }

    pub fn is_collapsed(&self) -> bool {
        self.settings.view.collapse
    }

    pub fn set_collapse(&mut self, collapse: bool) {
        if self.settings.view.collapse != collapse {
            self.settings.view.collapse = collapse;
            self.reset_selection();
        }
    }

    pub fn error_pause(&self) -> bool {
        self.error_pause.load(Ordering::Relaxed)
    }

    /// Toggle pausing play mode on errors, effective for existing intake handles too
    pub fn set_error_pause(&mut self, enabled: bool) {
        self.settings.view.error_pause = enabled;
        self.error_pause.store(enabled, Ordering::Relaxed);
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Change the search text; the selection refers to rows that may be gone
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.reset_selection();
    }

    /// Show or hide a toolbar severity group
    pub fn set_group_visible(&mut self, group: SeverityGroup, visible: bool) {
        let before = self.filter.severities.clone();
        self.filter.severities.set_group(group, visible);
        if self.filter.severities != before {
            self.reset_selection();
        }
    }

    pub fn set_severity_visible(&mut self, severity: Severity, visible: bool) {
        if self.filter.severities.is_enabled(severity) != visible {
            self.filter.severities.set_enabled(severity, visible);
            self.reset_selection();
        }
    }

    /// Show every severity and clear the search
    pub fn reset_filter(&mut self) {
        if self.filter.is_active() {
            self.filter.reset();
            self.reset_selection();
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        lock(&self.state).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).is_empty()
    }

    /// Copy of every stored record in arrival order
    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.state).records().to_vec()
    }

    /// Window gained focus: recompute the collapse index from the store
    pub fn on_focus(&self) {
        let mut state = lock(&self.state);
        state.rebuild_index();
        debug!(
            "Rebuilt collapse index: {} entries from {} logs",
            state.index().len(),
            state.len()
        );
    }

    /// Empty the store and index, and the host's console when configured
    pub fn clear(&mut self) {
        lock(&self.state).clear();
        self.reset_selection();

        if self.settings.clear.include_host_console {
            self.host.clear_host_log();
        }
        debug!("Console cleared");
        self.host.request_repaint();
    }

    /// React to a host lifecycle notification. Returns whether the console was cleared.
    pub fn on_lifecycle(&mut self, event: LifecycleEvent) -> bool {
        if self.settings.clear.clears_on(event) {
            debug!("Clearing on {}", event.display_name());
            self.clear();
            true
        } else {
            false
        }
    }

    /// Rows passing the filter, in store order or first-insertion order when collapsed
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let show_time = self.settings.general.show_log_time;
        let state = lock(&self.state);

        if self.settings.view.collapse {
            state
                .index()
                .iter()
                .filter(|entry| self.filter.is_visible(&entry.record))
                .map(|entry| VisibleRow {
                    label: entry.record.display_line(show_time),
                    record: entry.record.clone(),
                    count: Some(entry.count),
                })
                .collect()
        } else {
            self.filter
                .visible(state.records())
                .map(|record| VisibleRow {
                    label: record.display_line(show_time),
                    record: record.clone(),
                    count: None,
                })
                .collect()
        }
    }

    /// Occurrence totals for the toolbar toggles
    pub fn severity_counts(&self) -> SeverityCounts {
        lock(&self.state).index().severity_counts()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Stack trace of the selected row, empty when nothing is selected
    pub fn displayed_trace(&self) -> &str {
        &self.displayed_trace
    }

    /// Select a visible row, clamped to the last one. Returns the selected index.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        let rows = self.visible_rows();
        if rows.is_empty() {
            self.reset_selection();
            return None;
        }

        let index = index.min(rows.len() - 1);
        self.selected = Some(index);
        self.displayed_trace = rows[index].record.stack_trace().to_string();
        self.selected
    }

    /// Up arrow
    pub fn select_previous(&mut self) -> Option<usize> {
        let index = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(index)
    }

    /// Down arrow
    pub fn select_next(&mut self) -> Option<usize> {
        let index = self.selected.map_or(0, |i| i + 1);
        self.select(index)
    }

    fn reset_selection(&mut self) {
        self.selected = None;
        self.displayed_trace.clear();
    }

    fn row(&self, index: usize) -> Option<VisibleRow> {
        self.visible_rows().into_iter().nth(index)
    }

    /// Open the first source link of a row's stack trace in the host.
    ///
    /// Returns `false` when the row has no link or the host couldn't open it.
    pub fn open_source(&self, index: usize) -> bool {
        let Some(row) = self.row(index) else {
            return false;
        };
        let Some(position) = find_source_link(row.record.stack_trace()) else {
            debug!("No source link in row {}", index);
            return false;
        };

        self.host.open_source(
            &position.path,
            position.line_or_zero(),
            position.column_or_zero(),
        )
    }

    /// Copy a row's message to the clipboard
    pub fn copy_message(&self, index: usize) -> bool {
        match self.row(index) {
            Some(row) => {
                self.host.copy_to_clipboard(row.record.message());
                true
            }
            None => false,
        }
    }

    /// Copy a row's stack trace to the clipboard
    pub fn copy_stack_trace(&self, index: usize) -> bool {
        match self.row(index) {
            Some(row) => {
                self.host.copy_to_clipboard(row.record.stack_trace());
                true
            }
            None => false,
        }
    }

    /// Whether there is anything to export
    pub fn can_export(&self) -> bool {
        !self.is_empty()
    }

    /// Export every stored record, regardless of filters
    pub fn export(&self, path: &Path, env: &dyn EnvironmentFacts) -> Result<()> {
        let records = self.records();
        Exporter::new(self.settings.export.clone()).export(path, env, &records)
    }
}
