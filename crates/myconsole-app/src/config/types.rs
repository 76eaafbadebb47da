//! Configuration types for MyConsole
//!
//! Defines:
//! - `Settings` - Everything read from `.myconsole/config.toml`
//! - One sub-struct per TOML section

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use myconsole_core::{TimeFormat, TracePattern, DEFAULT_TIME_FORMAT};

use crate::environment::SystemFact;
use crate::host::LifecycleEvent;
use crate::style::StyleSettings;

/// Separator written between records in exported reports
pub const DEFAULT_SEPARATOR: &str = "----------------------------";

/// Global console settings from `.myconsole/config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub clear: ClearSettings,

    #[serde(default)]
    pub view: ViewSettings,

    /// How source positions are recognised in stack traces
    #[serde(default)]
    pub trace: TracePattern,

    #[serde(default)]
    pub styles: StyleSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralSettings {
    /// Window title shown by the host
    #[serde(default = "default_title")]
    pub title: String,

    /// Prefix every row with its capture time
    #[serde(default = "default_true")]
    pub show_log_time: bool,

    /// strftime pattern for capture times
    #[serde(default = "default_log_time_format")]
    pub log_time_format: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_log_time: true,
            log_time_format: default_log_time_format(),
        }
    }
}

impl GeneralSettings {
    /// Validated capture-time format; an unusable pattern falls back to the default
    pub fn time_format(&self) -> TimeFormat {
        TimeFormat::new_or_default(&self.log_time_format)
    }
}

/// When the console empties itself
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClearSettings {
    /// Clear when the host enters play mode
    #[serde(default = "default_true")]
    pub on_play: bool,

    /// Clear after a player build
    #[serde(default)]
    pub on_build: bool,

    /// Clear after scripts are recompiled
    #[serde(default)]
    pub on_recompile: bool,

    /// Also clear the host's built-in console
    #[serde(default = "default_true")]
    pub include_host_console: bool,
}

impl Default for ClearSettings {
    fn default() -> Self {
        Self {
            on_play: true,
            on_build: false,
            on_recompile: false,
            include_host_console: true,
        }
    }
}

impl ClearSettings {
    /// Whether `event` should clear the console
    pub fn clears_on(&self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::EnteredPlayMode => self.on_play,
            LifecycleEvent::PostBuild => self.on_build,
            LifecycleEvent::ScriptsReloaded => self.on_recompile,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewSettings {
    /// Show one row per distinct log with its count
    #[serde(default)]
    pub collapse: bool,

    /// Pause play mode when an error or exception arrives
    #[serde(default)]
    pub error_pause: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Facts written to the SYSTEM INFORMATION section
    #[serde(default = "default_facts")]
    pub facts: BTreeSet<SystemFact>,

    /// Line written between two records
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            facts: default_facts(),
            separator: default_separator(),
        }
    }
}

fn default_title() -> String {
    "MyConsole".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_facts() -> BTreeSet<SystemFact> {
    SystemFact::ALL.into_iter().collect()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
