//! Core domain type definitions

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Log severity as reported by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Assert,
    Exception,
}

impl Severity {
    /// Every severity, in declaration order
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Assert,
        Severity::Exception,
    ];

    /// Get display prefix for severity
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Info => "INF",
            Severity::Warning => "WRN",
            Severity::Error => "ERR",
            Severity::Assert => "AST",
            Severity::Exception => "EXC",
        }
    }

    /// Full name, as written to exported reports
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Assert => "Assert",
            Severity::Exception => "Exception",
        }
    }

    /// Toolbar group this severity is counted and toggled under
    pub fn group(&self) -> SeverityGroup {
        match self {
            Severity::Info => SeverityGroup::Info,
            Severity::Warning => SeverityGroup::Warning,
            Severity::Error | Severity::Assert | Severity::Exception => SeverityGroup::Error,
        }
    }

    /// Error, Assert and Exception all belong to the error group
    pub fn is_error_class(&self) -> bool {
        self.group() == SeverityGroup::Error
    }

    /// Severities that pause playback when error pause is enabled
    pub fn pauses_playback(&self) -> bool {
        matches!(self, Severity::Error | Severity::Exception)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" | "log" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "assert" => Ok(Severity::Assert),
            "exception" => Ok(Severity::Exception),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// One visible toolbar toggle. The error group covers three severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityGroup {
    Info,
    Warning,
    Error,
}

impl SeverityGroup {
    pub const ALL: [SeverityGroup; 3] = [
        SeverityGroup::Info,
        SeverityGroup::Warning,
        SeverityGroup::Error,
    ];

    /// Severities controlled by this group's toggle
    pub fn members(&self) -> &'static [Severity] {
        match self {
            SeverityGroup::Info => &[Severity::Info],
            SeverityGroup::Warning => &[Severity::Warning],
            SeverityGroup::Error => &[Severity::Error, Severity::Assert, Severity::Exception],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeverityGroup::Info => "Info",
            SeverityGroup::Warning => "Warnings",
            SeverityGroup::Error => "Errors",
        }
    }
}

impl std::str::FromStr for SeverityGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(SeverityGroup::Info),
            "warning" | "warnings" => Ok(SeverityGroup::Warning),
            "error" | "errors" => Ok(SeverityGroup::Error),
            other => Err(format!("unknown severity group: {other}")),
        }
    }
}

/// A captured log event.
///
/// Equality and hashing consider only `(severity, message, stack_trace)`;
/// two records captured at different times are the same collapse entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    message: String,
    stack_trace: String,
    severity: Severity,
    captured_at: String,
}

impl LogRecord {
    /// Build a record from already-normalized parts
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        stack_trace: impl Into<String>,
        captured_at: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
            severity,
            captured_at: captured_at.into(),
        }
    }

    /// First line of the original message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Annotated stack trace
    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Capture time, formatted with the configured pattern
    pub fn captured_at(&self) -> &str {
        &self.captured_at
    }

    /// Format for single-line display
    pub fn display_line(&self, show_time: bool) -> String {
        if show_time {
            format!("{} {}", self.captured_at, self.message)
        } else {
            self.message.clone()
        }
    }
}

impl PartialEq for LogRecord {
    fn eq(&self, other: &Self) -> bool {
        self.severity == other.severity
            && self.message == other.message
            && self.stack_trace == other.stack_trace
    }
}

impl Eq for LogRecord {}

impl Hash for LogRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.severity.hash(state);
        self.message.hash(state);
        self.stack_trace.hash(state);
    }
}

/// Content of `text` before its first line break (`\r` or `\n`)
pub fn first_line(text: &str) -> &str {
    match text.find(['\r', '\n']) {
        Some(idx) => &text[..idx],
        None => text,
    }
}
