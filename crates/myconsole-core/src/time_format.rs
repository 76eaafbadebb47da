//! Capture-time formatting for log records.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Pattern used when settings don't provide a usable one
pub const DEFAULT_TIME_FORMAT: &str = "[%H:%M:%S]";

/// A strftime pattern that is known to format without errors.
///
/// chrono panics when displaying an invalid pattern, so patterns coming from
/// settings are validated once here. Some specifiers only fail while
/// formatting (`%#z`), so a sample time is formatted as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pattern: String,
}

impl TimeFormat {
    /// Validate and wrap a strftime pattern
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::invalid_time_format(pattern));
        }

        let mut sample = String::new();
        if write!(sample, "{}", Local::now().format(&pattern)).is_err() {
            return Err(Error::invalid_time_format(pattern));
        }
        Ok(Self { pattern })
    }

    /// Like [`TimeFormat::new`], falling back to [`DEFAULT_TIME_FORMAT`]
    pub fn new_or_default(pattern: &str) -> Self {
        Self::new(pattern).unwrap_or_else(|err| {
            tracing::warn!("{}, using {:?}", err, DEFAULT_TIME_FORMAT);
            Self::default()
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, time: &DateTime<Local>) -> String {
        time.format(&self.pattern).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}
