//! # myconsole-core - Core Domain Types
//!
//! Foundation crate for MyConsole. Provides log record types, severity
//! classification, stack trace position parsing, hyperlink annotation,
//! timestamp formatting, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Severity`] - Log severity (Info, Warning, Error, Assert, Exception)
//! - [`SeverityGroup`] - Toolbar grouping of severities (Info, Warning, Error)
//! - [`LogRecord`] - A single captured log event, identified by
//!   `(severity, message, stack_trace)`
//!
//! ### Stack Traces (`stack_trace`)
//! - [`parse_position()`] - Locate a `path(line,column)` / `path:line` reference
//! - [`annotate_stack_trace()`] - Wrap detected paths in hyperlink markup
//! - [`find_source_link()`] - Recover the first hyperlink from annotated text
//! - [`ParsedStackTrace`] - Per-line view of a trace with detected positions
//!
//! ### Time (`time_format`)
//! - [`TimeFormat`] - Validated strftime pattern used to stamp records
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use myconsole_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod stack_trace;
pub mod time_format;
pub mod types;

/// Prelude for common imports used throughout all MyConsole crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use stack_trace::{
    annotate_line, annotate_stack_trace, find_source_link, parse_position, ParsedStackTrace,
    SourcePosition, TraceLine, TracePattern,
};
pub use time_format::{TimeFormat, DEFAULT_TIME_FORMAT};
pub use types::{first_line, LogRecord, Severity, SeverityGroup};
