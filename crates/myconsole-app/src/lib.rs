//! myconsole-app - Console state, intake and export for MyConsole
//!
//! Holds the log store and collapse index behind a single lock, the
//! thread-safe intake handle hosts feed engine log callbacks into, filter and
//! search state, the text exporter, settings loading and the host
//! collaborator traits.

pub mod about;
pub mod collapse;
pub mod config;
pub mod console;
pub mod environment;
pub mod export;
pub mod filter;
pub mod host;
pub mod store;
pub mod style;

// Re-export primary types
pub use about::{AboutInfo, Credit};
pub use collapse::{CollapseIndex, CollapsedEntry, SeverityCounts};
pub use config::Settings;
pub use console::{Console, VisibleRow};
pub use environment::{EnvironmentFacts, LocalEnvironment, SystemFact};
pub use export::Exporter;
pub use filter::{FilterState, SeverityFilter};
pub use host::{EditorHost, LifecycleEvent, NullHost};
pub use store::{IntakeConfig, LogIntake, LogState};
pub use style::{LogStyle, StyleSettings};
