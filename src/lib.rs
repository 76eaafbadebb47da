//! MyConsole Library
//!
//! Headless host for the MyConsole log console: replays recorded editor
//! events into a console, prints what it would show and exports reports.

pub mod headless;

pub use headless::runner::{run_replay, ReplayOptions, ReplaySummary};
pub use headless::{HostEvent, ReplayHost};
