//! Console window state: log list, selection, clearing and export

#[allow(clippy::module_inception)]
mod console;

#[cfg(test)]
mod tests;

pub use console::{Console, VisibleRow};
