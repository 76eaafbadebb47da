//! Collapse index: one entry per distinct log identity with its occurrence count.

use std::collections::HashMap;

use myconsole_core::{LogRecord, Severity, SeverityGroup};

/// A distinct log identity and how many times it arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedEntry {
    /// First record seen with this identity
    pub record: LogRecord,
    pub count: usize,
}

/// Maps `(severity, message, stack_trace)` to an occurrence count.
///
/// Iteration follows first-insertion order, so the collapsed view lists
/// entries in the order their identity first arrived.
#[derive(Debug, Clone, Default)]
pub struct CollapseIndex {
    entries: Vec<CollapsedEntry>,
    positions: HashMap<LogRecord, usize>,
}

impl CollapseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by replaying every record in arrival order
    pub fn rebuild(records: &[LogRecord]) -> Self {
        let mut index = Self::new();
        for record in records {
            index.note_new(record);
        }
        index
    }

    /// Count one more occurrence of `record`
    pub fn note_new(&mut self, record: &LogRecord) {
        match self.positions.get(record) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.positions.insert(record.clone(), self.entries.len());
                self.entries.push(CollapsedEntry {
                    record: record.clone(),
                    count: 1,
                });
            }
        }
    }

    /// Occurrences of `record`'s identity, 0 when never seen
    pub fn count_of(&self, record: &LogRecord) -> usize {
        self.positions
            .get(record)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollapsedEntry> {
        self.entries.iter()
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    /// Occurrence totals per toolbar group
    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for entry in &self.entries {
            counts.add(entry.record.severity(), entry.count);
        }
        counts
    }
}

/// Toolbar counters. Error, Assert and Exception share the error counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl SeverityCounts {
    fn add(&mut self, severity: Severity, count: usize) {
        match severity.group() {
            SeverityGroup::Info => self.info += count,
            SeverityGroup::Warning => self.warning += count,
            SeverityGroup::Error => self.error += count,
        }
    }

    pub fn get(&self, group: SeverityGroup) -> usize {
        match group {
            SeverityGroup::Info => self.info,
            SeverityGroup::Warning => self.warning,
            SeverityGroup::Error => self.error,
        }
    }
}
