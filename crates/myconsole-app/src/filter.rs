//! Severity filtering and message search.

use std::collections::BTreeSet;

use myconsole_core::{LogRecord, Severity, SeverityGroup};

/// Explicit set of severities currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityFilter {
    enabled: BTreeSet<Severity>,
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl SeverityFilter {
    /// Every severity enabled
    pub fn all() -> Self {
        Self {
            enabled: Severity::ALL.into_iter().collect(),
        }
    }

    /// Nothing enabled
    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.enabled.contains(&severity)
    }

    pub fn set_enabled(&mut self, severity: Severity, enabled: bool) {
        if enabled {
            self.enabled.insert(severity);
        } else {
            self.enabled.remove(&severity);
        }
    }

    pub fn toggle(&mut self, severity: Severity) {
        let enabled = self.is_enabled(severity);
        self.set_enabled(severity, !enabled);
    }

    /// Enable or disable every member of a toolbar group at once
    pub fn set_group(&mut self, group: SeverityGroup, enabled: bool) {
        for &severity in group.members() {
            self.set_enabled(severity, enabled);
        }
    }

    /// A group's toggle shows as active when any member is enabled
    pub fn is_group_active(&self, group: SeverityGroup) -> bool {
        group.members().iter().any(|s| self.is_enabled(*s))
    }

    pub fn is_all(&self) -> bool {
        self.enabled.len() == Severity::ALL.len()
    }
}

/// Transient view filter: enabled severities plus a literal search pattern
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub severities: SeverityFilter,
    /// Case-sensitive substring matched against the message only
    pub search: String,
}

impl FilterState {
    /// Check if a record passes both the severity and the search check
    pub fn is_visible(&self, record: &LogRecord) -> bool {
        self.severities.is_enabled(record.severity())
            && (self.search.is_empty() || record.message().contains(self.search.as_str()))
    }

    /// Check if anything is hidden by this filter
    pub fn is_active(&self) -> bool {
        !self.severities.is_all() || !self.search.is_empty()
    }

    /// Reset all filters to their default state
    pub fn reset(&mut self) {
        self.severities = SeverityFilter::all();
        self.search.clear();
    }

    /// Records passing the filter, in their original order
    pub fn visible<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a LogRecord> + 'a
    where
        I: IntoIterator<Item = &'a LogRecord>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |r| self.is_visible(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(severity: Severity, message: &str, trace: &str) -> LogRecord {
        LogRecord::new(severity, message, trace, "")
    }

    #[test]
    fn test_default_shows_everything() {
        let filter = FilterState::default();
        for severity in Severity::ALL {
            assert!(filter.is_visible(&record(severity, "m", "t")));
        }
        assert!(!filter.is_active());
    }

    #[test]
    fn test_search_is_message_only_and_case_sensitive() {
        let hello = record(Severity::Info, "Hello", "called from world");
        let mut filter = FilterState::default();

        filter.search = "world".to_string();
        assert!(!filter.is_visible(&hello));

        filter.search = "Hello".to_string();
        assert!(filter.is_visible(&hello));

        filter.search = "hello".to_string();
        assert!(!filter.is_visible(&hello));
    }

    #[test]
    fn test_search_has_no_wildcards() {
        let filter = FilterState {
            search: "a.*b".to_string(),
            ..Default::default()
        };
        assert!(!filter.is_visible(&record(Severity::Info, "axxb", "")));
        assert!(filter.is_visible(&record(Severity::Info, "see a.*b here", "")));
    }

    #[test]
    fn test_group_toggle_covers_error_class() {
        let mut filter = FilterState::default();
        filter.severities.set_group(SeverityGroup::Error, false);

        assert!(!filter.is_visible(&record(Severity::Error, "e", "")));
        assert!(!filter.is_visible(&record(Severity::Assert, "a", "")));
        assert!(!filter.is_visible(&record(Severity::Exception, "x", "")));
        assert!(filter.is_visible(&record(Severity::Warning, "w", "")));
        assert!(!filter.severities.is_group_active(SeverityGroup::Error));
    }

    #[test]
    fn test_individual_severity_within_group() {
        let mut severities = SeverityFilter::none();
        severities.set_enabled(Severity::Assert, true);
        let filter = FilterState {
            severities,
            search: String::new(),
        };

        assert!(filter.is_visible(&record(Severity::Assert, "a", "")));
        assert!(!filter.is_visible(&record(Severity::Error, "e", "")));
        assert!(filter.severities.is_group_active(SeverityGroup::Error));
    }

    #[test]
    fn test_both_checks_must_pass() {
        let mut filter = FilterState::default();
        filter.severities.toggle(Severity::Warning);
        filter.search = "disk".to_string();

        assert!(!filter.is_visible(&record(Severity::Warning, "disk low", "")));
        assert!(filter.is_visible(&record(Severity::Info, "disk ok", "")));
        assert!(!filter.is_visible(&record(Severity::Info, "net ok", "")));
        assert!(filter.is_active());
    }

    #[test]
    fn test_visible_preserves_order() {
        let records = vec![
            record(Severity::Info, "1", ""),
            record(Severity::Warning, "2", ""),
            record(Severity::Info, "3", ""),
        ];
        let mut filter = FilterState::default();
        filter.severities.set_group(SeverityGroup::Warning, false);

        let messages: Vec<&str> = filter.visible(&records).map(|r| r.message()).collect();
        assert_eq!(messages, vec!["1", "3"]);
    }

    #[test]
    fn test_reset() {
        let mut filter = FilterState::default();
        filter.severities = SeverityFilter::none();
        filter.search = "x".to_string();
        filter.reset();
        assert!(!filter.is_active());
    }
}
