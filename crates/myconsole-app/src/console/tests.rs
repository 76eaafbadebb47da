//! Tests for the console module.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::{Local, TimeZone};
    use mockall::predicate::eq;
    use myconsole_core::{Severity, SeverityGroup};
    use tempfile::tempdir;

    use crate::config::Settings;
    use crate::console::Console;
    use crate::environment::SystemFact;
    use crate::host::{EditorHost, LifecycleEvent, MockEditorHost, NullHost};

    const PLAYER_TRACE: &str =
        "Player.Update () (at Assets/Scripts/Player.cs:42)\nUnityEngine.Debug:Log (object)";

    fn console() -> Console {
        Console::new(Settings::default(), Arc::new(NullHost))
    }

    fn console_with(settings: Settings, host: MockEditorHost) -> Console {
        Console::new(settings, Arc::new(host) as Arc<dyn EditorHost>)
    }

    /// Host that tolerates any number of repaint requests
    fn quiet_host() -> MockEditorHost {
        let mut host = MockEditorHost::new();
        host.expect_request_repaint().return_const(());
        host.expect_is_playing().return_const(false);
        host
    }

    fn feed(console: &Console, logs: &[(&str, &str, Severity)]) {
        let intake = console.intake();
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        for (message, trace, severity) in logs {
            intake.ingest_at(message, trace, *severity, at);
        }
    }

    #[test]
    fn test_expanded_view_lists_every_log_in_order() {
        let console = console();
        feed(
            &console,
            &[
                ("a", "", Severity::Info),
                ("b", "", Severity::Warning),
                ("a", "", Severity::Info),
            ],
        );

        let rows = console.visible_rows();
        let messages: Vec<&str> = rows.iter().map(|r| r.record.message()).collect();
        assert_eq!(messages, vec!["a", "b", "a"]);
        assert!(rows.iter().all(|r| r.count.is_none()));
        assert_eq!(rows[0].label, "[03:04:05] a");
    }

    #[test]
    fn test_collapsed_view_shows_counts() {
        let mut console = console();
        feed(
            &console,
            &[
                ("a", "", Severity::Info),
                ("b", "", Severity::Warning),
                ("a", "", Severity::Info),
            ],
        );
        console.set_collapse(true);

        let rows = console.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.message(), "a");
        assert_eq!(rows[0].count, Some(2));
        assert_eq!(rows[1].count, Some(1));
    }

    #[test]
    fn test_label_without_time() {
        let mut settings = Settings::default();
        settings.general.show_log_time = false;
        let console = Console::new(settings, Arc::new(NullHost));
        feed(&console, &[("plain", "", Severity::Info)]);

        assert_eq!(console.visible_rows()[0].label, "plain");
    }

    #[test]
    fn test_filter_applies_to_both_views() {
        let mut console = console();
        feed(
            &console,
            &[
                ("disk full", "", Severity::Error),
                ("disk ok", "", Severity::Info),
                ("net down", "", Severity::Exception),
            ],
        );
        console.set_group_visible(SeverityGroup::Info, false);
        console.set_search("disk");

        let rows = console.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.message(), "disk full");

        console.set_collapse(true);
        assert_eq!(console.visible_rows().len(), 1);
    }

    #[test]
    fn test_severity_toggles_reset_selection() {
        let mut console = console();
        feed(
            &console,
            &[
                ("first", "", Severity::Info),
                ("second", PLAYER_TRACE, Severity::Error),
            ],
        );
        assert_eq!(console.select(1), Some(1));

        // no change, selection stays
        console.set_group_visible(SeverityGroup::Warning, true);
        assert_eq!(console.selected(), Some(1));

        console.set_group_visible(SeverityGroup::Info, false);
        assert_eq!(console.selected(), None);
        assert_eq!(console.displayed_trace(), "");
        assert!(!console.filter().severities.is_group_active(SeverityGroup::Info));

        console.select(0);
        console.set_severity_visible(Severity::Exception, false);
        assert_eq!(console.selected(), None);

        console.set_search("second");
        console.select(0);
        console.reset_filter();
        assert_eq!(console.selected(), None);
        assert!(!console.filter().is_active());
        assert_eq!(console.visible_rows().len(), 2);
    }

    #[test]
    fn test_time_format_failing_at_format_time_uses_default() {
        let mut settings = Settings::default();
        settings.general.log_time_format = "%#z".to_string();
        let console = Console::new(settings, Arc::new(NullHost));

        assert!(console
            .intake()
            .on_log_received("still logged", "", Severity::Warning));
        feed(&console, &[("stamped", "", Severity::Info)]);

        let rows = console.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "[03:04:05] stamped");
    }

    #[test]
    fn test_on_focus_rebuild_keeps_counts() {
        let mut console = console();
        feed(
            &console,
            &[
                ("x", "", Severity::Info),
                ("x", "", Severity::Info),
                ("y", "", Severity::Error),
            ],
        );
        console.set_collapse(true);
        let before = console.visible_rows();

        console.on_focus();

        assert_eq!(console.visible_rows(), before);
        let counts = console.severity_counts();
        assert_eq!(counts.info, 2);
        assert_eq!(counts.error, 1);
    }

    #[test]
    fn test_clear_includes_host_console_by_default() {
        let mut host = quiet_host();
        host.expect_clear_host_log().times(1).return_const(());

        let mut console = console_with(Settings::default(), host);
        feed(&console, &[("m", PLAYER_TRACE, Severity::Info)]);
        console.select(0);

        console.clear();

        assert!(console.is_empty());
        assert!(console.visible_rows().is_empty());
        assert_eq!(console.selected(), None);
        assert_eq!(console.displayed_trace(), "");
        assert_eq!(console.severity_counts().info, 0);
    }

    #[test]
    fn test_clear_leaves_host_console_when_disabled() {
        let mut host = quiet_host();
        host.expect_clear_host_log().never();

        let mut settings = Settings::default();
        settings.clear.include_host_console = false;
        let mut console = console_with(settings, host);

        console.clear();
    }

    #[test]
    fn test_lifecycle_clear_follows_settings() {
        let mut host = quiet_host();
        host.expect_clear_host_log().return_const(());
        let mut console = console_with(Settings::default(), host);

        feed(&console, &[("m", "", Severity::Info)]);
        assert!(!console.on_lifecycle(LifecycleEvent::PostBuild));
        assert!(!console.on_lifecycle(LifecycleEvent::ScriptsReloaded));
        assert_eq!(console.len(), 1);

        assert!(console.on_lifecycle(LifecycleEvent::EnteredPlayMode));
        assert!(console.is_empty());
    }

    #[test]
    fn test_error_pause_toggle_reaches_existing_intake() {
        let mut host = MockEditorHost::new();
        host.expect_request_repaint().return_const(());
        host.expect_is_playing().return_const(true);
        host.expect_pause_playback().times(1).return_const(());

        let mut console = console_with(Settings::default(), host);
        let intake = console.intake();

        intake.on_log_received("before", "", Severity::Error);
        console.set_error_pause(true);
        intake.on_log_received("after", "", Severity::Error);

        assert!(console.error_pause());
    }

    #[test]
    fn test_keyboard_selection_is_clamped() {
        let mut console = console();
        feed(
            &console,
            &[
                ("first", "trace one", Severity::Info),
                ("second", "trace two", Severity::Info),
            ],
        );

        assert_eq!(console.select_previous(), Some(0));
        assert_eq!(console.displayed_trace(), "trace one");
        assert_eq!(console.select_next(), Some(1));
        assert_eq!(console.select_next(), Some(1));
        assert_eq!(console.displayed_trace(), "trace two");
        assert_eq!(console.select_previous(), Some(0));
        assert_eq!(console.select_previous(), Some(0));
        assert_eq!(console.select(10), Some(1));
    }

    #[test]
    fn test_select_on_empty_console() {
        let mut console = console();
        assert_eq!(console.select_next(), None);
        assert_eq!(console.select(0), None);
        assert_eq!(console.displayed_trace(), "");
    }

    #[test]
    fn test_open_source_uses_first_link() {
        let mut host = quiet_host();
        host.expect_open_source()
            .with(eq("Assets/Scripts/Player.cs"), eq(42), eq(0))
            .times(1)
            .return_const(true);

        let console = console_with(Settings::default(), host);
        feed(&console, &[("m", PLAYER_TRACE, Severity::Error)]);

        assert!(console.open_source(0));
    }

    #[test]
    fn test_open_source_without_link() {
        let mut host = quiet_host();
        host.expect_open_source().never();

        let console = console_with(Settings::default(), host);
        feed(&console, &[("m", "no project frames", Severity::Error)]);

        assert!(!console.open_source(0));
        assert!(!console.open_source(5));
    }

    #[test]
    fn test_copy_message_and_trace() {
        let mut host = quiet_host();
        host.expect_copy_to_clipboard()
            .with(eq("boom"))
            .times(1)
            .return_const(());
        host.expect_copy_to_clipboard()
            .with(eq("boom\nmore"))
            .times(1)
            .return_const(());

        let console = console_with(Settings::default(), host);
        feed(&console, &[("boom\nmore", "", Severity::Exception)]);

        assert!(console.copy_message(0));
        assert!(console.copy_stack_trace(0));
        assert!(!console.copy_message(1));
    }

    #[test]
    fn test_export_writes_all_logs_ignoring_filter() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("export.txt");

        let mut console = console();
        assert!(!console.can_export());
        feed(
            &console,
            &[
                ("visible", "", Severity::Info),
                ("hidden", "", Severity::Warning),
            ],
        );
        console.set_group_visible(SeverityGroup::Warning, false);
        assert!(console.can_export());

        let mut facts = HashMap::new();
        facts.insert(SystemFact::DeviceName, "devbox".to_string());
        console.export(&path, &facts).unwrap();

        let report = std::fs::read_to_string(&path).unwrap();
        assert!(report.contains("Device name: devbox"));
        assert!(report.contains("Processor: Unknown"));
        assert!(report.contains("Message: visible"));
        assert!(report.contains("Message: hidden"));
        assert!(report.contains("Time: [03:04:05] | Log type: Warning"));
    }

    #[test]
    fn test_intake_outliving_console() {
        let console = console();
        let intake = console.intake();
        assert!(intake.on_log_received("alive", "", Severity::Info));

        drop(console);
        assert!(!intake.on_log_received("gone", "", Severity::Info));
    }
}
