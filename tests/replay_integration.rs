//! End-to-end replays of recorded host sessions

use std::io::Cursor;
use std::path::PathBuf;

use myconsole::{run_replay, ReplayOptions};
use myconsole_core::SeverityGroup;
use tempfile::tempdir;

const PLAY_SESSION: &str = include_str!("fixtures/host_events/play_session.ndjson");

fn replay(options: &ReplayOptions) -> (myconsole::ReplaySummary, String) {
    let mut out = Vec::new();
    let summary = run_replay(options, Cursor::new(PLAY_SESSION), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

fn project() -> tempfile::TempDir {
    tempdir().unwrap()
}

#[test]
fn test_play_session_expanded() {
    let project = project();
    let options = ReplayOptions {
        project: project.path().to_path_buf(),
        ..Default::default()
    };
    let (summary, out) = replay(&options);

    assert_eq!(summary.skipped, 1);
    // "Editor ready" was cleared on entering play mode
    assert_eq!(summary.logs, 5);
    assert!(!out.contains("Editor ready"));

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("Player spawned"));
    assert!(lines[1].starts_with("WRN "));
    assert!(lines[4].starts_with("EXC "));
}

#[test]
fn test_play_session_collapsed_errors_only() {
    let project = project();
    let options = ReplayOptions {
        project: project.path().to_path_buf(),
        collapse: Some(true),
        hide: vec![SeverityGroup::Info, SeverityGroup::Error],
        ..Default::default()
    };
    let (summary, out) = replay(&options);

    assert_eq!(summary.rows, 1);
    assert!(out.trim_end().ends_with("Low ammo (x2)"));
}

#[test]
fn test_play_session_json_rows_carry_annotated_traces() {
    let project = project();
    let options = ReplayOptions {
        project: project.path().to_path_buf(),
        json: true,
        search: Some("Shader".to_string()),
        ..Default::default()
    };
    let (_, out) = replay(&options);

    let row: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(row["severity"], "error");
    assert_eq!(
        row["stack_trace"],
        r#"<a href="Assets/Shaders/Water.cs" line="14" column="7">Assets/Shaders/Water.cs</a>(14,7): error CS1002: ; expected"#
    );
}

#[test]
fn test_error_pause_from_project_settings() {
    let project = project();
    let config_dir = project.path().join(".myconsole");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[view]\nerror_pause = true\n").unwrap();

    let options = ReplayOptions {
        project: project.path().to_path_buf(),
        ..Default::default()
    };
    let (summary, _) = replay(&options);

    assert!(summary.paused);
}

#[test]
fn test_export_is_deterministic() {
    let project = project();
    let first = project.path().join("first.txt");
    let second = project.path().join("second.txt");

    for path in [&first, &second] {
        let options = ReplayOptions {
            project: project.path().to_path_buf(),
            export: Some(PathBuf::from(path)),
            ..Default::default()
        };
        replay(&options);
    }

    let a = std::fs::read_to_string(&first).unwrap();
    let b = std::fs::read_to_string(&second).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("MyConsole log export\n\nSYSTEM INFORMATION\n"));
    assert!(a.contains("Log type: Exception"));
    assert!(a.contains("Message: Player spawned\n"));
    assert!(a.contains("Stack trace: NullReferenceException: Object reference not set"));
}

#[test]
fn test_export_into_missing_directory_fails() {
    let project = project();
    let options = ReplayOptions {
        project: project.path().to_path_buf(),
        export: Some(project.path().join("missing").join("out.txt")),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = run_replay(&options, Cursor::new(PLAY_SESSION), &mut out).unwrap_err();

    assert!(matches!(err, myconsole_core::Error::Export { .. }));
}
