//! Headless replay runner - feeds host events into a console and prints the result
//!
//! Events are applied in file order on the calling thread. Log events go
//! through the console's intake handle exactly like editor callbacks do.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use myconsole_app::config::load_settings;
use myconsole_app::{Console, EditorHost, LocalEnvironment};
use myconsole_core::prelude::*;
use myconsole_core::SeverityGroup;

use super::{format_row, HostEvent, ReplayHost, RowOutput};

/// How a replay is set up and reported
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Project root holding `.myconsole/config.toml`
    pub project: PathBuf,
    /// Override the configured collapse setting
    pub collapse: Option<bool>,
    pub search: Option<String>,
    /// Toolbar groups to hide
    pub hide: Vec<SeverityGroup>,
    /// Write a report here after the replay
    pub export: Option<PathBuf>,
    /// Print rows as NDJSON instead of text
    pub json: bool,
}

/// What happened during a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events applied
    pub events: usize,
    /// Lines that could not be parsed
    pub skipped: usize,
    /// Logs stored when the replay ended
    pub logs: usize,
    /// Rows printed
    pub rows: usize,
    /// Error pause stopped playback at least once
    pub paused: bool,
}

/// Replay NDJSON host events from `input`, writing visible rows to `out`
pub fn run_replay<R: BufRead, W: Write>(
    options: &ReplayOptions,
    input: R,
    out: &mut W,
) -> Result<ReplaySummary> {
    info!("Replaying host events for {}", options.project.display());

    let mut settings = load_settings(&options.project);
    if let Some(collapse) = options.collapse {
        settings.view.collapse = collapse;
    }

    let host = Arc::new(ReplayHost::new(&options.project));
    let mut console = Console::new(settings, Arc::clone(&host) as Arc<dyn EditorHost>);
    let intake = console.intake();
    let mut summary = ReplaySummary::default();

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let event = match HostEvent::parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping line {}: {}", line_no + 1, e);
                summary.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        match event {
            HostEvent::Log {
                message,
                stack_trace,
                severity,
                at,
            } => {
                match at {
                    Some(at) => intake.ingest_at(&message, &stack_trace, severity, at),
                    None => intake.on_log_received(&message, &stack_trace, severity),
                };
            }
            HostEvent::ExitedPlayMode => host.set_playing(false),
            HostEvent::Clear => console.clear(),
            HostEvent::Focus => console.on_focus(),
            other => {
                if let Some(lifecycle) = other.lifecycle() {
                    if lifecycle == myconsole_app::LifecycleEvent::EnteredPlayMode {
                        host.set_playing(true);
                    }
                    console.on_lifecycle(lifecycle);
                }
            }
        }
        summary.events += 1;
        summary.paused |= host.was_paused();
    }

    console.on_focus();
    for &group in &options.hide {
        console.set_group_visible(group, false);
    }
    if let Some(search) = &options.search {
        console.set_search(search.clone());
    }

    let rows = console.visible_rows();
    for row in &rows {
        if options.json {
            writeln!(out, "{}", serde_json::to_string(&RowOutput::from(row))?)?;
        } else {
            writeln!(out, "{}", format_row(row))?;
        }
    }
    out.flush()?;

    summary.logs = console.len();
    summary.rows = rows.len();

    if let Some(path) = &options.export {
        export_report(&console, path)?;
    }

    info!(
        "Replay finished: {} events, {} skipped, {} logs",
        summary.events, summary.skipped, summary.logs
    );
    Ok(summary)
}

fn export_report(console: &Console, path: &Path) -> Result<()> {
    if !console.can_export() {
        warn!("No logs to export, writing an empty report");
    }
    console
        .export(path, &LocalEnvironment)
        .with_context(|| format!("Export to {} failed", path.display()))
}
