//! Plain-text log export.
//!
//! A report is a header, an optional SYSTEM INFORMATION block and the full
//! record list in arrival order. Output depends only on its inputs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use myconsole_core::prelude::*;
use myconsole_core::LogRecord;

use crate::config::ExportSettings;
use crate::environment::{EnvironmentFacts, SystemFact};

const REPORT_TITLE: &str = "MyConsole log export";
const UNKNOWN_FACT: &str = "Unknown";

/// Writes log reports using the configured facts and separator
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    settings: ExportSettings,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Write a report for `logs` to `path`, replacing any existing file.
    ///
    /// A partially written file is left as is on failure.
    pub fn export(&self, path: &Path, env: &dyn EnvironmentFacts, logs: &[LogRecord]) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::export(path, e))?;
        let mut writer = BufWriter::new(file);

        self.write_report(&mut writer, env, logs)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::export(path, e))?;

        info!("Exported {} logs to {:?}", logs.len(), path);
        Ok(())
    }

    /// Write a report to any sink
    pub fn write_report<W: Write>(
        &self,
        out: &mut W,
        env: &dyn EnvironmentFacts,
        logs: &[LogRecord],
    ) -> std::io::Result<()> {
        writeln!(out, "{}", REPORT_TITLE)?;
        writeln!(out)?;

        if !self.settings.facts.is_empty() {
            writeln!(out, "SYSTEM INFORMATION")?;
            // BTreeSet iteration follows SystemFact declaration order
            for &fact in &self.settings.facts {
                write_fact(out, env, fact)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "LOG LIST")?;
        writeln!(out)?;

        for (i, log) in logs.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{}", self.settings.separator)?;
            }
            writeln!(
                out,
                "Time: {} | Log type: {}",
                log.captured_at(),
                log.severity()
            )?;
            writeln!(out, "Message: {}", log.message())?;
            writeln!(out, "Stack trace: {}", log.stack_trace())?;
        }
        writeln!(out)?;

        Ok(())
    }
}

fn write_fact<W: Write>(
    out: &mut W,
    env: &dyn EnvironmentFacts,
    fact: SystemFact,
) -> std::io::Result<()> {
    let value = env.fact(fact);
    writeln!(
        out,
        "{}: {}",
        fact.label(),
        value.as_deref().unwrap_or(UNKNOWN_FACT)
    )
}
