//! MyConsole - headless console replay
//!
//! This is the binary entry point. All logic lives in the library.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use myconsole::{run_replay, ReplayOptions};
use myconsole_app::config::init_config_dir;
use myconsole_app::AboutInfo;
use myconsole_core::SeverityGroup;

/// MyConsole - log console for game editors
#[derive(Parser, Debug)]
#[command(name = "myconsole")]
#[command(about = "Replay editor log events through the MyConsole console", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay NDJSON host events and print the visible rows
    Replay {
        /// Event file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Project root holding .myconsole/config.toml
        #[arg(long, value_name = "DIR", default_value = ".")]
        project: PathBuf,

        /// Show one row per distinct log with its count
        #[arg(long)]
        collapse: bool,

        /// Only show logs whose message contains TEXT
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Hide a severity group (info, warning, error); repeatable
        #[arg(long, value_name = "GROUP")]
        hide: Vec<SeverityGroup>,

        /// Write a log report to FILE after the replay
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Print rows as NDJSON
        #[arg(long)]
        json: bool,
    },

    /// Create .myconsole/config.toml with default settings
    Init {
        #[arg(value_name = "DIR", default_value = ".")]
        project: PathBuf,
    },

    /// Show version and credits
    About,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = myconsole_core::logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    match args.command {
        Command::Replay {
            input,
            project,
            collapse,
            search,
            hide,
            export,
            json,
        } => {
            let options = ReplayOptions {
                project,
                collapse: collapse.then_some(true),
                search,
                hide,
                export,
                json,
            };

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let summary = if input.as_os_str() == "-" {
                run_replay(&options, io::stdin().lock(), &mut out)?
            } else {
                run_replay(&options, BufReader::new(File::open(&input)?), &mut out)?
            };

            if summary.skipped > 0 {
                eprintln!("Skipped {} malformed line(s)", summary.skipped);
            }
            if summary.paused {
                eprintln!("Playback was paused on an error");
            }
            if let Some(path) = &options.export {
                eprintln!("Exported {} log(s) to {}", summary.logs, path.display());
            }
        }
        Command::Init { project } => {
            init_config_dir(&project)?;
            eprintln!(
                "Wrote {}",
                myconsole_app::config::config_path(&project).display()
            );
        }
        Command::About => {
            for line in AboutInfo::current().lines() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
