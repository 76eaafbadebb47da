//! Environment facts written at the top of exported reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Categories of environment information, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemFact {
    DeviceName,
    DeviceType,
    Os,
    Memory,
    Display,
    Cpu,
    Gpu,
    Runtime,
    Packages,
}

impl SystemFact {
    pub const ALL: [SystemFact; 9] = [
        SystemFact::DeviceName,
        SystemFact::DeviceType,
        SystemFact::Os,
        SystemFact::Memory,
        SystemFact::Display,
        SystemFact::Cpu,
        SystemFact::Gpu,
        SystemFact::Runtime,
        SystemFact::Packages,
    ];

    /// Label used in the report line `"<Label>: <value>"`
    pub fn label(&self) -> &'static str {
        match self {
            SystemFact::DeviceName => "Device name",
            SystemFact::DeviceType => "Device type",
            SystemFact::Os => "Operating system",
            SystemFact::Memory => "Memory",
            SystemFact::Display => "Display",
            SystemFact::Cpu => "Processor",
            SystemFact::Gpu => "Graphics",
            SystemFact::Runtime => "Runtime",
            SystemFact::Packages => "Packages",
        }
    }
}

/// Source of environment facts, usually backed by the host editor
pub trait EnvironmentFacts {
    /// Value for `fact`, `None` when the host can't tell
    fn fact(&self, fact: SystemFact) -> Option<String>;
}

impl EnvironmentFacts for HashMap<SystemFact, String> {
    fn fact(&self, fact: SystemFact) -> Option<String> {
        self.get(&fact).cloned()
    }
}

/// Best-effort facts about the current process environment.
///
/// Reads what the process can see without platform APIs: environment
/// variables, `std::env::consts` and `/proc/meminfo` on Linux. Graphics
/// hardware is never visible this way, so `Gpu` is always unknown, and
/// `Memory` is unknown off Linux.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalEnvironment;

impl EnvironmentFacts for LocalEnvironment {
    fn fact(&self, fact: SystemFact) -> Option<String> {
        use std::env;

        match fact {
            SystemFact::DeviceName => env::var("HOSTNAME")
                .or_else(|_| env::var("COMPUTERNAME"))
                .ok()
                .filter(|name| !name.is_empty()),
            SystemFact::DeviceType => Some("Desktop".to_string()),
            SystemFact::Os => Some(format!(
                "{} ({})",
                env::consts::OS,
                env::consts::FAMILY
            )),
            SystemFact::Memory => std::fs::read_to_string("/proc/meminfo")
                .ok()
                .and_then(|meminfo| total_memory(&meminfo)),
            SystemFact::Display => display_server(
                env::var("WAYLAND_DISPLAY").ok(),
                env::var("DISPLAY").ok(),
            ),
            SystemFact::Cpu => std::thread::available_parallelism()
                .ok()
                .map(|threads| format!("{} ({} threads)", env::consts::ARCH, threads)),
            SystemFact::Gpu => None,
            SystemFact::Runtime => Some(format!("MyConsole {}", env!("CARGO_PKG_VERSION"))),
            SystemFact::Packages => Some(format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )),
        }
    }
}

/// `MemTotal:  16314132 kB` -> `15931 MB`
fn total_memory(meminfo: &str) -> Option<String> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: u64 = line
        .trim_start_matches("MemTotal:")
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse()
        .ok()?;
    Some(format!("{} MB", kib / 1024))
}

fn display_server(wayland: Option<String>, x11: Option<String>) -> Option<String> {
    match (wayland.filter(|d| !d.is_empty()), x11.filter(|d| !d.is_empty())) {
        (Some(display), _) => Some(format!("Wayland ({})", display)),
        (None, Some(display)) => Some(format!("X11 ({})", display)),
        (None, None) => None,
    }
}
