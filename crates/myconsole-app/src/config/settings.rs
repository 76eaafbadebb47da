//! Settings parser for .myconsole/config.toml

use std::path::{Path, PathBuf};

use myconsole_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const MYCONSOLE_DIR: &str = ".myconsole";

/// Path of the settings file for a project
pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(MYCONSOLE_DIR).join(CONFIG_FILENAME)
}

/// Load settings from .myconsole/config.toml
///
/// A missing, unreadable or malformed file yields the defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = config_path(project_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match read_settings(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            if let Err(e) = myconsole_core::TimeFormat::new(&settings.general.log_time_format) {
                warn!("{} in {:?}, the default will be used", e, config_path);
            }
            if settings.trace.root_marker.is_empty() {
                let e = Error::config_invalid("trace.root_marker is empty");
                warn!("{} in {:?}, source links are disabled", e, config_path);
            }
            settings
        }
        Err(e) => {
            warn!("Failed to load {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Read and parse a settings file
pub fn read_settings(config_path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Create a commented default config file in .myconsole/
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let dir = project_path.join(MYCONSOLE_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .myconsole dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# MyConsole Configuration

[general]
title = "MyConsole"
show_log_time = true
log_time_format = "[%H:%M:%S]"   # strftime pattern

[clear]
on_play = true                   # Clear when entering play mode
on_build = false                 # Clear after a player build
on_recompile = false             # Clear after scripts reload
include_host_console = true      # Also clear the editor's own console

[view]
collapse = false
error_pause = false              # Pause play mode on errors and exceptions

[trace]
root_marker = "Assets"
extensions = [".cs"]

[export]
facts = ["device_name", "device_type", "os", "memory", "display", "cpu", "gpu", "runtime", "packages"]
separator = "----------------------------"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created {:?}", config_path);
    }

    Ok(())
}

/// Save settings to .myconsole/config.toml
///
/// Uses atomic write (temp file + rename) to prevent corruption.
pub fn save_settings(project_path: &Path, settings: &Settings) -> Result<()> {
    let dir = project_path.join(MYCONSOLE_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .myconsole dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    let temp_path = dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("# MyConsole Configuration\n\n{}", content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}
