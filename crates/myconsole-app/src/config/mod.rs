//! Configuration file parsing for MyConsole
//!
//! Settings live in `.myconsole/config.toml` under the project root.

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, read_settings, save_settings};
pub use types::*;
