//! Config module.
//! Provides configuration types, the default config path, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{apply_config_file, load_config};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCRATCH_PAIR_CONFIG";
