//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::slot::{AllocatorOptions, DEFAULT_MAX_ATTEMPTS, DEFAULT_PREFIX, DEFAULT_RANDOM_LEN};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for allocating scratch pairs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory shared by all allocations (and possibly other processes)
    pub scratch_dir: PathBuf,
    /// Fixed part of every claimed name
    pub prefix: String,
    /// Number of random characters after the prefix
    pub random_len: usize,
    /// Sanity cap on name proposals per allocation
    pub max_attempts: u32,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
            prefix: DEFAULT_PREFIX.to_string(),
            random_len: DEFAULT_RANDOM_LEN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config with an explicit scratch directory; other fields use defaults.
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            ..Default::default()
        }
    }

    pub fn allocator_options(&self) -> AllocatorOptions {
        AllocatorOptions {
            scratch_dir: self.scratch_dir.clone(),
            prefix: self.prefix.clone(),
            random_len: self.random_len,
            max_attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parsing_is_case_insensitive() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn allocator_options_mirror_config() {
        let mut cfg = Config::new("/scratch");
        cfg.prefix = "p.".into();
        cfg.max_attempts = 7;
        let opts = cfg.allocator_options();
        assert_eq!(opts.scratch_dir, PathBuf::from("/scratch"));
        assert_eq!(opts.prefix, "p.");
        assert_eq!(opts.random_len, DEFAULT_RANDOM_LEN);
        assert_eq!(opts.max_attempts, 7);
    }
}
