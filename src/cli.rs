//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config file values, which override built-in defaults.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use scratch_pair::{Config, LogLevel};

/// Allocate collision-free permanent/temporary scratch path pairs.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Allocate collision-free permanent/temporary scratch path pairs"
)]
pub struct Args {
    /// Directory to allocate in (defaults to the system temp dir).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub scratch_dir: Option<PathBuf>,

    /// Fixed name prefix; random characters are appended.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Give up after this many name proposals per pair.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Number of pairs to allocate.
    #[arg(long, short = 'n', default_value_t = 1, value_name = "N")]
    pub count: usize,

    /// Keep the pairs allocated until Ctrl-C, then clean up and report.
    #[arg(long, conflicts_with = "keep")]
    pub hold: bool,

    /// Do not remove the pairs on exit; the caller owns the paths.
    #[arg(long)]
    pub keep: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location used by scratch_pair and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.scratch_dir {
            cfg.scratch_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            cfg.prefix = prefix.clone();
        }
        if let Some(n) = self.max_attempts {
            cfg.max_attempts = n;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
