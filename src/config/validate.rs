//! Config validation logic.
//! Verifies the scratch directory exists, is a directory and is writable, and
//! that naming knobs are sane.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::helpers::io_hint;

use super::types::Config;

impl Config {
    /// Validate the scratch directory and naming settings.
    pub fn validate(&self) -> Result<()> {
        let dir = &self.scratch_dir;

        // 1) Scratch dir: must exist and be a directory.
        match fs::metadata(dir) {
            Ok(m) if m.is_dir() => {}
            Ok(_) => {
                error!(path = %dir.display(), "scratch_dir is not a directory");
                bail!("scratch_dir is not a directory: '{}'", dir.display());
            }
            Err(e) => {
                error!(path = %dir.display(), error = %e, "scratch_dir unusable");
                bail!("scratch_dir '{}' is unusable: {}{}", dir.display(), e, io_hint(&e));
            }
        }

        // 2) Writability probe.
        ensure_writable(dir)?;

        // 3) Naming knobs.
        if self.prefix.contains(['/', '\\']) {
            bail!("prefix must not contain path separators: '{}'", self.prefix);
        }
        if self.random_len == 0 {
            bail!("random_len must be at least 1");
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }

        info!(
            "Config validated: scratch_dir='{}' prefix='{}' random_len={} max_attempts={}",
            dir.display(),
            self.prefix,
            self.random_len,
            self.max_attempts
        );
        Ok(())
    }
}

/// Create and remove a small probe file.
fn ensure_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(format!(".scratch_pair_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new().create_new(true).write(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            debug!(path = %dir.display(), "scratch_dir writable");
            Ok(())
        }
        Err(e) => {
            error!(path = %dir.display(), error = %e, "scratch_dir not writable");
            bail!("Cannot write to scratch_dir '{}': {}{}", dir.display(), e, io_hint(&e))
        }
    }
}
