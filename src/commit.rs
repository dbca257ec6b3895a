//! Minimal crash-safe write/promote over a PathPair.
//! - Data is written and fsynced under the temporary path.
//! - Promotion is an atomic rename onto the permanent path.
//! - On Unix, best-effort fsync of the parent directory after rename.
//!
//! After a crash at most one of the two paths holds data.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::slot::PathPair;

/// Create/truncate the temporary path, write `bytes` and fsync.
pub fn write_temporary(pair: &PathPair, bytes: &[u8]) -> Result<()> {
    let tmp = pair.temporary_path();
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)
        .with_context(|| format!("open temporary '{}'", tmp.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write temporary '{}'", tmp.display()))?;
    f.sync_all()
        .with_context(|| format!("fsync temporary '{}'", tmp.display()))?;
    Ok(())
}

/// Atomically move the temporary file onto the permanent path.
pub fn promote(pair: &PathPair) -> Result<()> {
    let (src, dst) = (pair.temporary_path(), pair.permanent_path());
    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = fsync_dir(parent);
    }

    info!(permanent = %dst.display(), "Promoted temporary file");
    Ok(())
}

/// Write then promote.
pub fn commit(pair: &PathPair, bytes: &[u8]) -> Result<()> {
    write_temporary(pair, bytes)?;
    promote(pair)
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn commit_leaves_only_permanent() {
        let td = tempdir().unwrap();
        let pair = PathPair::manual(td.path().join("p"), td.path().join("p.create"));
        commit(&pair, b"payload").unwrap();
        assert_eq!(fs::read(pair.permanent_path()).unwrap(), b"payload");
        assert!(!pair.temporary_path().exists());
    }

    #[test]
    fn promote_without_temporary_fails_with_context() {
        let td = tempdir().unwrap();
        let pair = PathPair::manual(td.path().join("p"), td.path().join("p.create"));
        let err = promote(&pair).unwrap_err();
        assert!(format!("{err:#}").contains("atomic rename"));
    }
}
