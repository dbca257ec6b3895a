//! Absence-tolerant removal of pair members.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error};

use crate::errors::ScratchError;
use super::pair::PathPair;

/// Terminal state of a single successful removal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Something occupied the path and it was removed.
    Removed,
    /// Nothing was there.
    Absent,
}

/// Result of tearing down both members of a pair.
#[derive(Debug)]
pub struct CleanupReport {
    pub temporary: Result<RemovalOutcome, ScratchError>,
    pub permanent: Result<RemovalOutcome, ScratchError>,
}

impl CleanupReport {
    /// True when both removals ended in Removed or Absent.
    pub fn is_clean(&self) -> bool {
        self.temporary.is_ok() && self.permanent.is_ok()
    }

    /// Failed removals, temporary first.
    pub fn failures(&self) -> impl Iterator<Item = &ScratchError> {
        [&self.temporary, &self.permanent]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
    }
}

/// Remove the entry at `path`; NotFound counts as success.
pub fn remove_if_present(path: &Path) -> Result<RemovalOutcome, ScratchError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed scratch path");
            Ok(RemovalOutcome::Removed)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RemovalOutcome::Absent),
        Err(source) => Err(ScratchError::Cleanup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Remove both members of `pair`. The two attempts are independent: a failure
/// on the temporary path never skips the permanent one.
pub fn remove_pair(pair: &PathPair) -> CleanupReport {
    let report = CleanupReport {
        temporary: remove_if_present(pair.temporary_path()),
        permanent: remove_if_present(pair.permanent_path()),
    };
    for e in report.failures() {
        error!(code = e.code(), error = %e, "Scratch cleanup failed");
    }
    report
}
