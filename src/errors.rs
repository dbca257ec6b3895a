//! Typed error definitions for scratch_pair.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::helpers::io_hint;

#[derive(Debug, Error)]
pub enum ScratchError {
    /// No name could be claimed at all; the environment is unusable.
    #[error("Cannot claim a name in scratch directory '{}': {}{}", .dir.display(), .source, io_hint(.source))]
    ScratchDir { dir: PathBuf, source: io::Error },

    /// Occupancy of a derived path could not be determined.
    #[error("Cannot probe '{}': {}{}", .path.display(), .source, io_hint(.source))]
    Probe { path: PathBuf, source: io::Error },

    #[error("Gave up after {attempts} attempts to find a free name in '{}'", .dir.display())]
    Exhausted { attempts: u32, dir: PathBuf },

    /// Removal failed for a reason other than the path being absent.
    #[error("Failed to remove '{}': {}{}", .path.display(), .source, io_hint(.source))]
    Cleanup { path: PathBuf, source: io::Error },
}

impl ScratchError {
    /// Stable code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            ScratchError::ScratchDir { .. } => "E_SCRATCH_DIR",
            ScratchError::Probe { .. } => "E_PROBE",
            ScratchError::Exhausted { .. } => "E_EXHAUSTED",
            ScratchError::Cleanup { .. } => "E_CLEANUP",
        }
    }

    /// True for errors that abort an allocation outright.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScratchError::Cleanup { .. })
    }
}
