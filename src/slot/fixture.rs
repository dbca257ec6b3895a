//! Scoped permanent/temporary path pair with guaranteed cleanup.
//!
//! A `ScratchFile` owns a freshly allocated `PathPair`. Whatever the code
//! using it does (writes the temporary file, promotes it to the permanent
//! path, or fails before touching either), both paths are removed exactly
//! once when the fixture goes out of scope, including during a panic unwind.
//!
//! ```no_run
//! use scratch_pair::{AllocatorOptions, ScratchFile};
//!
//! let slot = ScratchFile::create(&AllocatorOptions::default())?;
//! std::fs::write(slot.temporary_path(), b"data")?;
//! std::fs::rename(slot.temporary_path(), slot.permanent_path())?;
//! // dropped here: permanent removed, temporary reported absent
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;
use tracing::debug;

use crate::errors::ScratchError;
use super::cleanup::{remove_pair, CleanupReport};
use super::name::{AllocatorOptions, NameAllocator, NameClaimer, ResourceName};
use super::pair::PathPair;

#[derive(Debug)]
pub struct ScratchFile {
    name: ResourceName,
    // None once released or kept, so teardown runs at most once.
    pair: Option<PathPair>,
}

impl ScratchFile {
    /// Allocate a fresh pair with a default claimer built from `opts`.
    pub fn create(opts: &AllocatorOptions) -> Result<Self, ScratchError> {
        Self::with_allocator(&mut NameAllocator::new(opts))
    }

    /// Allocate a fresh pair from an existing allocator. No I/O happens after
    /// the name is accepted.
    pub fn with_allocator<C: NameClaimer>(
        alloc: &mut NameAllocator<C>,
    ) -> Result<Self, ScratchError> {
        let name = alloc.allocate()?;
        let pair = PathPair::derive(&name);
        debug!(
            permanent = %pair.permanent_path().display(),
            temporary = %pair.temporary_path().display(),
            "Scratch pair ready"
        );
        Ok(Self { name, pair: Some(pair) })
    }

    pub fn resource_name(&self) -> &ResourceName {
        &self.name
    }

    /// The owned pair. Only None after `release`/`keep`, which consume self.
    pub fn name(&self) -> &PathPair {
        self.pair
            .as_ref()
            .unwrap_or_else(|| unreachable!("pair taken before ScratchFile was consumed"))
    }

    pub fn permanent_path(&self) -> &Path {
        self.name().permanent_path()
    }

    pub fn temporary_path(&self) -> &Path {
        self.name().temporary_path()
    }

    /// Tear down now and return per-path outcomes.
    pub fn release(mut self) -> CleanupReport {
        match self.pair.take() {
            Some(p) => remove_pair(&p),
            None => unreachable!("ScratchFile released twice"),
        }
    }

    /// Disarm teardown; the caller becomes responsible for both paths.
    pub fn keep(mut self) -> PathPair {
        match self.pair.take() {
            Some(p) => p,
            None => unreachable!("ScratchFile kept after release"),
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Some(pair) = self.pair.take() {
            // Failures are logged by remove_pair; never panic here.
            let _ = remove_pair(&pair);
        }
    }
}
