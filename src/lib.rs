//! Core library for `scratch_pair`.
//!
//! Allocates collision-free permanent/temporary path pairs in a shared scratch
//! directory and guarantees both paths are removed when the owning
//! [`ScratchFile`] goes out of scope.
//!
//! Layout:
//! - `slot`: name allocation, pair derivation, scoped fixture and cleanup.
//! - `commit`: write-to-temporary then atomic promote.
//! - `config`: defaults, XML file and validation.
//! - `last_seen`: read-only view over node liveness times.

pub mod commit;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod last_seen;
pub mod output;
pub mod shutdown;
pub mod slot;

pub use config::{default_config_path, load_config, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::ScratchError;
pub use slot::{
    AllocatorOptions, CleanupReport, NameAllocator, NameClaimer, PathPair, RandomClaimer,
    RemovalOutcome, ResourceName, ScratchFile, TEMPORARY_SUFFIX,
};
