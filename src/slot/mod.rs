//! Scratch slots: name allocation, pair derivation and cleanup.

mod cleanup;
mod fixture;
mod name;
mod pair;

pub use cleanup::{remove_if_present, remove_pair, CleanupReport, RemovalOutcome};
pub use fixture::ScratchFile;
pub use name::{
    AllocatorOptions, NameAllocator, NameClaimer, RandomClaimer, ResourceName,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PREFIX, DEFAULT_RANDOM_LEN,
};
pub use pair::{permanent_for, temporary_for, PathPair, TEMPORARY_SUFFIX};
