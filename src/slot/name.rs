//! Claim a collision-free base name in the scratch directory.
//! - Uniqueness comes solely from an atomic create-if-absent (O_EXCL) claim.
//! - The claim file only reserves the name; it is deleted before the name is
//!   handed out.
//! - Both derived paths (base and "<base>.create") must be unoccupied, or the
//!   claim is discarded and a new one proposed.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::ScratchError;
use super::pair::temporary_for;

pub const DEFAULT_PREFIX: &str = "scratch_pair.";
pub const DEFAULT_RANDOM_LEN: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// A base path that was unique among live allocations when it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(PathBuf);

impl ResourceName {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final component, e.g. "scratch_pair.Xy3kQ9".
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Atomic "create a new file that did not exist before" primitive.
///
/// Implementations must never return the same path to two callers while the
/// claimed file exists; the allocator trusts nothing else for uniqueness.
pub trait NameClaimer {
    /// Create a fresh, empty file under `dir` and return its path.
    fn claim(&mut self, dir: &Path) -> io::Result<PathBuf>;
}

/// Default claimer: `<prefix><random chars>` created with O_EXCL semantics
/// through tempfile's builder (mkstemp-style template).
#[derive(Debug, Clone)]
pub struct RandomClaimer {
    prefix: String,
    random_len: usize,
}

impl RandomClaimer {
    pub fn new(prefix: impl Into<String>, random_len: usize) -> Self {
        Self {
            prefix: prefix.into(),
            random_len: random_len.max(1),
        }
    }
}

impl Default for RandomClaimer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_RANDOM_LEN)
    }
}

impl NameClaimer for RandomClaimer {
    fn claim(&mut self, dir: &Path) -> io::Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .rand_bytes(self.random_len)
            .tempfile_in(dir)?;
        // Close the handle; the file itself stays until the Reservation drops.
        file.into_temp_path().keep().map_err(|e| e.error)
    }
}

/// Claim file held while its siblings are validated. Deleted on drop.
struct Reservation {
    path: PathBuf,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "Failed to discard name claim");
        }
    }
}

/// Knobs for a NameAllocator.
#[derive(Debug, Clone)]
pub struct AllocatorOptions {
    pub scratch_dir: PathBuf,
    pub prefix: String,
    pub random_len: usize,
    /// Sanity cap on proposals; reaching it is fatal.
    pub max_attempts: u32,
}

impl Default for AllocatorOptions {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
            prefix: DEFAULT_PREFIX.to_string(),
            random_len: DEFAULT_RANDOM_LEN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl AllocatorOptions {
    pub fn in_dir(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            ..Default::default()
        }
    }
}

/// Allocation states: Proposing -> Validating -> {Accepted, Rejected -> Proposing}.
enum Step {
    Proposing,
    Validating(Reservation),
    Rejected(Reservation),
    Accepted(ResourceName),
}

pub struct NameAllocator<C: NameClaimer = RandomClaimer> {
    dir: PathBuf,
    claimer: C,
    max_attempts: u32,
}

impl NameAllocator<RandomClaimer> {
    pub fn new(opts: &AllocatorOptions) -> Self {
        Self::with_claimer(
            &opts.scratch_dir,
            RandomClaimer::new(opts.prefix.clone(), opts.random_len),
            opts.max_attempts,
        )
    }
}

impl<C: NameClaimer> NameAllocator<C> {
    pub fn with_claimer(dir: impl Into<PathBuf>, claimer: C, max_attempts: u32) -> Self {
        Self {
            dir: dir.into(),
            claimer,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.dir
    }

    /// Produce a name whose base path and temporary sibling are both unoccupied.
    pub fn allocate(&mut self) -> Result<ResourceName, ScratchError> {
        let mut attempts: u32 = 0;
        let mut step = Step::Proposing;
        loop {
            step = match step {
                Step::Proposing => {
                    if attempts >= self.max_attempts {
                        return Err(ScratchError::Exhausted {
                            attempts,
                            dir: self.dir.clone(),
                        });
                    }
                    attempts += 1;
                    let path = self.claimer.claim(&self.dir).map_err(|source| {
                        ScratchError::ScratchDir {
                            dir: self.dir.clone(),
                            source,
                        }
                    })?;
                    debug!(path = %path.display(), attempt = attempts, "Claimed candidate name");
                    Step::Validating(Reservation { path })
                }
                Step::Validating(reservation) => {
                    let temporary = temporary_for(&reservation.path);
                    if is_occupied(&temporary)? {
                        warn!(path = %temporary.display(), attempt = attempts, "Temporary sibling occupied; retrying");
                        Step::Rejected(reservation)
                    } else {
                        let base = reservation.path.clone();
                        drop(reservation);
                        if is_occupied(&base)? {
                            warn!(path = %base.display(), attempt = attempts, "Base path reoccupied after discard; retrying");
                            Step::Proposing
                        } else {
                            Step::Accepted(ResourceName(base))
                        }
                    }
                }
                Step::Rejected(reservation) => {
                    drop(reservation);
                    Step::Proposing
                }
                Step::Accepted(name) => {
                    debug!(name = %name, attempts, "Allocated scratch name");
                    return Ok(name);
                }
            };
        }
    }
}

/// Occupied means any entry exists, including a dangling symlink.
fn is_occupied(path: &Path) -> Result<bool, ScratchError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ScratchError::Probe {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs::OpenOptions;
    use tempfile::tempdir;

    /// Claims names from a fixed list, in order, with create_new.
    struct Scripted {
        names: VecDeque<&'static str>,
        claimed: Vec<PathBuf>,
    }

    impl Scripted {
        fn new(names: &[&'static str]) -> Self {
            Self { names: names.iter().copied().collect(), claimed: Vec::new() }
        }
    }

    impl NameClaimer for Scripted {
        fn claim(&mut self, dir: &Path) -> io::Result<PathBuf> {
            let name = self
                .names
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))?;
            let p = dir.join(name);
            OpenOptions::new().write(true).create_new(true).open(&p)?;
            self.claimed.push(p.clone());
            Ok(p)
        }
    }

    #[test]
    fn accepts_first_clean_candidate_and_discards_claim() {
        let td = tempdir().unwrap();
        let mut alloc = NameAllocator::with_claimer(td.path(), Scripted::new(&["a"]), 10);
        let name = alloc.allocate().unwrap();
        assert_eq!(name.as_path(), td.path().join("a"));
        assert_eq!(name.file_name(), "a");
        assert!(!name.as_path().exists());
        assert!(!temporary_for(name.as_path()).exists());
    }

    #[test]
    fn occupied_temporary_sibling_triggers_retry() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.create"), b"stale").unwrap();
        let mut alloc = NameAllocator::with_claimer(td.path(), Scripted::new(&["a", "b"]), 10);
        let name = alloc.allocate().unwrap();
        assert_eq!(name.as_path(), td.path().join("b"));
        // rejected claim was deleted, stale state left alone
        assert!(!td.path().join("a").exists());
        assert!(td.path().join("a.create").exists());
        assert_eq!(alloc.claimer.claimed.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_occupied() {
        let td = tempdir().unwrap();
        std::os::unix::fs::symlink(td.path().join("nowhere"), td.path().join("a.create")).unwrap();
        let mut alloc = NameAllocator::with_claimer(td.path(), Scripted::new(&["a", "b"]), 10);
        assert_eq!(alloc.allocate().unwrap().file_name(), "b");
    }

    #[test]
    fn exhaustion_is_reported_after_cap() {
        let td = tempdir().unwrap();
        for n in ["a", "b", "c"] {
            fs::write(td.path().join(format!("{n}.create")), b"").unwrap();
        }
        let mut alloc =
            NameAllocator::with_claimer(td.path(), Scripted::new(&["a", "b", "c", "d"]), 3);
        match alloc.allocate() {
            Err(ScratchError::Exhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected exhaustion, got {other:?}"),
        }
        for n in ["a", "b", "c"] {
            assert!(!td.path().join(n).exists(), "claim {n} leaked");
        }
    }

    #[test]
    fn missing_scratch_dir_is_fatal() {
        let td = tempdir().unwrap();
        let mut alloc = NameAllocator::new(&AllocatorOptions::in_dir(td.path().join("gone")));
        let err = alloc.allocate().unwrap_err();
        assert!(matches!(err, ScratchError::ScratchDir { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn random_claimer_uses_prefix_and_length() {
        let td = tempdir().unwrap();
        let mut alloc = NameAllocator::new(&AllocatorOptions {
            scratch_dir: td.path().to_path_buf(),
            prefix: "unit.".into(),
            random_len: 8,
            max_attempts: 5,
        });
        let name = alloc.allocate().unwrap();
        let file = name.file_name();
        assert!(file.starts_with("unit."));
        assert_eq!(file.len(), "unit.".len() + 8);
        assert_eq!(name.as_path().parent(), Some(td.path()));
    }
}
