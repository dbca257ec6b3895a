//! Permanent/temporary path pair derivation.
//! The temporary path is always the permanent path plus TEMPORARY_SUFFIX, so
//! either one can be recovered from the other.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::name::ResourceName;

/// Suffix appended to the permanent path while an artifact is being written.
pub const TEMPORARY_SUFFIX: &str = ".create";

/// Temporary sibling of `permanent`: "<permanent>.create".
pub fn temporary_for(permanent: &Path) -> PathBuf {
    let mut s: OsString = permanent.as_os_str().to_os_string();
    s.push(TEMPORARY_SUFFIX);
    PathBuf::from(s)
}

/// Inverse of `temporary_for`. Returns None if `temporary` lacks the suffix.
pub fn permanent_for(temporary: &Path) -> Option<PathBuf> {
    let name = temporary.file_name()?.to_str()?;
    let stem = name.strip_suffix(TEMPORARY_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(temporary.with_file_name(stem))
}

/// The two locations one logical artifact may occupy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPair {
    permanent: PathBuf,
    temporary: PathBuf,
}

impl PathPair {
    /// Derive the pair from an allocated name.
    pub fn derive(name: &ResourceName) -> Self {
        let permanent = name.as_path().to_path_buf();
        let temporary = temporary_for(&permanent);
        Self { permanent, temporary }
    }

    /// Build a pair from two explicit paths (e.g. a storage engine reopening
    /// a file it already knows about). No derivation is applied.
    pub fn manual(permanent: impl Into<PathBuf>, temporary: impl Into<PathBuf>) -> Self {
        Self {
            permanent: permanent.into(),
            temporary: temporary.into(),
        }
    }

    pub fn permanent_path(&self) -> &Path {
        &self.permanent
    }

    pub fn temporary_path(&self) -> &Path {
        &self.temporary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporary_is_permanent_plus_suffix() {
        let p = Path::new("/tmp/scratch_pair.ab12CD");
        assert_eq!(temporary_for(p), PathBuf::from("/tmp/scratch_pair.ab12CD.create"));
        // stable across calls
        assert_eq!(temporary_for(p), temporary_for(p));
    }

    #[test]
    fn permanent_recovered_from_temporary() {
        let t = Path::new("/tmp/x.create");
        assert_eq!(permanent_for(t), Some(PathBuf::from("/tmp/x")));
        assert_eq!(permanent_for(Path::new("/tmp/x.tmp")), None);
        assert_eq!(permanent_for(Path::new("/tmp/.create")), None);
    }

    #[test]
    fn manual_keeps_paths_verbatim() {
        let pair = PathPair::manual("/a/perm", "/b/other");
        assert_eq!(pair.permanent_path(), Path::new("/a/perm"));
        assert_eq!(pair.temporary_path(), Path::new("/b/other"));
    }
}
