//! I/O helper utilities.
//!
//! Provides short, actionable hints for io::Error values so error messages
//! tell the operator what to look at (permissions, full disk, fd limits).
//!
//! Usage:
//!   format!("remove '{}': {}{}", path.display(), e, io_hint(&e))

use std::io;

#[cfg(unix)]
use libc;

/// Return a platform-aware hint for `e`, or "" when nothing useful applies.
/// The hint starts with " — " so it can be appended directly to a message.
pub fn io_hint(e: &io::Error) -> &'static str {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    return " — permission denied; check ownership and write permissions.";
                }
                libc::ENOENT => return " — path not found; verify the scratch directory exists.",
                libc::ENOTDIR => return " — a path component is not a directory.",
                libc::EISDIR => return " — is a directory; only plain files are removed.",
                libc::ENOSPC => return " — insufficient space on device.",
                libc::EROFS => return " — read-only filesystem; cannot write here.",
                libc::ENAMETOOLONG => {
                    return " — filename or path too long; shorten the prefix or scratch dir.";
                }
                libc::EMFILE => {
                    return " — process file descriptor limit reached; close files or raise limits.";
                }
                libc::ENFILE => return " — system-wide file table overflow; reduce open files.",
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => return " — access denied; check permissions.", // ERROR_ACCESS_DENIED
                32 => return " — sharing violation; file is in use.", // ERROR_SHARING_VIOLATION
                2 | 3 => return " — path not found; verify it exists.",
                112 => return " — insufficient disk space.", // ERROR_DISK_FULL
                19 => return " — write protected / read-only media.", // ERROR_WRITE_PROTECT
                206 => return " — filename or path too long (MAX_PATH exceeded).",
                _ => {}
            }
        }
        let _ = code;
    }

    // Fallback to Kind-based hints
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            " — permission denied; check ownership and write permissions."
        }
        io::ErrorKind::NotFound => " — path not found; verify it exists.",
        io::ErrorKind::AlreadyExists => " — already exists; remove it or choose another prefix.",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback_for_synthetic_errors() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(io_hint(&e).contains("permission denied"));
        let e = io::Error::other("weird");
        assert_eq!(io_hint(&e), "");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_codes_map_to_hints() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        assert!(io_hint(&e).contains("insufficient space"));
    }
}
