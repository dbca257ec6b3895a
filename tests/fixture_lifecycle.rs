use scratch_pair::commit::{commit, write_temporary};
use scratch_pair::{AllocatorOptions, RemovalOutcome, ScratchFile};
use std::fs;
use std::panic;
use std::path::PathBuf;
use tempfile::tempdir;

fn slot_in(dir: &std::path::Path) -> ScratchFile {
    ScratchFile::create(&AllocatorOptions::in_dir(dir)).unwrap()
}

#[test]
fn untouched_fixture_cleans_up_without_error() {
    let td = tempdir().unwrap();
    let report = slot_in(td.path()).release();
    assert!(report.is_clean());
    assert_eq!(report.temporary.unwrap(), RemovalOutcome::Absent);
    assert_eq!(report.permanent.unwrap(), RemovalOutcome::Absent);
}

#[test]
fn promoted_fixture_removes_permanent() {
    let td = tempdir().unwrap();
    let slot = slot_in(td.path());
    commit(slot.name(), b"durable").unwrap();
    assert!(slot.permanent_path().exists());
    assert!(!slot.temporary_path().exists());

    let permanent = slot.permanent_path().to_path_buf();
    let report = slot.release();
    assert_eq!(report.permanent.unwrap(), RemovalOutcome::Removed);
    assert_eq!(report.temporary.unwrap(), RemovalOutcome::Absent);
    assert!(!permanent.exists());
}

#[test]
fn crash_before_promotion_removes_temporary() {
    let td = tempdir().unwrap();
    let slot = slot_in(td.path());
    write_temporary(slot.name(), b"half written").unwrap();

    let temporary = slot.temporary_path().to_path_buf();
    let report = slot.release();
    assert_eq!(report.temporary.unwrap(), RemovalOutcome::Removed);
    assert_eq!(report.permanent.unwrap(), RemovalOutcome::Absent);
    assert!(!temporary.exists());
}

#[test]
fn drop_cleans_both_paths() {
    let td = tempdir().unwrap();
    let (t, p): (PathBuf, PathBuf);
    {
        let slot = slot_in(td.path());
        fs::write(slot.temporary_path(), b"t").unwrap();
        fs::write(slot.permanent_path(), b"p").unwrap();
        t = slot.temporary_path().to_path_buf();
        p = slot.permanent_path().to_path_buf();
    }
    assert!(!t.exists());
    assert!(!p.exists());
}

#[test]
fn panic_unwind_still_cleans_up() {
    let td = tempdir().unwrap();
    let dir = td.path().to_path_buf();
    let result = panic::catch_unwind(move || {
        let slot = slot_in(&dir);
        fs::write(slot.temporary_path(), b"partial").unwrap();
        panic!("engine failed mid-write");
    });
    assert!(result.is_err());
    assert_eq!(fs::read_dir(td.path()).unwrap().count(), 0);
}
