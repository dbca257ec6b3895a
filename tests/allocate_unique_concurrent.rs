use scratch_pair::{AllocatorOptions, ScratchFile, TEMPORARY_SUFFIX};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn concurrent_allocations_get_distinct_names() {
    const N: usize = 32;
    let td = tempdir().unwrap();
    let opts = AllocatorOptions::in_dir(td.path());
    let barrier = Arc::new(Barrier::new(N));

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let opts = opts.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ScratchFile::create(&opts).expect("allocation should succeed")
            })
        })
        .collect();

    // Keep every fixture alive while comparing so the names are concurrently live.
    let slots: Vec<ScratchFile> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let names: HashSet<_> = slots.iter().map(|s| s.permanent_path().to_path_buf()).collect();
    assert_eq!(names.len(), N);

    for slot in &slots {
        // nothing occupies either path at hand-out
        assert!(!slot.permanent_path().exists());
        assert!(!slot.temporary_path().exists());
        // temporary is always permanent + suffix
        let mut expected = slot.permanent_path().as_os_str().to_os_string();
        expected.push(TEMPORARY_SUFFIX);
        assert_eq!(slot.temporary_path().as_os_str(), expected);
        assert_eq!(slot.temporary_path(), slot.name().temporary_path());
    }

    drop(slots);
    assert_eq!(std::fs::read_dir(td.path()).unwrap().count(), 0, "claims or pairs leaked");
}
