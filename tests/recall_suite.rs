//! Email recall across wizard sessions.

use leadform_core::recall::RecallStore;

#[test]
fn recall_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recall.json");

    RecallStore::with_path(path.clone()).remember_email("dana@example.com");

    // A later session opens its own store over the same file.
    let next_session = RecallStore::with_path(path);
    assert_eq!(
        next_session.last_email().as_deref(),
        Some("dana@example.com")
    );
}

#[test]
fn latest_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recall.json");

    RecallStore::with_path(path.clone()).remember_email("first@example.com");
    RecallStore::with_path(path.clone()).remember_email("second@example.com");

    assert_eq!(
        RecallStore::with_path(path).last_email().as_deref(),
        Some("second@example.com")
    );
}
