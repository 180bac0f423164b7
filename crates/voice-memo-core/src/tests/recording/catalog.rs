use crate::{
    RecordingCatalog, RecordingSession, StorageRef,
    tests::mocks::{MockCaptureEngine, PermissionAnswer, requested_gate},
};

/// WHAT: Recordings are listed in completion order
/// WHY: Labels "Recording N" depend on insertion order
#[test]
#[allow(clippy::unwrap_used)]
fn given_several_captures_when_listing_then_insertion_order_kept() {
    // Given: Three completed captures appended as they finish
    let gate = requested_gate(PermissionAnswer::Grant);
    let (engine, _) = MockCaptureEngine::new();
    let mut session = RecordingSession::new(Box::new(engine));
    let mut catalog = RecordingCatalog::new();
    let mut produced = Vec::new();

    for _ in 0..3 {
        session.start(&gate).unwrap();
        let descriptor = session.stop().unwrap();
        produced.push(descriptor.clone());
        catalog.append(descriptor);
    }

    // When: Listing the catalog
    let listed = catalog.list();

    // Then: Exactly the produced descriptors, oldest first
    assert_eq!(listed, produced.as_slice());
    let storages: Vec<&str> = catalog.iter().map(|d| d.storage().as_str()).collect();
    assert_eq!(
        storages,
        ["mock://capture-1", "mock://capture-2", "mock://capture-3"]
    );
    assert!(listed[0].created_at() <= listed[2].created_at());
}

/// WHAT: Listing twice without appending yields the same sequence
/// WHY: Enumeration must be restartable and side-effect free
#[test]
#[allow(clippy::unwrap_used)]
fn given_unchanged_catalog_when_listing_twice_then_identical() {
    // Given: A catalog with two recordings
    let gate = requested_gate(PermissionAnswer::Grant);
    let (engine, _) = MockCaptureEngine::new();
    let mut session = RecordingSession::new(Box::new(engine));
    let mut catalog = RecordingCatalog::new();
    for _ in 0..2 {
        session.start(&gate).unwrap();
        catalog.append(session.stop().unwrap());
    }

    // When: Listing and iterating twice
    let first: Vec<_> = catalog.list().to_vec();
    let second: Vec<_> = (&catalog).into_iter().cloned().collect();

    // Then: Both passes agree
    assert_eq!(first, second);
    assert_eq!(catalog.len(), 2);
}

/// WHAT: An empty catalog lists nothing and has no entries by index
/// WHY: The presentation layer renders an empty list on first launch
#[test]
fn given_empty_catalog_when_reading_then_nothing_listed() {
    // Given: A new catalog
    let catalog = RecordingCatalog::new();

    // When / Then: Nothing to list or index
    assert!(catalog.is_empty());
    assert!(catalog.list().is_empty());
    assert!(catalog.get(0).is_none());
}

/// WHAT: Blank storage references cannot be constructed
/// WHY: A catalog entry must always point at resolvable storage
#[test]
fn given_blank_reference_when_creating_storage_ref_then_rejected() {
    // Given / When: Blank and non-blank references
    let empty = StorageRef::new("");
    let whitespace = StorageRef::new("   ");
    let file = StorageRef::from_path("/tmp/recording.wav");

    // Then: Only the real reference survives
    assert!(empty.is_none());
    assert!(whitespace.is_none());
    assert!(matches!(file, Some(ref s) if s.as_str() == "/tmp/recording.wav"));
}
