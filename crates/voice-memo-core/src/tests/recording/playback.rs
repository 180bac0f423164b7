use crate::{
    PlayError, PlaybackDispatcher, StorageRef, tests::mocks::MockPlaybackEngine,
};

use std::sync::atomic::Ordering;

#[allow(clippy::unwrap_used)]
fn storage() -> StorageRef {
    StorageRef::new("mock://capture-1").unwrap()
}

/// WHAT: Playing opens a resource and starts it
/// WHY: Tapping a recording plays it
#[test]
fn given_valid_recording_when_playing_then_playback_started() {
    // Given: A dispatcher over a working engine
    let (engine, counters) = MockPlaybackEngine::new();
    let dispatcher = PlaybackDispatcher::new(Box::new(engine));

    // When: Playing a recording
    let result = dispatcher.play(&storage());

    // Then: One resource opened and started
    assert!(result.is_ok());
    assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counters.started.load(Ordering::SeqCst), 1);
}

/// WHAT: Unopenable recordings fail with PlaybackEngineFailed
/// WHY: Corrupt or missing audio is reported, not fatal
#[test]
fn given_unopenable_recording_when_playing_then_playback_engine_failed() {
    // Given: An engine that cannot open the recording
    let (engine, counters) = MockPlaybackEngine::new();
    let dispatcher = PlaybackDispatcher::new(Box::new(engine.failing_open()));

    // When: Playing
    let result = dispatcher.play(&storage());

    // Then: Reported and nothing started
    assert!(matches!(result, Err(PlayError::PlaybackEngineFailed { .. })));
    assert_eq!(counters.started.load(Ordering::SeqCst), 0);
}

/// WHAT: A resource that fails to start is reported as PlaybackEngineFailed
/// WHY: Output device failures surface the same way as decode failures
#[test]
fn given_failing_output_when_playing_then_playback_engine_failed() {
    // Given: An engine whose resources fail to start
    let (engine, counters) = MockPlaybackEngine::new();
    let dispatcher = PlaybackDispatcher::new(Box::new(engine.failing_play()));

    // When: Playing
    let result = dispatcher.play(&storage());

    // Then: Opened but not started
    assert!(matches!(result, Err(PlayError::PlaybackEngineFailed { .. })));
    assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counters.started.load(Ordering::SeqCst), 0);
}

/// WHAT: Each play acquires its own resource
/// WHY: Overlapping playback needs no shared state
#[test]
fn given_repeated_plays_when_playing_then_independent_resources() {
    // Given: A dispatcher over a working engine
    let (engine, counters) = MockPlaybackEngine::new();
    let dispatcher = PlaybackDispatcher::new(Box::new(engine));
    let recording = storage();

    // When: Playing the same recording three times
    for _ in 0..3 {
        assert!(dispatcher.play(&recording).is_ok());
    }

    // Then: Three resources opened and started
    assert_eq!(counters.opened.load(Ordering::SeqCst), 3);
    assert_eq!(counters.started.load(Ordering::SeqCst), 3);
}
