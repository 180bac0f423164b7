use crate::{
    PlatformError,
    platform::{
        AudioMode, CaptureEngine, CaptureHandle, CpalCaptureEngine, QualityPreset,
        cpal_capture::{CpalCaptureHandle, to_pcm16},
    },
};

use std::{path::Path, time::Duration};

use hound::{WavSpec, WavWriter};

#[allow(clippy::unwrap_used)]
fn stereo_handle(path: &Path, samples: &[i16]) -> CpalCaptureHandle {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    CpalCaptureHandle::from_writer(writer, path.to_path_buf())
}

/// WHAT: Float samples are clamped and scaled to 16-bit PCM
/// WHY: Out-of-range input must not wrap around
#[test]
fn given_float_samples_when_converting_then_clamped_to_pcm16() {
    // Given / When / Then: Silence, full scale and overdriven samples
    assert_eq!(to_pcm16(0.0), 0);
    assert_eq!(to_pcm16(1.0), i16::MAX);
    assert_eq!(to_pcm16(-1.0), -i16::MAX);
    assert_eq!(to_pcm16(3.5), i16::MAX);
    assert_eq!(to_pcm16(-3.5), -i16::MAX);
}

/// WHAT: Capture is refused until a recording mode is configured
/// WHY: The audio session must allow recording before the microphone opens
#[test]
#[allow(clippy::unwrap_used)]
fn given_unconfigured_engine_when_beginning_capture_then_device_error() {
    // Given: An engine that was never configured
    let dir = tempfile::tempdir().unwrap();
    let mut engine = CpalCaptureEngine::new(dir.path());

    // When: Beginning a capture
    let result = engine.begin_capture(QualityPreset::HIGH_QUALITY);

    // Then: Refused before any file is created
    assert!(matches!(result, Err(PlatformError::DeviceError { .. })));
    assert!(
        std::fs::read_dir(dir.path())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    );
}

/// WHAT: A mode that forbids recording refuses capture
/// WHY: Playback-only sessions must never open the microphone
#[test]
#[allow(clippy::unwrap_used)]
fn given_playback_only_mode_when_beginning_capture_then_device_error() {
    // Given: An engine configured without recording
    let dir = tempfile::tempdir().unwrap();
    let mut engine = CpalCaptureEngine::new(dir.path());
    let playback_only = AudioMode {
        allows_recording: false,
        plays_in_silent_mode: true,
    };
    assert!(engine.configure(playback_only).is_ok());

    // When: Beginning a capture
    let result = engine.begin_capture(QualityPreset::HIGH_QUALITY);

    // Then: Refused
    assert!(matches!(result, Err(PlatformError::DeviceError { .. })));
}

/// WHAT: Bit depths other than 16 are rejected
/// WHY: Samples are only ever written as 16-bit PCM
#[test]
#[allow(clippy::unwrap_used)]
fn given_24_bit_preset_when_beginning_capture_then_storage_error() {
    // Given: A configured engine and a 24-bit preset
    let dir = tempfile::tempdir().unwrap();
    let mut engine = CpalCaptureEngine::new(dir.path());
    assert!(engine.configure(AudioMode::CAPTURE_WITH_PLAYBACK).is_ok());
    let preset = QualityPreset {
        bits_per_sample: 24,
        ..QualityPreset::HIGH_QUALITY
    };

    // When: Beginning a capture
    let result = engine.begin_capture(preset);

    // Then: Rejected as a storage problem
    assert!(matches!(result, Err(PlatformError::StorageError { .. })));
}

/// WHAT: A real capture yields a WAV file under the recordings directory
/// WHY: End-to-end check of the CPAL adapter
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_microphone_when_capturing_briefly_then_wav_written() {
    // Given: A configured engine over a temp directory
    let dir = tempfile::tempdir().unwrap();
    let mut engine = CpalCaptureEngine::new(dir.path());
    engine.configure(AudioMode::CAPTURE_WITH_PLAYBACK).unwrap();

    // When: Capturing for half a second
    let handle = engine.begin_capture(QualityPreset::HIGH_QUALITY).unwrap();
    std::thread::sleep(Duration::from_millis(500));
    let storage = handle.finalize().unwrap();

    // Then: A readable WAV exists
    let path = storage.unwrap().to_path();
    assert!(path.starts_with(dir.path()));
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert!(reader.len() > 0);
}

/// WHAT: A capture with no samples finalizes to None and removes its file
/// WHY: Empty captures surface as NoCaptureProduced and must not leave files behind
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_capture_when_finalizing_then_none_and_file_removed() {
    // Given: A handle whose writer never received a sample
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    let handle = Box::new(stereo_handle(&path, &[]));

    // When: Finalizing
    let result = handle.finalize();

    // Then: Nothing stored, file gone
    assert!(matches!(result, Ok(None)));
    assert!(!path.exists());
}

/// WHAT: A capture with a whole frame finalizes to its file, which survives the drop
/// WHY: Release runs again on drop and must not disturb a finalized recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_one_frame_when_finalizing_then_storage_kept_after_drop() {
    // Given: A stereo handle holding one full frame
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.wav");
    let handle = Box::new(stereo_handle(&path, &[100, -100]));

    // When: Finalizing (the box is dropped on return)
    let storage = handle.finalize().unwrap();

    // Then: The reference points at a readable, intact file
    let storage = storage.unwrap();
    assert_eq!(storage.to_path(), path);
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 2);
}

/// WHAT: A handle dropped without finalize still closes its file
/// WHY: An abandoned capture must leave a valid WAV, not a truncated one
#[test]
#[allow(clippy::unwrap_used)]
fn given_unfinalized_capture_when_dropped_then_file_finalized() {
    // Given: A stereo handle holding two frames
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.wav");
    let handle = stereo_handle(&path, &[1, 2, 3, 4]);

    // When: Dropping it
    drop(handle);

    // Then: The header is complete
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 4);
}

/// WHAT: A capture ending mid-frame fails to finalize and its file is removed
/// WHY: A WAV whose header cannot be written must not be left on disk
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_frame_when_finalizing_then_storage_error_and_file_removed() {
    // Given: A stereo handle holding half a frame
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.wav");
    let handle = Box::new(stereo_handle(&path, &[7]));

    // When: Finalizing
    let result = handle.finalize();

    // Then: Storage error, no file left
    assert!(matches!(result, Err(PlatformError::StorageError { .. })));
    assert!(!path.exists());
}
