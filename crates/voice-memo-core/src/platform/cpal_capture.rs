use crate::{
    PlatformError, PlatformResult, StorageRef,
    platform::{AudioMode, CaptureEngine, CaptureHandle, QualityPreset},
};

use std::{
    fs::{self, File},
    io::BufWriter,
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    Device, SampleFormat, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use hound::{WavSpec, WavWriter};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

type SharedWriter = Arc<Mutex<Option<WavWriter<BufWriter<File>>>>>;

/// Time given to an in-flight audio callback to observe the shutdown flag
/// after the stream has been dropped.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(5);

/// Only 16-bit PCM is written to disk.
const SUPPORTED_BITS_PER_SAMPLE: u16 = 16;

/// Captures the default input device into WAV files.
pub struct CpalCaptureEngine {
    recordings_dir: PathBuf,
    mode: Option<AudioMode>,
}

impl CpalCaptureEngine {
    /// Create an engine that stores captures under `recordings_dir`.
    ///
    /// The directory is created on the first capture.
    pub fn new<P: AsRef<Path>>(recordings_dir: P) -> Self {
        Self {
            recordings_dir: recordings_dir.as_ref().to_path_buf(),
            mode: None,
        }
    }

    /// Directory new captures are written to.
    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }
}

impl CaptureEngine for CpalCaptureEngine {
    #[instrument(skip(self))]
    fn configure(&mut self, mode: AudioMode) -> PlatformResult<()> {
        self.mode = Some(mode);
        debug!(
            allows_recording = mode.allows_recording,
            plays_in_silent_mode = mode.plays_in_silent_mode,
            "Audio mode configured"
        );
        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn begin_capture(&mut self, preset: QualityPreset) -> PlatformResult<Box<dyn CaptureHandle>> {
        if !self.mode.is_some_and(|mode| mode.allows_recording) {
            return Err(PlatformError::DeviceError {
                reason: "Audio mode does not allow recording".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if preset.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE {
            return Err(PlatformError::StorageError {
                reason: format!("Unsupported bit depth: {}", preset.bits_per_sample),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| PlatformError::DeviceError {
                reason: "No microphone found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = select_stream_config(&device, preset)?;

        fs::create_dir_all(&self.recordings_dir).map_err(|e| PlatformError::StorageError {
            reason: format!("Failed to create {:?}: {}", self.recordings_dir, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let capture_id = Uuid::new_v4();
        let path = self
            .recordings_dir
            .join(format!("recording-{}.wav", capture_id));

        let spec = WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate,
            bits_per_sample: preset.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = WavWriter::create(&path, spec).map_err(|e| PlatformError::StorageError {
            reason: format!("Failed to create {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // From here on the handle owns the file: any early return drops it,
        // which finalizes the writer and removes the empty file.
        let mut handle = Box::new(CpalCaptureHandle {
            stream: None,
            writer: Arc::new(Mutex::new(Some(writer))),
            shutdown: Arc::new(AtomicBool::new(false)),
            path,
        });

        let stream = build_stream(
            &device,
            &config,
            Arc::clone(&handle.writer),
            Arc::clone(&handle.shutdown),
        )?;

        stream.play().map_err(|e| PlatformError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        handle.stream = Some(stream);

        info!(
            capture_id = %capture_id,
            path = ?handle.path,
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Audio capture started"
        );

        let handle: Box<dyn CaptureHandle> = handle;
        Ok(handle)
    }
}

/// A running CPAL input stream feeding a WAV writer.
pub(crate) struct CpalCaptureHandle {
    stream: Option<Stream>,
    writer: SharedWriter,
    /// Signals the audio callback to stop writing. Set before the stream is
    /// dropped so no in-flight callback touches the writer after release.
    shutdown: Arc<AtomicBool>,
    path: PathBuf,
}

impl CpalCaptureHandle {
    /// A handle over an already open writer, with no stream attached.
    #[cfg(test)]
    pub(crate) fn from_writer(writer: WavWriter<BufWriter<File>>, path: PathBuf) -> Self {
        Self {
            stream: None,
            writer: Arc::new(Mutex::new(Some(writer))),
            shutdown: Arc::new(AtomicBool::new(false)),
            path,
        }
    }

    /// Stop the stream and close the file. Safe to call more than once.
    #[track_caller]
    fn release(&mut self) -> PlatformResult<Option<StorageRef>> {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            std::thread::sleep(SHUTDOWN_GRACE);
            info!(path = ?self.path, "Audio capture stopped");
        }

        let writer = self
            .writer
            .lock()
            .unwrap_or_else(|e| {
                error!("WAV writer lock poisoned, recovering: {}", e);
                e.into_inner()
            })
            .take();

        let Some(writer) = writer else {
            return Ok(None);
        };

        let sample_count = writer.len();

        if let Err(e) = writer.finalize() {
            self.discard_file();
            return Err(PlatformError::StorageError {
                reason: format!("Failed to finalize {:?}: {}", self.path, e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if sample_count == 0 {
            self.discard_file();
            debug!(path = ?self.path, "Capture produced no samples");
            return Ok(None);
        }

        debug!(path = ?self.path, sample_count, "Capture finalized");

        Ok(StorageRef::from_path(&self.path))
    }

    fn discard_file(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = ?self.path, error = %e, "Failed to remove capture file");
        }
    }
}

impl CaptureHandle for CpalCaptureHandle {
    fn finalize(mut self: Box<Self>) -> PlatformResult<Option<StorageRef>> {
        self.release()
    }
}

impl Drop for CpalCaptureHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            error!(error = ?e, "Failed to release capture");
        }
    }
}

/// Prefer a device range matching the preset, otherwise the device default.
#[track_caller]
fn select_stream_config(device: &Device, preset: QualityPreset) -> PlatformResult<StreamConfig> {
    let preferred = device.supported_input_configs().ok().and_then(|mut ranges| {
        ranges.find(|range| {
            range.sample_format() == SampleFormat::F32
                && range.channels() == preset.channels
                && range.min_sample_rate() <= preset.sample_rate
                && preset.sample_rate <= range.max_sample_rate()
        })
    });

    if let Some(range) = preferred {
        return Ok(range.with_sample_rate(preset.sample_rate).into());
    }

    let default = device
        .default_input_config()
        .map_err(|e| PlatformError::DeviceError {
            reason: format!("Failed to get config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if default.sample_format() != SampleFormat::F32 {
        return Err(PlatformError::DeviceError {
            reason: format!("Unsupported sample format: {:?}", default.sample_format()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    debug!(
        sample_rate = default.sample_rate(),
        channels = default.channels(),
        "Preset unsupported by device, using default input config"
    );

    Ok(default.into())
}

#[track_caller]
fn build_stream(
    device: &Device,
    config: &StreamConfig,
    writer: SharedWriter,
    shutdown: Arc<AtomicBool>,
) -> PlatformResult<Stream> {
    let channels = usize::from(config.channels.max(1));

    device
        .build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if shutdown.load(Ordering::Acquire) {
                    return;
                }
                let mut guard = writer.lock().unwrap_or_else(|e| {
                    error!("WAV writer lock poisoned, recovering: {}", e);
                    e.into_inner()
                });
                if let Some(w) = guard.as_mut() {
                    // Whole frames only: hound refuses to finalize a file
                    // ending in a partial frame.
                    'frames: for frame in data.chunks_exact(channels) {
                        for &sample in frame {
                            if let Err(e) = w.write_sample(to_pcm16(sample)) {
                                error!("Failed to write sample: {}", e);
                                break 'frames;
                            }
                        }
                    }
                }
            },
            |err| {
                error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| PlatformError::DeviceError {
            reason: format!("Failed to build stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Convert a normalized float sample to 16-bit PCM.
pub(crate) fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
