use crate::RecordingDescriptor;

use tracing::debug;

/// Finished recordings in the order they were completed.
///
/// Append-only: entries are never updated or removed while the catalog
/// lives.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    recordings: Vec<RecordingDescriptor>,
}

impl RecordingCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recording after every existing one.
    pub fn append(&mut self, descriptor: RecordingDescriptor) {
        debug_assert!(!descriptor.storage().as_str().is_empty());

        debug!(
            recording_id = %descriptor.id(),
            position = self.recordings.len() + 1,
            "Recording catalogued"
        );

        self.recordings.push(descriptor);
    }

    /// All recordings, oldest first.
    pub fn list(&self) -> &[RecordingDescriptor] {
        &self.recordings
    }

    /// Iterate recordings, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, RecordingDescriptor> {
        self.recordings.iter()
    }

    /// Recording at a zero-based insertion index.
    pub fn get(&self, index: usize) -> Option<&RecordingDescriptor> {
        self.recordings.get(index)
    }

    /// Number of recordings.
    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    /// Whether no recording has been appended.
    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordingCatalog {
    type Item = &'a RecordingDescriptor;
    type IntoIter = std::slice::Iter<'a, RecordingDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
