use std::path::Path;

use super::raw_transcript::RawSegment;

/// Domain interface for loading a raw transcript from storage.
pub trait TranscriptReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<RawSegment>, Box<dyn std::error::Error>>;
}
