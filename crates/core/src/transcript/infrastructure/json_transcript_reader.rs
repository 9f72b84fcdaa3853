use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::constants::{CANONICAL_WORDS_KEY, DEFAULT_SEGMENTS_KEY, DEFAULT_WORDS_KEY};
use crate::transcript::domain::raw_transcript::RawSegment;
use crate::transcript::domain::transcript_reader::TranscriptReader;

#[derive(Error, Debug)]
pub enum TranscriptReadError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transcript is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("transcript has no `{key}` array")]
    MissingSegments { key: String },
    #[error("segment {index} is not a valid segment record: {source}")]
    Segment {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads Whisper-style JSON transcripts.
///
/// The segment array is looked up under `segments_key`; each segment's word
/// list is looked up under `words_key`.
#[derive(Debug, Clone)]
pub struct JsonTranscriptReader {
    segments_key: String,
    words_key: String,
}

impl JsonTranscriptReader {
    pub fn new(segments_key: &str, words_key: &str) -> Self {
        Self {
            segments_key: segments_key.to_string(),
            words_key: words_key.to_string(),
        }
    }

    pub fn parse_str(&self, json: &str) -> Result<Vec<RawSegment>, TranscriptReadError> {
        let value: Value = serde_json::from_str(json).map_err(TranscriptReadError::Json)?;
        self.parse_value(value)
    }

    pub fn parse_value(&self, mut root: Value) -> Result<Vec<RawSegment>, TranscriptReadError> {
        let segments = match root.get_mut(&self.segments_key).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(TranscriptReadError::MissingSegments {
                    key: self.segments_key.clone(),
                })
            }
        };

        segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                serde_json::from_value(self.canonicalize(segment))
                    .map_err(|source| TranscriptReadError::Segment { index, source })
            })
            .collect()
    }

    /// Moves a custom-named word list to the key the segment schema expects
    /// and drops alias fields shadowed by their canonical spelling.
    fn canonicalize(&self, mut segment: Value) -> Value {
        let Some(record) = segment.as_object_mut() else {
            return segment;
        };
        if self.words_key != CANONICAL_WORDS_KEY {
            record.remove(CANONICAL_WORDS_KEY);
            if let Some(words) = record.remove(&self.words_key) {
                record.insert(CANONICAL_WORDS_KEY.to_string(), words);
            }
        }
        drop_shadowed_aliases(record);
        if let Some(Value::Array(words)) = record.get_mut(CANONICAL_WORDS_KEY) {
            for word in words.iter_mut().filter_map(Value::as_object_mut) {
                drop_shadowed_aliases(word);
            }
        }
        segment
    }
}

/// `(canonical, alias)` field pairs accepted on transcript records.
const FIELD_ALIASES: &[(&str, &str)] = &[("text", "word"), ("confidence", "probability")];

/// Some exporters write both spellings of a field; the canonical one wins.
fn drop_shadowed_aliases(record: &mut Map<String, Value>) {
    for (canonical, alias) in FIELD_ALIASES {
        if record.contains_key(*canonical) && record.remove(*alias).is_some() {
            log::debug!("Ignoring `{alias}` in favour of `{canonical}`");
        }
    }
}

impl Default for JsonTranscriptReader {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS_KEY, DEFAULT_WORDS_KEY)
    }
}

impl TranscriptReader for JsonTranscriptReader {
    fn read(&self, path: &Path) -> Result<Vec<RawSegment>, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path).map_err(|source| TranscriptReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse_str(&json)?)
    }
}
