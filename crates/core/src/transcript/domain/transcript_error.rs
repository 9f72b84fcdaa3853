use std::fmt;

use thiserror::Error;

/// Position of a raw record inside the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLocation {
    pub segment: usize,
    pub word: Option<usize>,
}

impl RecordLocation {
    pub fn segment(segment: usize) -> Self {
        Self {
            segment,
            word: None,
        }
    }

    pub fn word(segment: usize, word: usize) -> Self {
        Self {
            segment,
            word: Some(word),
        }
    }
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.word {
            Some(word) => write!(f, "segment {}, word {}", self.segment, word),
            None => write!(f, "segment {}", self.segment),
        }
    }
}

/// What is wrong with a malformed record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Malformation {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("start time {start} is after end time {end}")]
    StartAfterEnd { start: f64, end: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    #[error("malformed transcript at {location}: {reason}")]
    MalformedTranscript {
        location: RecordLocation,
        #[source]
        reason: Malformation,
    },
    #[error("word granularity requested but segment {segment} has no word list")]
    GranularityMismatch { segment: usize },
}

impl TranscriptError {
    pub(crate) fn malformed(location: RecordLocation, reason: Malformation) -> Self {
        Self::MalformedTranscript { location, reason }
    }
}
