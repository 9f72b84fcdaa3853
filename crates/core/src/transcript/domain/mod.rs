pub mod granularity;
pub mod raw_transcript;
pub mod timed_unit;
pub mod transcript_error;
pub mod transcript_normalizer;
pub mod transcript_reader;
