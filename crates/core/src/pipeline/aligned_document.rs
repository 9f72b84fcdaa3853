use std::ops::Range;

use serde::Serialize;

use crate::alignment::domain::span_aggregator::SpanTimestamp;
use crate::alignment::domain::timing_table::TimingTable;
use crate::transcript::domain::timed_unit::TimedUnit;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimedSentence {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub tokens: Range<usize>,
    #[serde(flatten)]
    pub timestamp: SpanTimestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimedEntity {
    pub label: String,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub tokens: Range<usize>,
    #[serde(flatten)]
    pub timestamp: SpanTimestamp,
}

/// Everything computed for one transcript.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignedDocument {
    pub text: String,
    pub units: Vec<TimedUnit>,
    pub tokens: TimingTable,
    pub sentences: Vec<TimedSentence>,
    pub entities: Vec<TimedEntity>,
    pub timestamp: SpanTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::aligned_token::AlignedToken;

    #[test]
    fn test_serializes_undefined_timing_as_null() {
        let doc = AlignedDocument {
            text: ".".to_string(),
            units: vec![],
            tokens: TimingTable::new(vec![AlignedToken {
                index: 0,
                text: ".".to_string(),
                start_char: 0,
                end_char: 1,
                start_time: None,
                end_time: None,
                confidence: None,
                split: false,
            }]),
            sentences: vec![TimedSentence {
                text: ".".to_string(),
                start_char: 0,
                end_char: 1,
                tokens: 0..1,
                timestamp: SpanTimestamp::default(),
            }],
            entities: vec![],
            timestamp: SpanTimestamp::default(),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["tokens"][0]["start_time"].is_null());
        assert!(json["sentences"][0]["end_time"].is_null());
        assert_eq!(json["sentences"][0]["tokens"]["end"], 1);
        assert!(json["timestamp"]["start_time"].is_null());
    }
}
