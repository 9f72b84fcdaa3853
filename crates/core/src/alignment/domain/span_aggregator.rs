use serde::Serialize;

use super::aligned_token::AlignedToken;

/// Aggregate time range of a span; either end may be unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SpanTimestamp {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl SpanTimestamp {
    pub fn is_defined(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    pub fn duration(&self) -> Option<f64> {
        Some(self.end_time? - self.start_time?)
    }
}

/// Reduces a contiguous run of aligned tokens to one time range.
///
/// Start comes from the first token that has a start time and end from the
/// last token that has an end time, so untimed tokens at either edge of the
/// span are skipped.
pub struct SpanAggregator;

impl SpanAggregator {
    pub fn aggregate(span: &[AlignedToken]) -> SpanTimestamp {
        SpanTimestamp {
            start_time: span.iter().find_map(|t| t.start_time),
            end_time: span.iter().rev().find_map(|t| t.end_time),
        }
    }
}
