use std::ops::Range;

/// Domain interface for sentence segmentation.
///
/// Returns ordered, non-overlapping byte ranges into `text`.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<Range<usize>>, Box<dyn std::error::Error>>;
}
