use std::ops::Range;

use serde::Serialize;

use super::aligned_token::AlignedToken;
use super::span_aggregator::{SpanAggregator, SpanTimestamp};

/// Per-document side-table of aligned tokens.
///
/// Callers look timing up by token position, token range or byte range and
/// merge it into their own document model.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimingTable {
    tokens: Vec<AlignedToken>,
}

impl TimingTable {
    pub fn new(tokens: Vec<AlignedToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[AlignedToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, position: usize) -> Option<&AlignedToken> {
        self.tokens.get(position)
    }

    pub fn untimed_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_timed()).count()
    }

    /// Aggregates `tokens[range]`, clamping the range to the document.
    pub fn span(&self, range: Range<usize>) -> SpanTimestamp {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        SpanAggregator::aggregate(&self.tokens[start..end])
    }

    pub fn spans<I>(&self, ranges: I) -> Vec<(Range<usize>, SpanTimestamp)>
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        ranges
            .into_iter()
            .map(|range| {
                let ts = self.span(range.clone());
                (range, ts)
            })
            .collect()
    }

    /// Token positions overlapping the byte range `start_char..end_char`.
    pub fn token_range_for_chars(&self, start_char: usize, end_char: usize) -> Range<usize> {
        let first = self.tokens.partition_point(|t| t.end_char <= start_char);
        let last = self.tokens.partition_point(|t| t.start_char < end_char);
        first..last.max(first)
    }

    pub fn span_for_chars(&self, start_char: usize, end_char: usize) -> SpanTimestamp {
        self.span(self.token_range_for_chars(start_char, end_char))
    }

    pub fn document(&self) -> SpanTimestamp {
        SpanAggregator::aggregate(&self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // "Hi , Tom ." with timing on the words only
    fn table() -> TimingTable {
        let tok = |index: usize, text: &str, start_char: usize, time: Option<(f64, f64)>| {
            AlignedToken {
                index,
                text: text.to_string(),
                start_char,
                end_char: start_char + text.len(),
                start_time: time.map(|t| t.0),
                end_time: time.map(|t| t.1),
                confidence: None,
                split: false,
            }
        };
        TimingTable::new(vec![
            tok(0, "Hi", 0, Some((0.0, 0.5))),
            tok(1, ",", 2, None),
            tok(2, "Tom", 4, Some((0.6, 1.0))),
            tok(3, ".", 7, None),
        ])
    }

    #[test]
    fn test_token_lookup() {
        let t = table();
        assert_eq!(t.len(), 4);
        assert_eq!(t.token(2).unwrap().text, "Tom");
        assert!(t.token(9).is_none());
        assert_eq!(t.untimed_count(), 2);
    }

    #[test]
    fn test_document_timestamp() {
        let ts = table().document();
        assert_eq!(ts.start_time, Some(0.0));
        assert_eq!(ts.end_time, Some(1.0));
    }

    #[rstest]
    #[case::single_word(2..3, Some(0.6), Some(1.0))]
    #[case::punctuation_only(3..4, None, None)]
    #[case::clamped(2..100, Some(0.6), Some(1.0))]
    #[case::out_of_bounds(7..9, None, None)]
    #[case::empty(1..1, None, None)]
    fn test_span(
        #[case] range: Range<usize>,
        #[case] start: Option<f64>,
        #[case] end: Option<f64>,
    ) {
        let ts = table().span(range);
        assert_eq!(ts.start_time, start);
        assert_eq!(ts.end_time, end);
    }

    #[rstest]
    #[case::exact_word(4, 7, 2..3)]
    #[case::inside_word(5, 6, 2..3)]
    #[case::across_tokens(0, 8, 0..4)]
    #[case::whitespace_gap(3, 4, 2..2)]
    #[case::past_end(20, 30, 4..4)]
    fn test_token_range_for_chars(
        #[case] start_char: usize,
        #[case] end_char: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(table().token_range_for_chars(start_char, end_char), expected);
    }

    #[test]
    fn test_span_for_chars() {
        let ts = table().span_for_chars(4, 8);
        assert_eq!(ts.start_time, Some(0.6));
        assert_eq!(ts.end_time, Some(1.0));
    }

    #[test]
    fn test_spans_bulk() {
        let results = table().spans(vec![0..2, 2..4]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 0..2);
        assert_eq!(results[0].1.end_time, Some(0.5));
        assert_eq!(results[1].1.start_time, Some(0.6));
    }

    #[test]
    fn test_empty_table() {
        let t = TimingTable::default();
        assert!(t.is_empty());
        assert_eq!(t.document(), SpanTimestamp::default());
        assert_eq!(t.token_range_for_chars(0, 5), 0..0);
    }
}
