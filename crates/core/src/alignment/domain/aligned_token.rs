use serde::Serialize;

use crate::tokenization::domain::token::Token;
use crate::transcript::domain::timed_unit::TimedUnit;

/// A token carrying the timing of the transcript unit it was matched to.
///
/// Timing fields are `None` when no unit overlaps the token. `split` is set
/// when the matched unit's range differs from the token's own range, i.e. the
/// tokenizer cut a transcript word apart or merged across it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignedToken {
    pub index: usize,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub confidence: Option<f32>,
    pub split: bool,
}

impl AlignedToken {
    pub fn untimed(token: &Token) -> Self {
        Self {
            index: token.index,
            text: token.text.clone(),
            start_char: token.start_char,
            end_char: token.end_char,
            start_time: None,
            end_time: None,
            confidence: None,
            split: false,
        }
    }

    pub fn timed(token: &Token, unit: &TimedUnit) -> Self {
        Self {
            start_time: Some(unit.start_time),
            end_time: Some(unit.end_time),
            confidence: unit.confidence,
            split: unit.start_char != token.start_char || unit.end_char != token.end_char,
            ..Self::untimed(token)
        }
    }

    pub fn is_timed(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(start_char: usize, end_char: usize) -> TimedUnit {
        TimedUnit {
            text: "Tom.".to_string(),
            start_char,
            end_char,
            start_time: 8.4,
            end_time: 8.66,
            confidence: None,
        }
    }

    #[test]
    fn test_untimed_has_no_timing() {
        let t = AlignedToken::untimed(&Token::new(0, ".", 3, 4));
        assert!(!t.is_timed());
        assert_eq!(t.end_time, None);
        assert_eq!(t.confidence, None);
        assert!(!t.split);
    }

    #[test]
    fn test_timed_copies_unit_timing() {
        let t = AlignedToken::timed(&Token::new(4, "Tom", 17, 20), &unit(17, 21));
        assert!(t.is_timed());
        assert_eq!(t.index, 4);
        assert_eq!(t.start_time, Some(8.4));
        assert_eq!(t.end_time, Some(8.66));
        assert_eq!(t.confidence, None);
    }

    #[test]
    fn test_split_flag() {
        let exact = AlignedToken::timed(&Token::new(0, "Tom.", 17, 21), &unit(17, 21));
        let partial = AlignedToken::timed(&Token::new(0, "Tom", 17, 20), &unit(17, 21));
        assert!(!exact.split);
        assert!(partial.split);
    }
}
