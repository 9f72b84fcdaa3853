use std::ops::Range;

use crate::tokenization::domain::sentence_splitter::SentenceSplitter;

/// Splits after a run of `.`, `!` or `?` (plus closing quotes/brackets)
/// that is followed by whitespace or the end of the text.
///
/// Decimal points such as "4.04" are not boundaries since no whitespace
/// follows them. Abbreviations are not handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSentenceSplitter;

impl PunctuationSentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn sentence_ranges(text: &str) -> Vec<Range<usize>> {
        let mut sentences = Vec::new();
        let mut start: Option<usize> = None;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if start.is_none() {
                if c.is_whitespace() {
                    continue;
                }
                start = Some(i);
            }
            if !is_terminal(c) {
                continue;
            }

            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if is_terminal(next) || is_closing(next) {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                if let Some(s) = start.take() {
                    sentences.push(s..end);
                }
            }
        }

        if let Some(s) = start {
            sentences.push(s..text.trim_end().len());
        }
        sentences
    }
}

impl SentenceSplitter for PunctuationSentenceSplitter {
    fn split(&self, text: &str) -> Result<Vec<Range<usize>>, Box<dyn std::error::Error>> {
        Ok(Self::sentence_ranges(text))
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        PunctuationSentenceSplitter::sentence_ranges(text)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_splits_on_terminal_punctuation() {
        assert_eq!(
            sentences("Hello world. How are you? Fine!"),
            ["Hello world.", "How are you?", "Fine!"]
        );
    }

    #[test]
    fn test_decimal_point_is_not_a_boundary() {
        assert_eq!(
            sentences("It took 4.04 seconds. Done."),
            ["It took 4.04 seconds.", "Done."]
        );
    }

    #[test]
    fn test_trailing_text_without_punctuation() {
        assert_eq!(sentences("First one. and then  "), ["First one.", "and then"]);
    }

    #[test]
    fn test_runs_and_closing_quotes_stay_with_sentence() {
        assert_eq!(
            sentences("Really?! He said \"stop.\" Then left..."),
            ["Really?!", "He said \"stop.\"", "Then left..."]
        );
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(sentences("").is_empty());
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_ranges_exclude_surrounding_whitespace() {
        let ranges = PunctuationSentenceSplitter::sentence_ranges("  Hi.   Bye.");
        assert_eq!(ranges, vec![2..5, 8..12]);
    }
}
