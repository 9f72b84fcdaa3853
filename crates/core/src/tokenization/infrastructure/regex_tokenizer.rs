use regex::Regex;

use crate::tokenization::domain::token::Token;
use crate::tokenization::domain::tokenizer::Tokenizer;

/// Word runs (keeping inner apostrophes, so "don't" stays whole) or single
/// punctuation marks.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\w+(?:['’]\w+)*|[^\w\s]";

/// Pattern-driven tokenizer: every non-overlapping match becomes a token.
///
/// A stand-in for a real NLP tokenizer. It splits punctuation off words the
/// way most linguistic tokenizers do, which is enough to exercise the
/// boundary mismatch with transcript words.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    pattern: Regex,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, Box<dyn std::error::Error>> {
        Ok(self
            .pattern
            .find_iter(text)
            .filter(|m| !m.as_str().is_empty())
            .enumerate()
            .map(|(index, m)| Token::new(index, m.as_str(), m.start(), m.end()))
            .collect())
    }
}
