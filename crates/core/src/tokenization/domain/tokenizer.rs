use super::token::Token;

/// Domain interface for linguistic tokenization.
///
/// Implementations return tokens left to right, disjoint, with byte offsets
/// into exactly the string they were given.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, Box<dyn std::error::Error>>;
}
