use serde::Serialize;

/// A linguistic token with byte offsets into the text it was cut from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl Token {
    pub fn new(index: usize, text: &str, start_char: usize, end_char: usize) -> Self {
        Self {
            index,
            text: text.to_string(),
            start_char,
            end_char,
        }
    }
}
