/// A named-entity mention located by byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityMention {
    pub label: String,
    pub start_char: usize,
    pub end_char: usize,
}

/// Domain interface for named-entity recognition.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<EntityMention>, Box<dyn std::error::Error>>;
}
