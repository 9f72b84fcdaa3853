use serde::Deserialize;

/// A word record as emitted by the speech-transcription system.
///
/// Every field is optional at this layer so that missing values are
/// reported by the normalizer with the record's location instead of
/// surfacing as an opaque deserialization error. Whisper output names the
/// text `word` and the confidence `probability`; both spellings are accepted.
/// The JSON reader drops the alias when a record carries both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawWord {
    #[serde(alias = "word")]
    pub text: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    #[serde(alias = "probability")]
    pub confidence: Option<f32>,
}

impl RawWord {
    pub fn new(text: &str, start: f64, end: f64) -> Self {
        Self {
            text: Some(text.to_string()),
            start: Some(start),
            end: Some(end),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// An utterance-level record, optionally carrying its word breakdown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSegment {
    pub text: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    #[serde(alias = "probability")]
    pub confidence: Option<f32>,
    pub words: Option<Vec<RawWord>>,
}

impl RawSegment {
    pub fn new(text: &str, start: f64, end: f64) -> Self {
        Self {
            text: Some(text.to_string()),
            start: Some(start),
            end: Some(end),
            confidence: None,
            words: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_words(mut self, words: Vec<RawWord>) -> Self {
        self.words = Some(words);
        self
    }
}
