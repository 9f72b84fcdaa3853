use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where timing for each timed unit is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One unit per transcribed word, each with its own timing.
    #[default]
    Word,
    /// One unit per whitespace-delimited word of a segment, all sharing
    /// the segment's timing.
    Segment,
}

impl Granularity {
    pub const ALL: &[Granularity] = &[Granularity::Word, Granularity::Segment];
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Word => write!(f, "word"),
            Granularity::Segment => write!(f, "segment"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" => Ok(Granularity::Word),
            "segment" => Ok(Granularity::Segment),
            other => Err(format!(
                "Granularity must be 'word' or 'segment', got '{other}'"
            )),
        }
    }
}
