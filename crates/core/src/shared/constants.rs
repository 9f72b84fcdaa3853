pub const DEFAULT_SEGMENTS_KEY: &str = "segments";
pub const DEFAULT_WORDS_KEY: &str = "words";

/// Key the raw segment schema reads its nested word list from.
pub const CANONICAL_WORDS_KEY: &str = "words";

/// Documents between progress log lines in batch runs.
pub const PROGRESS_THROTTLE_DOCUMENTS: usize = 10;

pub const TRANSCRIPT_EXTENSIONS: &[&str] = &["json"];

pub const CONFIG_DIR_NAME: &str = "transcript-align";
pub const CONFIG_FILE_NAME: &str = "config.json";
