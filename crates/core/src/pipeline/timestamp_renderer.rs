use super::aligned_document::TimedSentence;

/// Formats seconds as `HH:MM:SS.mmm`, truncating to whole milliseconds.
///
/// Negative or non-finite input renders as zero. Hours keep counting past 24.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    // Round to microseconds first so 1.001 does not truncate to 1.000.
    let micros = (seconds * 1_000_000.0).round() as u64;
    let millis = (micros / 1_000) % 1_000;
    let total_secs = micros / 1_000_000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// One `[HH:MM:SS.mmm] sentence` line per sentence.
///
/// Sentences without a start time are stamped `00:00:00.000`.
pub fn render_timestamped(sentences: &[TimedSentence]) -> String {
    let mut out = String::new();
    for sentence in sentences {
        let start = sentence.timestamp.start_time.unwrap_or(0.0);
        out.push_str(&format!("[{}] {}\n", format_timestamp(start), sentence.text));
    }
    out
}
