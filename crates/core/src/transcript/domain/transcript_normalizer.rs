use super::granularity::Granularity;
use super::raw_transcript::RawSegment;
use super::timed_unit::TimedUnit;
use super::transcript_error::{Malformation, RecordLocation, TranscriptError};

/// Flat timed units plus the text they were placed into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedTranscript {
    pub units: Vec<TimedUnit>,
    pub text: String,
}

/// Flattens a raw, nested transcript into ordered timed units and a single
/// reconstructed string.
///
/// Unit texts are trimmed and joined with exactly one space, so every unit's
/// byte range in the reconstructed text is known exactly.
pub struct TranscriptNormalizer;

impl TranscriptNormalizer {
    pub fn normalize(
        segments: &[RawSegment],
        granularity: Granularity,
    ) -> Result<NormalizedTranscript, TranscriptError> {
        let mut builder = TextBuilder::default();

        match granularity {
            Granularity::Word => Self::append_words(segments, &mut builder)?,
            Granularity::Segment => Self::append_segments(segments, &mut builder)?,
        }

        let normalized = builder.finish();
        log::debug!(
            "Normalized {} segments into {} units ({} bytes of text, {granularity} granularity)",
            segments.len(),
            normalized.units.len(),
            normalized.text.len()
        );
        Ok(normalized)
    }

    fn append_words(
        segments: &[RawSegment],
        builder: &mut TextBuilder,
    ) -> Result<(), TranscriptError> {
        for (seg_idx, segment) in segments.iter().enumerate() {
            // Segment fields are optional here, but present times must be ordered.
            if let (Some(start), Some(end)) = (segment.start, segment.end) {
                if start > end {
                    return Err(TranscriptError::malformed(
                        RecordLocation::segment(seg_idx),
                        Malformation::StartAfterEnd { start, end },
                    ));
                }
            }
            let words = segment
                .words
                .as_ref()
                .ok_or(TranscriptError::GranularityMismatch { segment: seg_idx })?;

            for (word_idx, word) in words.iter().enumerate() {
                let location = RecordLocation::word(seg_idx, word_idx);
                let (text, start, end) =
                    validate(word.text.as_deref(), word.start, word.end, location)?;
                if !builder.push(text, start, end, word.confidence) {
                    log::debug!("Skipping blank word at {location}");
                }
            }
        }
        Ok(())
    }

    fn append_segments(
        segments: &[RawSegment],
        builder: &mut TextBuilder,
    ) -> Result<(), TranscriptError> {
        for (seg_idx, segment) in segments.iter().enumerate() {
            let location = RecordLocation::segment(seg_idx);
            let (text, start, end) =
                validate(segment.text.as_deref(), segment.start, segment.end, location)?;
            for piece in text.split_whitespace() {
                builder.push(piece, start, end, segment.confidence);
            }
        }
        Ok(())
    }
}

fn validate(
    text: Option<&str>,
    start: Option<f64>,
    end: Option<f64>,
    location: RecordLocation,
) -> Result<(&str, f64, f64), TranscriptError> {
    let missing = |field| TranscriptError::malformed(location, Malformation::MissingField(field));
    let text = text.ok_or_else(|| missing("text"))?;
    let start = start.ok_or_else(|| missing("start"))?;
    let end = end.ok_or_else(|| missing("end"))?;
    if start > end {
        return Err(TranscriptError::malformed(
            location,
            Malformation::StartAfterEnd { start, end },
        ));
    }
    Ok((text, start, end))
}

#[derive(Default)]
struct TextBuilder {
    text: String,
    units: Vec<TimedUnit>,
}

impl TextBuilder {
    /// Appends one unit. Returns `false` if the text was blank and nothing
    /// was appended.
    fn push(&mut self, text: &str, start_time: f64, end_time: f64, confidence: Option<f32>) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let start_char = self.text.len();
        self.text.push_str(trimmed);
        self.units.push(TimedUnit {
            text: trimmed.to_string(),
            start_char,
            end_char: self.text.len(),
            start_time,
            end_time,
            confidence,
        });
        true
    }

    fn finish(self) -> NormalizedTranscript {
        NormalizedTranscript {
            units: self.units,
            text: self.text,
        }
    }
}
