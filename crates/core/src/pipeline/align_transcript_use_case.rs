use std::ops::Range;

use crate::alignment::domain::timestamp_aligner::TimestampAligner;
use crate::alignment::domain::timing_table::TimingTable;
use crate::pipeline::aligned_document::{AlignedDocument, TimedEntity, TimedSentence};
use crate::pipeline::alignment_logger::AlignmentLogger;
use crate::pipeline::document_stats::{
    DocumentStats, STAGE_AGGREGATE, STAGE_ALIGN, STAGE_NORMALIZE, STAGE_TOKENIZE,
};
use crate::tokenization::domain::entity_recognizer::EntityRecognizer;
use crate::tokenization::domain::sentence_splitter::SentenceSplitter;
use crate::tokenization::domain::tokenizer::Tokenizer;
use crate::transcript::domain::granularity::Granularity;
use crate::transcript::domain::raw_transcript::RawSegment;
use crate::transcript::domain::transcript_normalizer::{
    NormalizedTranscript, TranscriptNormalizer,
};

/// Aligns one raw transcript: normalize → tokenize → align → aggregate.
///
/// Holds no per-document state, so one instance can serve many documents
/// concurrently.
pub struct AlignTranscriptUseCase {
    tokenizer: Box<dyn Tokenizer>,
    sentence_splitter: Option<Box<dyn SentenceSplitter>>,
    entity_recognizer: Option<Box<dyn EntityRecognizer>>,
    granularity: Granularity,
}

impl AlignTranscriptUseCase {
    pub fn new(
        tokenizer: Box<dyn Tokenizer>,
        sentence_splitter: Option<Box<dyn SentenceSplitter>>,
        entity_recognizer: Option<Box<dyn EntityRecognizer>>,
        granularity: Granularity,
    ) -> Self {
        Self {
            tokenizer,
            sentence_splitter,
            entity_recognizer,
            granularity,
        }
    }

    pub fn execute(
        &self,
        segments: &[RawSegment],
    ) -> Result<AlignedDocument, Box<dyn std::error::Error>> {
        self.execute_with_stats(segments).map(|(document, _)| document)
    }

    /// Aligns one document and hands its stats to `logger`.
    pub fn execute_with_logger(
        &self,
        segments: &[RawSegment],
        logger: &mut dyn AlignmentLogger,
    ) -> Result<AlignedDocument, Box<dyn std::error::Error>> {
        let (document, stats) = self.execute_with_stats(segments)?;
        logger.document(&stats);
        Ok(document)
    }

    /// Aligns one document and returns it with its stage timings and token
    /// counts, for callers that report them elsewhere (e.g. from a worker
    /// thread).
    pub fn execute_with_stats(
        &self,
        segments: &[RawSegment],
    ) -> Result<(AlignedDocument, DocumentStats), Box<dyn std::error::Error>> {
        let mut stats = DocumentStats::default();

        // 1. Flatten the transcript into timed units and their text
        let NormalizedTranscript { units, text } = stats.time(STAGE_NORMALIZE, || {
            TranscriptNormalizer::normalize(segments, self.granularity)
        })?;

        // 2. Tokenize the reconstructed text
        let tokens = stats.time(STAGE_TOKENIZE, || self.tokenizer.tokenize(&text))?;

        // 3. Transfer unit timing onto tokens
        let table = stats.time(STAGE_ALIGN, || {
            TimingTable::new(TimestampAligner::align(&tokens, &units))
        });
        stats.units = units.len();
        stats.tokens = table.len();
        stats.untimed_tokens = table.untimed_count();

        // 4. Aggregate sentence, entity and document spans
        let (sentences, entities) = stats.time(
            STAGE_AGGREGATE,
            || -> Result<_, Box<dyn std::error::Error>> {
                Ok((
                    self.timed_sentences(&text, &table)?,
                    self.timed_entities(&text, &table)?,
                ))
            },
        )?;
        let timestamp = table.document();

        let document = AlignedDocument {
            text,
            units,
            tokens: table,
            sentences,
            entities,
            timestamp,
        };
        Ok((document, stats))
    }

    fn timed_sentences(
        &self,
        text: &str,
        table: &TimingTable,
    ) -> Result<Vec<TimedSentence>, Box<dyn std::error::Error>> {
        let Some(splitter) = &self.sentence_splitter else {
            return Ok(Vec::new());
        };

        splitter
            .split(text)?
            .into_iter()
            .map(|range| -> Result<TimedSentence, Box<dyn std::error::Error>> {
                let sentence_text = slice(text, &range, "sentence splitter")?;
                let tokens = table.token_range_for_chars(range.start, range.end);
                Ok(TimedSentence {
                    text: sentence_text.to_string(),
                    start_char: range.start,
                    end_char: range.end,
                    timestamp: table.span(tokens.clone()),
                    tokens,
                })
            })
            .collect()
    }

    fn timed_entities(
        &self,
        text: &str,
        table: &TimingTable,
    ) -> Result<Vec<TimedEntity>, Box<dyn std::error::Error>> {
        let Some(recognizer) = &self.entity_recognizer else {
            return Ok(Vec::new());
        };

        recognizer
            .recognize(text)?
            .into_iter()
            .map(|mention| -> Result<TimedEntity, Box<dyn std::error::Error>> {
                let range = mention.start_char..mention.end_char;
                let entity_text = slice(text, &range, "entity recognizer")?;
                let tokens = table.token_range_for_chars(range.start, range.end);
                Ok(TimedEntity {
                    text: entity_text.to_string(),
                    label: mention.label,
                    start_char: range.start,
                    end_char: range.end,
                    timestamp: table.span(tokens.clone()),
                    tokens,
                })
            })
            .collect()
    }
}

fn slice<'a>(
    text: &'a str,
    range: &Range<usize>,
    source: &str,
) -> Result<&'a str, Box<dyn std::error::Error>> {
    if range.start > range.end {
        return Err(format!("{source} returned inverted range {range:?}").into());
    }
    text.get(range.clone()).ok_or_else(|| {
        format!(
            "{source} returned range {range:?} outside the {}-byte text",
            text.len()
        )
        .into()
    })
}
