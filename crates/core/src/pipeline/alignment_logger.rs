use std::time::Instant;

use crate::pipeline::document_stats::{DocumentStats, STAGES};
use crate::shared::constants::PROGRESS_THROTTLE_DOCUMENTS;

/// Receives progress and per-document statistics from the use case and the
/// batch executors.
pub trait AlignmentLogger: Send {
    fn progress(&mut self, current: usize, total: usize);

    /// Called once for every successfully aligned document.
    fn document(&mut self, stats: &DocumentStats);

    fn info(&mut self, message: &str);

    /// End-of-run report. No-op unless overridden.
    fn summary(&self) {}
}

pub struct NullAlignmentLogger;

impl AlignmentLogger for NullAlignmentLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn document(&mut self, _stats: &DocumentStats) {}
    fn info(&mut self, _message: &str) {}
}

/// Writes through the `log` crate and keeps every document's stats for the
/// closing summary.
///
/// Progress lines are emitted every `throttle_documents` documents and for
/// the last one.
pub struct LogAlignmentLogger {
    throttle_documents: usize,
    started: Instant,
    documents: Vec<DocumentStats>,
}

impl LogAlignmentLogger {
    pub fn new(throttle_documents: usize) -> Self {
        Self {
            throttle_documents: throttle_documents.max(1),
            started: Instant::now(),
            documents: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[DocumentStats] {
        &self.documents
    }

    /// Wall time of `stage` for each document that ran it, in arrival order.
    pub fn timings_for(&self, stage: &str) -> Vec<f64> {
        self.documents
            .iter()
            .filter_map(|d| d.stage_ms(stage))
            .collect()
    }

    /// Untimed tokens over all tokens seen, pooled across documents.
    pub fn untimed_rate(&self) -> f64 {
        let tokens: usize = self.documents.iter().map(|d| d.tokens).sum();
        let untimed: usize = self.documents.iter().map(|d| d.untimed_tokens).sum();
        if tokens == 0 {
            0.0
        } else {
            untimed as f64 / tokens as f64
        }
    }

    /// `None` until at least one document has been recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.documents.is_empty() {
            return None;
        }

        let count = self.documents.len();
        let mut lines = vec![format!(
            "Aligned {count} document{} in {:.2}s",
            if count == 1 { "" } else { "s" },
            self.started.elapsed().as_secs_f64()
        )];

        for stage in STAGES {
            let ms = self.timings_for(stage);
            if ms.is_empty() {
                continue;
            }
            let total: f64 = ms.iter().sum();
            let slowest = ms.iter().copied().fold(0.0, f64::max);
            lines.push(format!(
                "  {stage:<9} mean {:>8.2}ms  max {slowest:>8.2}ms",
                total / ms.len() as f64
            ));
        }

        let tokens: usize = self.documents.iter().map(|d| d.tokens).sum();
        let untimed: usize = self.documents.iter().map(|d| d.untimed_tokens).sum();
        lines.push(format!(
            "  tokens    {tokens} ({untimed} untimed, {:.1}%)",
            self.untimed_rate() * 100.0
        ));

        let partial = self
            .documents
            .iter()
            .filter(|d| d.untimed_tokens > 0)
            .count();
        if partial > 0 {
            lines.push(format!(
                "  {partial} of {count} documents have untimed tokens"
            ));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogAlignmentLogger {
    fn default() -> Self {
        Self::new(PROGRESS_THROTTLE_DOCUMENTS)
    }
}

impl AlignmentLogger for LogAlignmentLogger {
    fn progress(&mut self, current: usize, total: usize) {
        if total > 0 && (current % self.throttle_documents == 0 || current == total) {
            log::info!("Aligned {current}/{total} documents");
        }
    }

    fn document(&mut self, stats: &DocumentStats) {
        log::debug!(
            "Document aligned in {:.2}ms: {} units, {} tokens, {} untimed",
            stats.total_ms(),
            stats.units,
            stats.tokens,
            stats.untimed_tokens
        );
        self.documents.push(stats.clone());
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}
