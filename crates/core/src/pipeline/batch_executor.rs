use std::path::{Path, PathBuf};

use crate::pipeline::aligned_document::AlignedDocument;
use crate::pipeline::alignment_logger::AlignmentLogger;
use crate::pipeline::document_stats::DocumentStats;

/// Result of aligning one document in a batch, with the stats the worker
/// collected. Errors are flattened to strings so they can cross thread
/// boundaries.
pub type DocumentOutcome = Result<(AlignedDocument, DocumentStats), String>;

/// Aligns a single document identified by its path.
pub type ProcessFn<'a> = dyn Fn(&Path) -> DocumentOutcome + Sync + 'a;

/// Abstracts how a batch of independent documents is processed.
///
/// Outcomes are returned in input order regardless of completion order, and
/// a failure in one document never affects another. The stats of every
/// successful document are passed to the logger on the calling thread.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        inputs: &[PathBuf],
        process: &ProcessFn<'_>,
        logger: &mut dyn AlignmentLogger,
    ) -> Vec<DocumentOutcome>;
}
