use std::path::PathBuf;

use crate::pipeline::alignment_logger::AlignmentLogger;
use crate::pipeline::batch_executor::{BatchExecutor, DocumentOutcome, ProcessFn};

/// Processes documents one after another on the calling thread.
#[derive(Debug, Default)]
pub struct SequentialBatchExecutor;

impl SequentialBatchExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(
        &self,
        inputs: &[PathBuf],
        process: &ProcessFn<'_>,
        logger: &mut dyn AlignmentLogger,
    ) -> Vec<DocumentOutcome> {
        let total = inputs.len();
        inputs
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let outcome = process(path);
                match &outcome {
                    Ok((_, stats)) => logger.document(stats),
                    Err(e) => log::warn!("Failed to align {}: {e}", path.display()),
                }
                logger.progress(i + 1, total);
                outcome
            })
            .collect()
    }
}
