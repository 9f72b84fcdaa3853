use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::pipeline::alignment_logger::AlignmentLogger;
use crate::pipeline::batch_executor::{BatchExecutor, DocumentOutcome, ProcessFn};

const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Aligns documents on a pool of worker threads.
///
/// Layout: `feeder → [job queue] → N workers → [results] → caller`
///
/// Each worker owns the document it is processing for the whole pipeline, so
/// no alignment data is shared between threads. Results are reordered to
/// match the input.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        Self::new(num_cpus())
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        inputs: &[PathBuf],
        process: &ProcessFn<'_>,
        logger: &mut dyn AlignmentLogger,
    ) -> Vec<DocumentOutcome> {
        let total = inputs.len();
        if total == 0 {
            return Vec::new();
        }
        let workers = self.workers.min(total);
        logger.info(&format!("Aligning {total} documents on {workers} workers"));

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, &Path)>(self.channel_capacity);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, DocumentOutcome)>();
        let mut outcomes: Vec<Option<DocumentOutcome>> = (0..total).map(|_| None).collect();

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, path) in job_rx {
                        let outcome = run_isolated(process, path);
                        if result_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(result_tx);

            scope.spawn(move || {
                for (index, path) in inputs.iter().enumerate() {
                    if job_tx.send((index, path.as_path())).is_err() {
                        break;
                    }
                }
            });

            for (done, (index, outcome)) in result_rx.iter().enumerate() {
                match &outcome {
                    Ok((_, stats)) => logger.document(stats),
                    Err(e) => log::warn!("Failed to align {}: {e}", inputs[index].display()),
                }
                outcomes[index] = Some(outcome);
                logger.progress(done + 1, total);
            }
        });

        outcomes
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err("document was not processed".to_string())))
            .collect()
    }
}

/// Runs one document, turning a panic into an error for that document only.
fn run_isolated(process: &ProcessFn<'_>, path: &Path) -> DocumentOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| process(path)))
        .unwrap_or_else(|_| Err(format!("worker panicked while aligning {}", path.display())))
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::span_aggregator::SpanTimestamp;
    use crate::alignment::domain::timing_table::TimingTable;
    use crate::pipeline::aligned_document::AlignedDocument;
    use crate::pipeline::align_transcript_use_case::AlignTranscriptUseCase;
    use crate::pipeline::alignment_logger::{LogAlignmentLogger, NullAlignmentLogger};
    use crate::pipeline::document_stats::{DocumentStats, STAGE_ALIGN};
    use crate::tokenization::infrastructure::regex_tokenizer::RegexTokenizer;
    use crate::transcript::domain::granularity::Granularity;
    use crate::transcript::domain::raw_transcript::{RawSegment, RawWord};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn doc(text: String) -> (AlignedDocument, DocumentStats) {
        let document = AlignedDocument {
            text,
            units: vec![],
            tokens: TimingTable::default(),
            sentences: vec![],
            entities: vec![],
            timestamp: SpanTimestamp::default(),
        };
        (document, DocumentStats::default())
    }

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("doc{i}.json"))).collect()
    }

    struct CountingLogger {
        progress: Arc<Mutex<Vec<usize>>>,
    }

    impl AlignmentLogger for CountingLogger {
        fn progress(&mut self, current: usize, _: usize) {
            self.progress.lock().unwrap().push(current);
        }
        fn document(&mut self, _: &DocumentStats) {}
        fn info(&mut self, _: &str) {}
    }

    #[test]
    fn test_outcomes_in_input_order_despite_completion_order() {
        let inputs = paths(12);
        // Earlier documents take longer, so they finish last.
        let process = |path: &Path| -> DocumentOutcome {
            let name = path.to_string_lossy().to_string();
            let n: u64 = name
                .trim_start_matches("doc")
                .trim_end_matches(".json")
                .parse()
                .unwrap();
            std::thread::sleep(Duration::from_millis(12 - n));
            Ok(doc(name))
        };

        let outcomes =
            ThreadedBatchExecutor::new(4).execute(&inputs, &process, &mut NullAlignmentLogger);

        assert_eq!(outcomes.len(), 12);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.as_ref().unwrap().0.text, format!("doc{i}.json"));
        }
    }

    #[test]
    fn test_failure_is_isolated_to_its_document() {
        let inputs = paths(5);
        let process = |path: &Path| -> DocumentOutcome {
            if path == Path::new("doc2.json") {
                Err("malformed".to_string())
            } else {
                Ok(doc(path.display().to_string()))
            }
        };

        let outcomes =
            ThreadedBatchExecutor::new(3).execute(&inputs, &process, &mut NullAlignmentLogger);

        assert!(outcomes[2].is_err());
        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 4);
    }

    #[test]
    fn test_panic_is_isolated_to_its_document() {
        let inputs = paths(4);
        let process = |path: &Path| -> DocumentOutcome {
            if path == Path::new("doc1.json") {
                panic!("tokenizer exploded");
            }
            Ok(doc(path.display().to_string()))
        };

        let outcomes =
            ThreadedBatchExecutor::new(2).execute(&inputs, &process, &mut NullAlignmentLogger);

        assert!(outcomes[1].as_ref().unwrap_err().contains("panicked"));
        assert!(outcomes[0].is_ok());
        assert!(outcomes[3].is_ok());
    }

    #[test]
    fn test_progress_reported_once_per_document() {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let mut logger = CountingLogger {
            progress: progress.clone(),
        };
        let process = |path: &Path| -> DocumentOutcome { Ok(doc(path.display().to_string())) };

        ThreadedBatchExecutor::new(3).execute(&paths(7), &process, &mut logger);

        assert_eq!(*progress.lock().unwrap(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_worker_stage_timings_reach_the_run_logger() {
        let use_case = AlignTranscriptUseCase::new(
            Box::new(RegexTokenizer::new().unwrap()),
            None,
            None,
            Granularity::Word,
        );
        let segments = vec![RawSegment::new("Hi Tom.", 0.0, 1.0).with_words(vec![
            RawWord::new("Hi", 0.0, 0.4),
            RawWord::new("Tom.", 0.4, 1.0),
        ])];
        let process = |_: &Path| -> DocumentOutcome {
            use_case
                .execute_with_stats(&segments)
                .map_err(|e| e.to_string())
        };
        let mut logger = LogAlignmentLogger::default();

        let outcomes = ThreadedBatchExecutor::new(2).execute(&paths(3), &process, &mut logger);

        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert_eq!(logger.timings_for(STAGE_ALIGN).len(), 3);
        assert_eq!(logger.documents()[0].tokens, 3);
        assert!(logger.summary_string().unwrap().starts_with("Aligned 3 documents"));
    }

    #[test]
    fn test_more_workers_than_documents() {
        let process = |path: &Path| -> DocumentOutcome { Ok(doc(path.display().to_string())) };
        let outcomes =
            ThreadedBatchExecutor::new(16).execute(&paths(2), &process, &mut NullAlignmentLogger);
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let process = |_: &Path| -> DocumentOutcome { Err("unreachable".to_string()) };
        let outcomes =
            ThreadedBatchExecutor::default().execute(&[], &process, &mut NullAlignmentLogger);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_zero_workers_is_clamped() {
        assert_eq!(ThreadedBatchExecutor::new(0).workers(), 1);
    }
}
