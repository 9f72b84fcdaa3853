use std::time::Instant;

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_ALIGN: &str = "align";
pub const STAGE_AGGREGATE: &str = "aggregate";

/// Stages in the order the use case runs them.
pub const STAGES: [&str; 4] = [STAGE_NORMALIZE, STAGE_TOKENIZE, STAGE_ALIGN, STAGE_AGGREGATE];

/// What it took to align one document: wall time per stage and how many
/// tokens came out without timing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentStats {
    pub stages: Vec<(&'static str, f64)>,
    pub units: usize,
    pub tokens: usize,
    pub untimed_tokens: usize,
}

impl DocumentStats {
    /// Runs `f` and records its wall time under `stage`.
    pub fn time<T>(&mut self, stage: &'static str, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = f();
        self.stages
            .push((stage, started.elapsed().as_secs_f64() * 1000.0));
        result
    }

    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|&(_, ms)| ms)
    }

    pub fn total_ms(&self) -> f64 {
        self.stages.iter().map(|(_, ms)| ms).sum()
    }

    /// Fraction of tokens without timing; zero for a document with no tokens.
    pub fn untimed_rate(&self) -> f64 {
        if self.tokens == 0 {
            0.0
        } else {
            self.untimed_tokens as f64 / self.tokens as f64
        }
    }
}
