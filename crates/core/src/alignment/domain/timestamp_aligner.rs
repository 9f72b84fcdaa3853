use super::aligned_token::AlignedToken;
use crate::tokenization::domain::token::Token;
use crate::transcript::domain::timed_unit::TimedUnit;

/// Assigns each token the timing of the transcript unit it overlaps most.
///
/// Both inputs must be sorted by `start_char`. Units may overlap each other;
/// the sweep keeps only the units that can still reach the current token, so
/// the work per token is bounded by how many units overlap at that point.
pub struct TimestampAligner;

impl TimestampAligner {
    pub fn align(tokens: &[Token], units: &[TimedUnit]) -> Vec<AlignedToken> {
        let mut sweep = UnitSweep::new(units);
        let aligned: Vec<AlignedToken> = tokens
            .iter()
            .map(|token| match sweep.best_unit(token) {
                Some(unit) => AlignedToken::timed(token, unit),
                None => AlignedToken::untimed(token),
            })
            .collect();

        let untimed = aligned.iter().filter(|t| !t.is_timed()).count();
        log::debug!(
            "Aligned {} tokens against {} units ({untimed} untimed)",
            tokens.len(),
            units.len()
        );
        aligned
    }
}

/// Forward sweep over units sorted by `start_char`.
///
/// `active` holds the indices of units that have started before the current
/// token ends and have not ended before it starts, in input order.
struct UnitSweep<'a> {
    units: &'a [TimedUnit],
    next: usize,
    active: Vec<usize>,
}

impl<'a> UnitSweep<'a> {
    fn new(units: &'a [TimedUnit]) -> Self {
        Self {
            units,
            next: 0,
            active: Vec::new(),
        }
    }

    /// Moves the sweep to `token`. Tokens must arrive in `start_char` order.
    fn advance(&mut self, token: &Token) {
        let units = self.units;
        self.active.retain(|&i| units[i].end_char > token.start_char);
        while self.next < units.len() && units[self.next].start_char < token.end_char {
            if units[self.next].end_char > token.start_char {
                self.active.push(self.next);
            }
            self.next += 1;
        }
    }

    /// Largest overlap wins; ties go to the earliest `start_char`, then to
    /// the earliest unit in input order.
    fn best_unit(&mut self, token: &Token) -> Option<&'a TimedUnit> {
        self.advance(token);

        let units = self.units;
        let mut best: Option<(&'a TimedUnit, usize)> = None;
        for &i in &self.active {
            let unit = &units[i];
            let overlap = unit.overlap(token.start_char, token.end_char);
            if overlap == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, current_overlap)) => {
                    overlap > current_overlap
                        || (overlap == current_overlap && unit.start_char < current.start_char)
                }
            };
            if better {
                best = Some((unit, overlap));
            }
        }

        best.map(|(unit, _)| unit)
    }
}
