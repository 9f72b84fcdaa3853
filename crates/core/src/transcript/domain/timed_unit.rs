use serde::Serialize;

/// A transcript fragment with known timing, placed in the reconstructed text.
///
/// `start_char`/`end_char` are byte offsets into the reconstructed text
/// produced by the normalizer; they are not part of the raw transcript.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimedUnit {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: Option<f32>,
}

impl TimedUnit {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Number of bytes shared with the half-open range `start_char..end_char`.
    pub fn overlap(&self, start_char: usize, end_char: usize) -> usize {
        self.end_char
            .min(end_char)
            .saturating_sub(self.start_char.max(start_char))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn unit(start_char: usize, end_char: usize) -> TimedUnit {
        TimedUnit {
            text: "x".repeat(end_char - start_char),
            start_char,
            end_char,
            start_time: 2.0,
            end_time: 2.8,
            confidence: Some(0.9),
        }
    }

    #[test]
    fn test_timed_unit_duration() {
        assert_relative_eq!(unit(0, 4).duration(), 0.8, epsilon = 0.001);
    }

    #[rstest]
    #[case::inside(unit(0, 10), 2, 5, 3)]
    #[case::covering(unit(3, 6), 0, 10, 3)]
    #[case::left_edge(unit(4, 8), 0, 6, 2)]
    #[case::right_edge(unit(4, 8), 6, 12, 2)]
    #[case::touching(unit(0, 4), 4, 8, 0)]
    #[case::disjoint(unit(10, 14), 0, 4, 0)]
    fn test_overlap(
        #[case] u: TimedUnit,
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(u.overlap(start, end), expected);
    }
}
