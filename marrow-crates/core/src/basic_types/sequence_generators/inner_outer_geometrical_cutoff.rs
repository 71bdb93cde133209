use super::CutoffSequence;

/// Geometric restarts with two nested geometric progressions: the inner term grows by `g` until
/// it overtakes the outer term, at which point the outer term grows and the inner one starts
/// again from `s`.
///
/// For `s = 1` and `g = 2` this yields `1, 1, 2, 1, 2, 4, 1, 2, 4, 8, ...`.
#[derive(Debug, Copy, Clone)]
pub struct InnerOuterGeometricalCutoff {
    scale: u64,
    factor: f64,
    inner: i32,
    outer: i32,
}

impl InnerOuterGeometricalCutoff {
    pub fn new(scale: u64, factor: f64) -> InnerOuterGeometricalCutoff {
        InnerOuterGeometricalCutoff {
            scale,
            factor,
            inner: 0,
            outer: 0,
        }
    }
}

impl CutoffSequence for InnerOuterGeometricalCutoff {
    fn next_cutoff(&mut self) -> u64 {
        let term = (self.scale as f64 * self.factor.powi(self.inner)).ceil() as u64;
        self.inner += 1;
        if self.inner > self.outer {
            self.outer += 1;
            self.inner = 0;
        }
        term
    }

    fn reset(&mut self) {
        self.inner = 0;
        self.outer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_sequence_restarts_when_it_overtakes_the_outer_one() {
        let mut sequence = InnerOuterGeometricalCutoff::new(1, 2.0);
        let terms = (0..10).map(|_| sequence.next_cutoff()).collect::<Vec<_>>();
        assert_eq!(terms, vec![1, 1, 2, 1, 2, 4, 1, 2, 4, 8]);
    }

    #[test]
    fn reset_goes_back_to_the_first_term() {
        let mut sequence = InnerOuterGeometricalCutoff::new(10, 1.5);
        let first = (0..5).map(|_| sequence.next_cutoff()).collect::<Vec<_>>();
        sequence.reset();
        let second = (0..5).map(|_| sequence.next_cutoff()).collect::<Vec<_>>();
        assert_eq!(first, second);
    }
}
