use super::CutoffSequence;
use crate::marrow_assert_simple;

/// The sequence `ceil(s * g^n)` for `n = 0, 1, ...`.
///
/// For factors close to one the rounded terms can repeat (`ceil(1.1) == ceil(1.21)`); every
/// term is therefore at least one more than the previous one, which makes the sequence strictly
/// increasing for any `g > 1`.
#[derive(Debug, Copy, Clone)]
pub struct GeometricalCutoff {
    scale: u64,
    factor: f64,
    exponent: i32,
    previous: u64,
}

impl GeometricalCutoff {
    pub fn new(scale: u64, factor: f64) -> GeometricalCutoff {
        marrow_assert_simple!(scale >= 1, "the scale of a geometrical cutoff must be positive");
        marrow_assert_simple!(factor > 1.0, "the factor of a geometrical cutoff must exceed 1");
        GeometricalCutoff {
            scale,
            factor,
            exponent: 0,
            previous: 0,
        }
    }
}

impl CutoffSequence for GeometricalCutoff {
    fn next_cutoff(&mut self) -> u64 {
        let term = (self.scale as f64 * self.factor.powi(self.exponent)).ceil() as u64;
        self.exponent += 1;
        self.previous = term.max(self.previous.saturating_add(1));
        self.previous
    }

    fn reset(&mut self) {
        self.exponent = 0;
        self.previous = 0;
    }
}
