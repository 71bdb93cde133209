//! Rounding divisions used by arithmetic propagators.

/// Floor and ceiling division for integers.
///
/// Propagators normalise coefficients before dividing, so the divisor is expected to be positive.
pub trait NumExt {
    /// Division rounding towards positive infinity.
    fn div_ceil_positive(self, divisor: Self) -> Self;

    /// Division rounding towards negative infinity; not the same as truncation for negative
    /// dividends.
    fn div_floor_positive(self, divisor: Self) -> Self;
}

impl NumExt for i64 {
    fn div_ceil_positive(self, divisor: Self) -> Self {
        crate::marrow_assert_simple!(divisor > 0, "division by non-positive divisor {divisor}");
        let quotient = self / divisor;
        if self % divisor > 0 {
            quotient + 1
        } else {
            quotient
        }
    }

    fn div_floor_positive(self, divisor: Self) -> Self {
        crate::marrow_assert_simple!(divisor > 0, "division by non-positive divisor {divisor}");
        let quotient = self / divisor;
        if self % divisor < 0 {
            quotient - 1
        } else {
            quotient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn rounding_follows_the_sign_of_the_dividend() {
        assert_eq!(7_i64.div_floor_positive(2), 3);
        assert_eq!(7_i64.div_ceil_positive(2), 4);
        assert_eq!((-7_i64).div_floor_positive(2), -4);
        assert_eq!((-7_i64).div_ceil_positive(2), -3);
        assert_eq!((-8_i64).div_floor_positive(4), -2);
        assert_eq!(8_i64.div_ceil_positive(4), 2);
    }
}
