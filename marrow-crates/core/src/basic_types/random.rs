use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

use crate::marrow_assert_simple;

/// Source of randomness for the value selectors, abstracted so that tests can plug in a seeded
/// generator and obtain the same search tree on every run.
pub trait Random: Debug {
    /// Samples uniformly from `[lower_bound, upper_bound]`.
    fn generate_i32_in_range(&mut self, lower_bound: i32, upper_bound: i32) -> i32;

    /// Samples uniformly from `[0, bound)`.
    fn generate_usize_below(&mut self, bound: usize) -> usize;

    fn generate_bool(&mut self, probability: f64) -> bool;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_i32_in_range(&mut self, lower_bound: i32, upper_bound: i32) -> i32 {
        marrow_assert_simple!(lower_bound <= upper_bound);
        self.gen_range(lower_bound..=upper_bound)
    }

    fn generate_usize_below(&mut self, bound: usize) -> usize {
        marrow_assert_simple!(bound > 0);
        self.gen_range(0..bound)
    }

    fn generate_bool(&mut self, probability: f64) -> bool {
        self.gen_bool(probability)
    }
}
