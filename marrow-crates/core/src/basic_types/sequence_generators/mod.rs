//! Cutoff sequences which decide how much search happens between two restarts.
mod cutoff_sequence_type;
mod geometrical_cutoff;
mod inner_outer_geometrical_cutoff;
mod linear_cutoff;
mod luby_cutoff;
mod monotonic_cutoff;

use std::fmt::Debug;

pub use cutoff_sequence_type::CutoffSequenceType;
pub use geometrical_cutoff::GeometricalCutoff;
pub use inner_outer_geometrical_cutoff::InnerOuterGeometricalCutoff;
pub use linear_cutoff::LinearCutoff;
pub use luby_cutoff::LubyCutoff;
pub use monotonic_cutoff::MonotonicCutoff;

/// A generator of restart thresholds.
pub trait CutoffSequence: Debug {
    /// The next term of the sequence.
    fn next_cutoff(&mut self) -> u64;

    /// Moves back to the first term of the sequence.
    fn reset(&mut self);
}
