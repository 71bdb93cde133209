use super::CutoffSequence;

/// Returns the same cutoff every time.
#[derive(Debug, Copy, Clone)]
pub struct MonotonicCutoff {
    cutoff: u64,
}

impl MonotonicCutoff {
    pub fn new(cutoff: u64) -> MonotonicCutoff {
        MonotonicCutoff { cutoff }
    }
}

impl CutoffSequence for MonotonicCutoff {
    fn next_cutoff(&mut self) -> u64 {
        self.cutoff
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_term_is_the_constant() {
        let mut sequence = MonotonicCutoff::new(250);
        assert!((0..100).all(|_| sequence.next_cutoff() == 250));
    }
}
