use super::CutoffSequence;

/// The sequence `s, 2s, 3s, ...`.
#[derive(Debug, Copy, Clone)]
pub struct LinearCutoff {
    scale: u64,
    terms_generated: u64,
}

impl LinearCutoff {
    pub fn new(scale: u64) -> LinearCutoff {
        LinearCutoff {
            scale,
            terms_generated: 0,
        }
    }
}

impl CutoffSequence for LinearCutoff {
    fn next_cutoff(&mut self) -> u64 {
        self.terms_generated += 1;
        self.scale * self.terms_generated
    }

    fn reset(&mut self) {
        self.terms_generated = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_grow_by_the_scale() {
        let mut sequence = LinearCutoff::new(3);
        let terms = (0..4).map(|_| sequence.next_cutoff()).collect::<Vec<_>>();
        assert_eq!(terms, vec![3, 6, 9, 12]);

        sequence.reset();
        assert_eq!(sequence.next_cutoff(), 3);
    }
}
