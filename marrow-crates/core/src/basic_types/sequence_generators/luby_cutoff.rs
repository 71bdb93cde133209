use super::CutoffSequence;

/// The Luby sequence `1, 1, 2, 1, 1, 2, 4, 1, 1, 2, ...` multiplied by a scale, generated with
/// Knuth's reluctant doubling in constant time per term.
#[derive(Debug, Copy, Clone)]
pub struct LubyCutoff {
    scale: u64,
    u: i64,
    v: i64,
}

impl LubyCutoff {
    pub fn new(scale: u64) -> LubyCutoff {
        LubyCutoff { scale, u: 1, v: 1 }
    }
}

impl CutoffSequence for LubyCutoff {
    fn next_cutoff(&mut self) -> u64 {
        let term = self.v;
        if (self.u & -self.u) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        term as u64 * self.scale
    }

    fn reset(&mut self) {
        self.u = 1;
        self.v = 1;
    }
}
