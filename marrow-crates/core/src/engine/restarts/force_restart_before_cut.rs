use super::RestartPolicy;
use super::SearchProgress;

/// Restarts immediately after a new incumbent was recorded, and otherwise defers to the wrapped
/// policy.
///
/// The forced restart takes priority over the cutoff of the wrapped policy and does not count
/// towards it.
#[derive(Debug)]
pub struct ForceRestartBeforeCut<Policy> {
    policy: Policy,
    restart_requested: bool,
    num_forced_restarts: u64,
}

impl<Policy> ForceRestartBeforeCut<Policy> {
    pub fn new(policy: Policy) -> Self {
        ForceRestartBeforeCut {
            policy,
            restart_requested: false,
            num_forced_restarts: 0,
        }
    }
}

impl<Policy: RestartPolicy> RestartPolicy for ForceRestartBeforeCut<Policy> {
    fn should_restart(&mut self, progress: &SearchProgress) -> bool {
        self.restart_requested || self.policy.should_restart(progress)
    }

    fn on_restart(&mut self, progress: &SearchProgress) {
        if self.restart_requested {
            self.restart_requested = false;
            self.num_forced_restarts += 1;
        } else {
            self.policy.on_restart(progress);
        }
    }

    fn on_solution(&mut self, progress: &SearchProgress) {
        self.policy.on_solution(progress);
    }

    fn on_new_bound(&mut self) {
        self.restart_requested = true;
        self.policy.on_new_bound();
    }

    fn num_restarts(&self) -> u64 {
        self.num_forced_restarts + self.policy.num_restarts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restarts::NoRestarts;

    #[test]
    fn new_bound_forces_a_single_restart() {
        let mut policy = ForceRestartBeforeCut::new(NoRestarts);
        let progress = SearchProgress::default();
        assert!(!policy.should_restart(&progress));

        policy.on_new_bound();
        assert!(policy.should_restart(&progress));
        policy.on_restart(&progress);

        assert!(!policy.should_restart(&progress));
        assert_eq!(policy.num_restarts(), 1);
    }
}
