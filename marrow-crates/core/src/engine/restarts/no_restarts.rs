use super::RestartPolicy;
use super::SearchProgress;

/// A policy which never restarts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRestarts;

impl RestartPolicy for NoRestarts {
    fn should_restart(&mut self, _progress: &SearchProgress) -> bool {
        false
    }

    fn on_restart(&mut self, _progress: &SearchProgress) {}

    fn num_restarts(&self) -> u64 {
        0
    }
}
