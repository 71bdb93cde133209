use super::RestartCriterion;
use super::RestartOptions;
use super::RestartPolicy;
use super::SearchProgress;
use crate::basic_types::sequence_generators::CutoffSequence;
use crate::basic_types::sequence_generators::CutoffSequenceType;
use crate::basic_types::sequence_generators::GeometricalCutoff;
use crate::basic_types::sequence_generators::InnerOuterGeometricalCutoff;
use crate::basic_types::sequence_generators::LinearCutoff;
use crate::basic_types::sequence_generators::LubyCutoff;
use crate::basic_types::sequence_generators::MonotonicCutoff;

/// Restarts once the monitored counter reaches the cumulative cutoff.
///
/// After every restart the cutoff becomes the current value of the counter plus the next term of
/// the sequence, so each term is the amount of search allowed between two restarts.
#[derive(Debug)]
pub struct Restarter {
    sequence: Box<dyn CutoffSequence>,
    criterion: RestartCriterion,
    cutoff: u64,
    max_restarts: u64,
    reset_cutoff_on_solution: bool,
    num_restarts: u64,
}

impl Restarter {
    pub fn new(
        mut sequence: Box<dyn CutoffSequence>,
        criterion: RestartCriterion,
        max_restarts: u64,
        reset_cutoff_on_solution: bool,
    ) -> Restarter {
        let cutoff = sequence.next_cutoff();
        Restarter {
            sequence,
            criterion,
            cutoff,
            max_restarts,
            reset_cutoff_on_solution,
            num_restarts: 0,
        }
    }

    pub fn from_options(options: RestartOptions) -> Restarter {
        let sequence: Box<dyn CutoffSequence> = match options.sequence_generator_type {
            CutoffSequenceType::Monotonic => Box::new(MonotonicCutoff::new(options.base_interval)),
            CutoffSequenceType::Linear => Box::new(LinearCutoff::new(options.base_interval)),
            CutoffSequenceType::Geometrical => Box::new(GeometricalCutoff::new(
                options.base_interval,
                options.geometric_coef,
            )),
            CutoffSequenceType::InnerOuterGeometrical => Box::new(
                InnerOuterGeometricalCutoff::new(options.base_interval, options.geometric_coef),
            ),
            CutoffSequenceType::Luby => Box::new(LubyCutoff::new(options.base_interval)),
        };

        Restarter::new(
            sequence,
            options.criterion,
            options.max_restarts,
            options.reset_cutoff_on_solution,
        )
    }

    /// The value of the counter at which the next restart is triggered.
    pub fn cutoff(&self) -> u64 {
        self.cutoff
    }
}

impl RestartPolicy for Restarter {
    fn should_restart(&mut self, progress: &SearchProgress) -> bool {
        self.num_restarts < self.max_restarts && progress.count(self.criterion) >= self.cutoff
    }

    fn on_restart(&mut self, progress: &SearchProgress) {
        self.num_restarts += 1;
        self.cutoff = progress
            .count(self.criterion)
            .saturating_add(self.sequence.next_cutoff());
    }

    fn on_solution(&mut self, progress: &SearchProgress) {
        if self.reset_cutoff_on_solution {
            self.sequence.reset();
            self.cutoff = progress
                .count(self.criterion)
                .saturating_add(self.sequence.next_cutoff());
        }
    }

    fn num_restarts(&self) -> u64 {
        self.num_restarts
    }
}
