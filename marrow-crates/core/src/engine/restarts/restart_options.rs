use std::fmt::Display;

use crate::basic_types::sequence_generators::CutoffSequenceType;

/// The counter of the search which is compared against the restart cutoff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RestartCriterion {
    #[default]
    Fails,
    Nodes,
    Backtracks,
}

impl Display for RestartCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartCriterion::Fails => write!(f, "fails"),
            RestartCriterion::Nodes => write!(f, "nodes"),
            RestartCriterion::Backtracks => write!(f, "backtracks"),
        }
    }
}

/// The options which are used by the solver to determine when a restart should occur.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// Decides the sequence based on which the restarts are performed.
    pub sequence_generator_type: CutoffSequenceType,
    /// The first term of the sequence, and its multiplier for the Luby and linear sequences.
    /// For example, monotonic restarts with base interval 100 restart every 100 fails.
    pub base_interval: u64,
    /// The factor of the geometrical sequences.
    pub geometric_coef: f64,
    /// Whether the sequence starts from its first term again after every solution.
    pub reset_cutoff_on_solution: bool,
    /// The policy stops restarting after this many restarts.
    pub max_restarts: u64,
    pub criterion: RestartCriterion,
    /// When disabled, the solver never restarts.
    pub enabled: bool,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            sequence_generator_type: CutoffSequenceType::Luby,
            base_interval: 100,
            geometric_coef: 1.5,
            reset_cutoff_on_solution: false,
            max_restarts: u64::MAX,
            criterion: RestartCriterion::Fails,
            enabled: false,
        }
    }
}
