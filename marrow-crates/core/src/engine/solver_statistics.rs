use std::time::Duration;

use super::restarts::SearchProgress;
use crate::create_statistics_struct;
use crate::statistics::log_statistic;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of the search loop.
    EngineStatistics {
        /// The number of decisions taken by the solver
        num_nodes: u64,
        /// The number of failed fixpoints, including failed refutations
        num_fails: u64,
        num_solutions: u64,
        /// The number of times a decision was refuted
        num_backtracks: u64,
        /// The number of conflicts after which the solver skipped at least one open decision
        num_backjumps: u64,
        /// The total number of open decisions skipped by backjumps
        sum_of_backjumps: u64,
        num_restarts: u64,
        /// The deepest decision path seen so far
        peak_depth: u64,
        /// The number of decision nogoods posted at restarts
        num_nogoods: u64,
});

/// The counters which are exposed to the user of the solver.
#[derive(Debug, Default)]
pub struct SolverStatistics {
    pub(crate) engine_statistics: EngineStatistics,
    pub(crate) time_spent_in_solver: Duration,
    pub(crate) best_objective: Option<i32>,
}

impl SolverStatistics {
    pub fn num_solutions(&self) -> u64 {
        self.engine_statistics.num_solutions
    }

    pub fn num_fails(&self) -> u64 {
        self.engine_statistics.num_fails
    }

    pub fn num_nodes(&self) -> u64 {
        self.engine_statistics.num_nodes
    }

    pub fn num_backtracks(&self) -> u64 {
        self.engine_statistics.num_backtracks
    }

    pub fn num_backjumps(&self) -> u64 {
        self.engine_statistics.num_backjumps
    }

    pub fn num_restarts(&self) -> u64 {
        self.engine_statistics.num_restarts
    }

    pub fn peak_depth(&self) -> u64 {
        self.engine_statistics.peak_depth
    }

    pub fn time_spent_in_solver(&self) -> Duration {
        self.time_spent_in_solver
    }

    /// The objective value of the best solution found by the last optimisation call.
    pub fn best_objective(&self) -> Option<i32> {
        self.best_objective
    }

    pub(crate) fn search_progress(&self) -> SearchProgress {
        SearchProgress {
            fails: self.engine_statistics.num_fails,
            nodes: self.engine_statistics.num_nodes,
            backtracks: self.engine_statistics.num_backtracks,
        }
    }

    pub(crate) fn log(&self, statistic_logger: StatisticLogger, verbose: bool) {
        log_statistic("nodes", self.engine_statistics.num_nodes);
        log_statistic("failures", self.engine_statistics.num_fails);
        log_statistic("solutions", self.engine_statistics.num_solutions);
        log_statistic("restarts", self.engine_statistics.num_restarts);
        log_statistic("peakDepth", self.engine_statistics.peak_depth);
        log_statistic("solveTime", self.time_spent_in_solver.as_secs_f64());
        if let Some(best_objective) = self.best_objective {
            log_statistic("objective", best_objective);
        }
        if verbose {
            self.engine_statistics.log(statistic_logger);
        }
    }
}
