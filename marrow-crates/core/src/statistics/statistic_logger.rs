use std::fmt::Display;

use super::statistic_logging::log_statistic;

/// Writes statistics under a name prefix, e.g. `propagator_AllDifferent_0_num_prunings`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new(name_prefix: impl Display) -> Self {
        Self {
            name_prefix: name_prefix.to_string(),
        }
    }

    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        if self.name_prefix.is_empty() {
            return StatisticLogger::new(addition_to_prefix);
        }
        Self {
            name_prefix: format!("{}_{}", self.name_prefix, addition_to_prefix),
        }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name_prefix, value);
    }
}

impl std::fmt::Write for StatisticLogger {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        log_statistic(&self.name_prefix, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new("solver").attach_to_prefix("num_fails");
        assert_eq!(logger.name_prefix, "solver_num_fails");

        let logger = StatisticLogger::default().attach_to_prefix("num_nodes");
        assert_eq!(logger.name_prefix, "num_nodes");
    }
}
