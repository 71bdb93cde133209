use super::DomainUpdate;
use crate::basic_types::Contradiction;
use crate::engine::trailed::Environment;
use crate::engine::trailed::TrailedInteger;

/// A domain which only stores its bounds; values strictly between the bounds cannot be removed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntervalDomain {
    lower_bound: TrailedInteger,
    upper_bound: TrailedInteger,
}

impl IntervalDomain {
    pub(crate) fn new(environment: &mut Environment, lower_bound: i32, upper_bound: i32) -> Self {
        IntervalDomain {
            lower_bound: environment.make_int(lower_bound as i64),
            upper_bound: environment.make_int(upper_bound as i64),
        }
    }

    pub(super) fn lower_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.lower_bound) as i32
    }

    pub(super) fn upper_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.upper_bound) as i32
    }

    pub(super) fn size(&self, environment: &Environment) -> usize {
        (environment.read(self.upper_bound) - environment.read(self.lower_bound) + 1) as usize
    }

    pub(super) fn contains(&self, environment: &Environment, value: i32) -> bool {
        self.lower_bound(environment) <= value && value <= self.upper_bound(environment)
    }

    pub(super) fn next_value(&self, environment: &Environment, value: i32) -> i32 {
        if value < self.lower_bound(environment) {
            self.lower_bound(environment)
        } else if value >= self.upper_bound(environment) {
            i32::MAX
        } else {
            value + 1
        }
    }

    pub(super) fn previous_value(&self, environment: &Environment, value: i32) -> i32 {
        if value > self.upper_bound(environment) {
            self.upper_bound(environment)
        } else if value <= self.lower_bound(environment) {
            i32::MIN
        } else {
            value - 1
        }
    }

    pub(super) fn run_end(&self, environment: &Environment, _value: i32) -> i32 {
        self.upper_bound(environment)
    }

    pub(super) fn run_start(&self, environment: &Environment, _value: i32) -> i32 {
        self.lower_bound(environment)
    }

    pub(super) fn remove_interval(
        &self,
        update: &mut DomainUpdate<'_>,
        from: i64,
        to: i64,
    ) -> Result<bool, Contradiction> {
        let lower_bound = update.environment.read(self.lower_bound);
        let upper_bound = update.environment.read(self.upper_bound);
        let from = from.max(lower_bound);
        let to = to.min(upper_bound);

        if from > to {
            return Ok(false);
        }
        if from == lower_bound && to == upper_bound {
            return Err(update.empty());
        }

        if from == lower_bound {
            update.environment.assign(self.lower_bound, to + 1);
        } else if to == upper_bound {
            update.environment.assign(self.upper_bound, from - 1);
        } else {
            // Holes cannot be represented.
            return Ok(false);
        }
        update.record_removal(from, to);
        Ok(true)
    }
}
