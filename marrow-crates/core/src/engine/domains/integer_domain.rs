use super::BitSetDomain;
use super::DomainRanges;
use super::DomainValues;
use super::IntervalDomain;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::engine::delta::IntDelta;
use crate::engine::trailed::Environment;
use crate::engine::variables::DomainId;

/// Everything a domain needs to perform a change: the backtrackable storage, the delta in which
/// removals are recorded and who performs the change.
#[derive(Debug)]
pub(crate) struct DomainUpdate<'a> {
    pub(crate) environment: &'a mut Environment,
    pub(crate) delta: &'a mut IntDelta,
    pub(crate) domain: DomainId,
    pub(crate) cause: Cause,
}

impl DomainUpdate<'_> {
    pub(super) fn record_removal(&mut self, from: i64, to: i64) {
        let node_stamp = self.environment.node_stamp();
        self.delta
            .record(node_stamp, from as i32, to as i32, self.cause);
    }

    pub(super) fn empty(&self) -> Contradiction {
        Contradiction::empty_domain(self.domain, self.cause)
    }
}

/// The domain of an integer variable, either a pair of bounds or an explicit set of members.
#[derive(Clone, Copy, Debug)]
pub(crate) enum IntegerDomain {
    Interval(IntervalDomain),
    BitSet(BitSetDomain),
}

macro_rules! dispatch {
    ($self:ident, $domain:ident => $body:expr) => {
        match $self {
            IntegerDomain::Interval($domain) => $body,
            IntegerDomain::BitSet($domain) => $body,
        }
    };
}

impl IntegerDomain {
    pub(crate) fn lower_bound(&self, environment: &Environment) -> i32 {
        dispatch!(self, domain => domain.lower_bound(environment))
    }

    pub(crate) fn upper_bound(&self, environment: &Environment) -> i32 {
        dispatch!(self, domain => domain.upper_bound(environment))
    }

    pub(crate) fn size(&self, environment: &Environment) -> usize {
        dispatch!(self, domain => domain.size(environment))
    }

    pub(crate) fn contains(&self, environment: &Environment, value: i32) -> bool {
        dispatch!(self, domain => domain.contains(environment, value))
    }

    /// The smallest member larger than `value`, or [`i32::MAX`] if there is none.
    pub(crate) fn next_value(&self, environment: &Environment, value: i32) -> i32 {
        dispatch!(self, domain => domain.next_value(environment, value))
    }

    /// The largest member smaller than `value`, or [`i32::MIN`] if there is none.
    pub(crate) fn previous_value(&self, environment: &Environment, value: i32) -> i32 {
        dispatch!(self, domain => domain.previous_value(environment, value))
    }

    /// The last member of the run of consecutive members which contains `value`.
    pub(crate) fn run_end(&self, environment: &Environment, value: i32) -> i32 {
        dispatch!(self, domain => domain.run_end(environment, value))
    }

    /// The first member of the run of consecutive members which contains `value`.
    pub(crate) fn run_start(&self, environment: &Environment, value: i32) -> i32 {
        dispatch!(self, domain => domain.run_start(environment, value))
    }

    pub(crate) fn values<'a>(&'a self, environment: &'a Environment) -> DomainValues<'a> {
        DomainValues::new(self, environment)
    }

    pub(crate) fn ranges<'a>(&'a self, environment: &'a Environment) -> DomainRanges<'a> {
        DomainRanges::new(self, environment)
    }

    pub(crate) fn remove_value(
        &self,
        update: &mut DomainUpdate<'_>,
        value: i32,
    ) -> Result<bool, Contradiction> {
        dispatch!(self, domain => domain.remove_interval(update, value as i64, value as i64))
    }

    /// Removes every member in `[from, to]`.
    pub(crate) fn remove_interval(
        &self,
        update: &mut DomainUpdate<'_>,
        from: i32,
        to: i32,
    ) -> Result<bool, Contradiction> {
        dispatch!(self, domain => domain.remove_interval(update, from as i64, to as i64))
    }

    pub(crate) fn update_lower_bound(
        &self,
        update: &mut DomainUpdate<'_>,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        dispatch!(self, domain => domain.remove_interval(update, i64::MIN, bound as i64 - 1))
    }

    pub(crate) fn update_upper_bound(
        &self,
        update: &mut DomainUpdate<'_>,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        dispatch!(self, domain => domain.remove_interval(update, bound as i64 + 1, i64::MAX))
    }

    pub(crate) fn instantiate(
        &self,
        update: &mut DomainUpdate<'_>,
        value: i32,
    ) -> Result<bool, Contradiction> {
        if !self.contains(update.environment, value) {
            return Err(update.empty());
        }
        let below = self.update_lower_bound(update, value)?;
        let above = self.update_upper_bound(update, value)?;
        Ok(below || above)
    }
}
