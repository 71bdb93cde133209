use super::IntegerDomain;
use crate::engine::trailed::Environment;

/// The members of a domain in increasing order, or decreasing order when iterated from the back.
///
/// The iterator reads the domain as it is when the iterator is advanced; it does not allocate.
#[derive(Debug, Clone)]
pub struct DomainValues<'a> {
    domain: &'a IntegerDomain,
    environment: &'a Environment,
    front: i64,
    back: i64,
}

impl<'a> DomainValues<'a> {
    pub(super) fn new(domain: &'a IntegerDomain, environment: &'a Environment) -> Self {
        DomainValues {
            domain,
            environment,
            front: domain.lower_bound(environment) as i64,
            back: domain.upper_bound(environment) as i64,
        }
    }
}

impl Iterator for DomainValues<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.front > self.back {
            return None;
        }
        let value = self.front;
        self.front = if value == self.back {
            value + 1
        } else {
            self.domain.next_value(self.environment, value as i32) as i64
        };
        Some(value as i32)
    }
}

impl DoubleEndedIterator for DomainValues<'_> {
    fn next_back(&mut self) -> Option<i32> {
        if self.front > self.back {
            return None;
        }
        let value = self.back;
        self.back = if value == self.front {
            value - 1
        } else {
            self.domain.previous_value(self.environment, value as i32) as i64
        };
        Some(value as i32)
    }
}

/// The maximal runs of consecutive members of a domain, as inclusive `(start, end)` pairs.
#[derive(Debug, Clone)]
pub struct DomainRanges<'a> {
    domain: &'a IntegerDomain,
    environment: &'a Environment,
    front: i64,
    back: i64,
}

impl<'a> DomainRanges<'a> {
    pub(super) fn new(domain: &'a IntegerDomain, environment: &'a Environment) -> Self {
        DomainRanges {
            domain,
            environment,
            front: domain.lower_bound(environment) as i64,
            back: domain.upper_bound(environment) as i64,
        }
    }
}

impl Iterator for DomainRanges<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.front > self.back {
            return None;
        }
        let start = self.front;
        let end = (self.domain.run_end(self.environment, start as i32) as i64).min(self.back);
        self.front = if end == self.back {
            end + 1
        } else {
            self.domain.next_value(self.environment, end as i32) as i64
        };
        Some((start as i32, end as i32))
    }
}

impl DoubleEndedIterator for DomainRanges<'_> {
    fn next_back(&mut self) -> Option<(i32, i32)> {
        if self.front > self.back {
            return None;
        }
        let end = self.back;
        let start = (self.domain.run_start(self.environment, end as i32) as i64).max(self.front);
        self.back = if start == self.front {
            start - 1
        } else {
            self.domain.previous_value(self.environment, start as i32) as i64
        };
        Some((start as i32, end as i32))
    }
}
