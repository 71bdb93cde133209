use super::DomainUpdate;
use crate::basic_types::Contradiction;
use crate::engine::trailed::Environment;
use crate::engine::trailed::TrailedBitSet;
use crate::engine::trailed::TrailedInteger;
use crate::marrow_assert_moderate;

/// An enumerated domain: a bitset of members over `[offset, offset + capacity)` together with the
/// cached bounds and size.
///
/// Bits outside `[lower_bound, upper_bound]` are always cleared, and both bounds are members.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BitSetDomain {
    offset: i64,
    members: TrailedBitSet,
    lower_bound: TrailedInteger,
    upper_bound: TrailedInteger,
    size: TrailedInteger,
}

impl BitSetDomain {
    /// Creates the domain from strictly increasing `values`.
    pub(crate) fn new(environment: &mut Environment, values: &[i32]) -> Self {
        marrow_assert_moderate!(!values.is_empty());
        marrow_assert_moderate!(values.windows(2).all(|pair| pair[0] < pair[1]));

        let first = values[0] as i64;
        let last = values[values.len() - 1] as i64;
        let members = environment.make_bit_set((last - first + 1) as usize);
        for &value in values {
            environment.set_bit(members, (value as i64 - first) as usize);
        }

        BitSetDomain {
            offset: first,
            members,
            lower_bound: environment.make_int(first),
            upper_bound: environment.make_int(last),
            size: environment.make_int(values.len() as i64),
        }
    }

    fn index(&self, value: i64) -> usize {
        (value - self.offset) as usize
    }

    fn value(&self, index: usize) -> i64 {
        index as i64 + self.offset
    }

    pub(super) fn lower_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.lower_bound) as i32
    }

    pub(super) fn upper_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.upper_bound) as i32
    }

    pub(super) fn size(&self, environment: &Environment) -> usize {
        environment.read(self.size) as usize
    }

    pub(super) fn contains(&self, environment: &Environment, value: i32) -> bool {
        self.lower_bound(environment) <= value
            && value <= self.upper_bound(environment)
            && environment.contains_bit(self.members, self.index(value as i64))
    }

    pub(super) fn next_value(&self, environment: &Environment, value: i32) -> i32 {
        if value < self.lower_bound(environment) {
            return self.lower_bound(environment);
        }
        if value >= self.upper_bound(environment) {
            return i32::MAX;
        }
        environment
            .next_set_bit(self.members, self.index(value as i64 + 1))
            .map_or(i32::MAX, |index| self.value(index) as i32)
    }

    pub(super) fn previous_value(&self, environment: &Environment, value: i32) -> i32 {
        if value > self.upper_bound(environment) {
            return self.upper_bound(environment);
        }
        if value <= self.lower_bound(environment) {
            return i32::MIN;
        }
        environment
            .previous_set_bit(self.members, self.index(value as i64 - 1))
            .map_or(i32::MIN, |index| self.value(index) as i32)
    }

    pub(super) fn run_end(&self, environment: &Environment, value: i32) -> i32 {
        let first_gap = environment.next_clear_bit(self.members, self.index(value as i64));
        (self.value(first_gap) - 1).min(environment.read(self.upper_bound)) as i32
    }

    pub(super) fn run_start(&self, environment: &Environment, value: i32) -> i32 {
        let start = environment
            .previous_clear_bit(self.members, self.index(value as i64))
            .map_or(0, |gap| gap + 1);
        self.value(start).max(environment.read(self.lower_bound)) as i32
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

        let first = self.index(from);
        let last = self.index(to);
        let num_removed = update.environment.count_bits(self.members, first, last);
        if num_removed == 0 {
            return Ok(false);
        }
        if num_removed as i64 == update.environment.read(self.size) {
            return Err(update.empty());
        }

        let mut index = first;
        while let Some(start) = update
            .environment
            .next_set_bit(self.members, index)
            .filter(|&start| start <= last)
        {
            let end = (update.environment.next_clear_bit(self.members, start) - 1).min(last);
            update.record_removal(self.value(start), self.value(end));
            index = end + 1;
        }

        update.environment.clear_bit_range(self.members, first, last);
        let _ = update
            .environment
            .add_assign(self.size, -(num_removed as i64));

        if from == lower_bound {
            if let Some(new_lower_bound) = update.environment.next_set_bit(self.members, last + 1) {
                update
                    .environment
                    .assign(self.lower_bound, self.value(new_lower_bound));
            }
        }
        if to == upper_bound {
            if let Some(new_upper_bound) = first
                .checked_sub(1)
                .and_then(|index| update.environment.previous_set_bit(self.members, index))
            {
                update
                    .environment
                    .assign(self.upper_bound, self.value(new_upper_bound));
            }
        }

        Ok(true)
    }
}
