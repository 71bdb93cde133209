use std::collections::VecDeque;

use marrow_core::propagation::ReadDomains;
use marrow_core::variables::DomainId;

/// A matching between variables and the values of their domains.
///
/// Values are stored by their index relative to the smallest value of the union of the initial
/// domains. The matching is not trailed: backtracking only grows domains, so a matching which was
/// valid before backtracking stays valid afterwards.
#[derive(Clone, Debug)]
pub(super) struct BipartiteMatching {
    offset: i32,
    value_of_variable: Vec<Option<usize>>,
    variable_of_value: Vec<Option<usize>>,

    /// For every value reached by the breadth-first search, the variable it was reached from.
    reached_from: Vec<Option<usize>>,
    queue: VecDeque<usize>,
    visited_values: Vec<usize>,
}

impl BipartiteMatching {
    pub(super) fn new(num_variables: usize, offset: i32, num_values: usize) -> Self {
        BipartiteMatching {
            offset,
            value_of_variable: vec![None; num_variables],
            variable_of_value: vec![None; num_values],
            reached_from: vec![None; num_values],
            queue: VecDeque::new(),
            visited_values: Vec::new(),
        }
    }

    pub(super) fn num_values(&self) -> usize {
        self.variable_of_value.len()
    }

    pub(super) fn index_of(&self, value: i32) -> usize {
        (value as i64 - self.offset as i64) as usize
    }

    pub(super) fn value_at(&self, index: usize) -> i32 {
        (self.offset as i64 + index as i64) as i32
    }

    pub(super) fn matched_value(&self, variable: usize) -> Option<usize> {
        self.value_of_variable[variable]
    }

    pub(super) fn matched_variable(&self, value: usize) -> Option<usize> {
        self.variable_of_value[value]
    }

    fn link(&mut self, variable: usize, value: usize) {
        self.value_of_variable[variable] = Some(value);
        self.variable_of_value[value] = Some(variable);
    }

    fn unlink(&mut self, variable: usize) {
        if let Some(value) = self.value_of_variable[variable].take() {
            self.variable_of_value[value] = None;
        }
    }

    /// Drops every pair whose value is no longer in the domain of its variable, and returns
    /// whether every variable is matched afterwards.
    pub(super) fn repair(
        &mut self,
        variables: &[DomainId],
        domains: &impl ReadDomains,
    ) -> bool {
        for (index, &variable) in variables.iter().enumerate() {
            if let Some(value) = self.value_of_variable[index] {
                if !domains.contains(variable, self.value_at(value)) {
                    self.unlink(index);
                }
            }
        }

        (0..variables.len()).all(|index| {
            self.value_of_variable[index].is_some() || self.augment(index, variables, domains)
        })
    }

    /// Searches a shortest alternating path from the unmatched `source` to a free value and flips
    /// it. Returns `false` when no such path exists, in which case the maximum matching does not
    /// cover all variables.
    fn augment(
        &mut self,
        source: usize,
        variables: &[DomainId],
        domains: &impl ReadDomains,
    ) -> bool {
        self.queue.clear();
        self.queue.push_back(source);

        let mut free_value = None;
        'search: while let Some(variable) = self.queue.pop_front() {
            for value in domains.values(variables[variable]) {
                let value = self.index_of(value);
                if self.reached_from[value].is_some() {
                    continue;
                }
                self.reached_from[value] = Some(variable);
                self.visited_values.push(value);

                match self.variable_of_value[value] {
                    Some(next) => self.queue.push_back(next),
                    None => {
                        free_value = Some(value);
                        break 'search;
                    }
                }
            }
        }

        if let Some(mut value) = free_value {
            loop {
                let Some(variable) = self.reached_from[value] else {
                    break;
                };
                let previous = self.value_of_variable[variable];
                self.link(variable, value);
                match previous {
                    Some(previous) if variable != source => value = previous,
                    _ => break,
                }
            }
        }

        for value in self.visited_values.drain(..) {
            self.reached_from[value] = None;
        }

        free_value.is_some()
    }
}
