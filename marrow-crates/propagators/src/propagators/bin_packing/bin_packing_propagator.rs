use std::cmp::Reverse;

use itertools::Itertools;
use marrow_core::create_statistics_struct;
use marrow_core::marrow_assert_simple;
use marrow_core::propagation::Contradiction;
use marrow_core::propagation::DeltaMonitor;
use marrow_core::propagation::DomainEvent;
use marrow_core::propagation::DomainEvents;
use marrow_core::propagation::Domains;
use marrow_core::propagation::EnqueueDecision;
use marrow_core::propagation::EntailmentStatus;
use marrow_core::propagation::LocalId;
use marrow_core::propagation::PropagationContext;
use marrow_core::propagation::PropagationStatus;
use marrow_core::propagation::Propagator;
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::propagation::PropagatorConstructorContext;
use marrow_core::propagation::ReadDomains;
use marrow_core::propagation::SetType;
use marrow_core::propagation::TrailedInteger;
use marrow_core::propagation::TrailedSet;
use marrow_core::statistics::Statistic;
use marrow_core::statistics::StatisticLogger;
use marrow_core::variables::DomainId;

use super::no_sum::no_sum;

/// The [`PropagatorConstructor`] for the [`BinPackingPropagator`].
///
/// Item `i` of size `sizes[i]` is packed into bin `items[i] - offset`; the load of bin `j` is the
/// sum of the sizes of the items packed into it and equals `loads[j]`.
#[derive(Clone, Debug)]
pub struct BinPackingPropagatorArgs {
    pub items: Vec<DomainId>,
    pub sizes: Vec<i32>,
    pub loads: Vec<DomainId>,
    pub offset: i32,
    /// Whether the bin loads are additionally filtered with the subset sum reasoning of NoSum.
    pub no_sum_filtering: bool,
}

impl PropagatorConstructor for BinPackingPropagatorArgs {
    type PropagatorImpl = BinPackingPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinPackingPropagatorArgs {
            items,
            sizes,
            loads,
            offset,
            no_sum_filtering,
        } = self;
        marrow_assert_simple!(
            items.len() == sizes.len(),
            "every item needs exactly one size"
        );
        marrow_assert_simple!(sizes.iter().all(|&size| size >= 0), "sizes are non-negative");

        for (index, &item) in items.iter().enumerate() {
            context.register(item, DomainEvents::ANY_INT, LocalId::from(index as u32));
        }
        for (index, &load) in loads.iter().enumerate() {
            context.register(
                load,
                DomainEvents::BOUNDS,
                LocalId::from((items.len() + index) as u32),
            );
        }

        let monitors = items
            .iter()
            .map(|&item| context.delta_monitor(item))
            .collect();

        let mut possible = Vec::with_capacity(loads.len());
        let mut required = Vec::with_capacity(loads.len());
        let mut possible_load = Vec::with_capacity(loads.len());
        let mut required_load = Vec::with_capacity(loads.len());
        for bin in 0..loads.len() {
            let value = offset + bin as i32;
            let possible_items = context.new_trailed_set(SetType::BitSet, items.len());
            let required_items = context.new_trailed_set(SetType::BitSet, items.len());
            let mut possible_sum = 0;
            let mut required_sum = 0;
            for (index, &item) in items.iter().enumerate() {
                if !context.domains().contains(item, value) {
                    continue;
                }
                let _ = context.trailed_set_insert(possible_items, index);
                possible_sum += sizes[index] as i64;
                if context.domains().is_fixed(item) {
                    let _ = context.trailed_set_insert(required_items, index);
                    required_sum += sizes[index] as i64;
                }
            }
            possible.push(possible_items);
            required.push(required_items);
            possible_load.push(context.new_trailed_integer(possible_sum));
            required_load.push(context.new_trailed_integer(required_sum));
        }

        let by_decreasing_size: Vec<usize> = (0..items.len())
            .sorted_by_key(|&index| Reverse(sizes[index]))
            .collect();

        BinPackingPropagator {
            dirty_items: Vec::with_capacity(items.len()),
            is_dirty: vec![false; items.len()],
            bins_to_process: vec![false; loads.len()],
            sizes: sizes.into_iter().map(i64::from).collect(),
            items: items.into(),
            loads: loads.into(),
            offset,
            no_sum_filtering,
            monitors,
            possible: possible.into(),
            required: required.into(),
            possible_load: possible_load.into(),
            required_load: required_load.into(),
            by_decreasing_size: by_decreasing_size.into(),
            candidate_sizes: Vec::new(),
            removed_values: Vec::new(),
            statistics: BinPackingStatistics::default(),
        }
    }
}

create_statistics_struct!(BinPackingStatistics {
    num_calls: usize,
    num_no_sum_conflicts: usize,
    num_no_sum_prunings: usize,
});

/// Propagator for bin packing, following Shaw.
///
/// For every bin the propagator keeps the items which may still be packed into it and the items
/// which are packed into it, together with their total sizes. Items are committed to or eliminated
/// from a bin when the load bounds leave no alternative; NoSum additionally rules out loads which
/// no subset of the remaining items can reach.
///
/// Removals from the item variables are read through delta monitors, so only the bins of removed
/// values are revisited.
#[derive(Clone, Debug)]
pub struct BinPackingPropagator {
    items: Box<[DomainId]>,
    sizes: Box<[i64]>,
    loads: Box<[DomainId]>,
    offset: i32,
    no_sum_filtering: bool,

    monitors: Box<[DeltaMonitor]>,
    /// Per bin, the items which can still be packed into it.
    possible: Box<[TrailedSet]>,
    /// Per bin, the items which are packed into it.
    required: Box<[TrailedSet]>,
    possible_load: Box<[TrailedInteger]>,
    required_load: Box<[TrailedInteger]>,

    by_decreasing_size: Box<[usize]>,
    dirty_items: Vec<usize>,
    is_dirty: Vec<bool>,
    bins_to_process: Vec<bool>,
    candidate_sizes: Vec<i64>,
    removed_values: Vec<i32>,
    statistics: BinPackingStatistics,
}

impl BinPackingPropagator {
    fn bin_of(&self, value: i32) -> Option<usize> {
        let bin = value as i64 - self.offset as i64;
        (0..self.loads.len() as i64)
            .contains(&bin)
            .then_some(bin as usize)
    }

    fn bin_value(&self, bin: usize) -> i32 {
        self.offset + bin as i32
    }

    fn mark_bin(&mut self, bin: usize) {
        self.bins_to_process[bin] = true;
    }

    fn remove_item_from_bin(
        &mut self,
        context: &mut PropagationContext,
        bin: usize,
        item: usize,
    ) -> PropagationStatus {
        if !context.trailed_set_remove(self.possible[bin], item) {
            return Ok(());
        }
        let possible_load = context.add_assign_trailed(self.possible_load[bin], -self.sizes[item]);
        let _ = context.set_upper_bound(self.loads[bin], saturate(possible_load))?;
        self.mark_bin(bin);

        if let Some(value) = context.fixed_value(self.items[item]) {
            if let Some(packed) = self.bin_of(value) {
                self.commit_item_to_bin(context, packed, item)?;
            }
        }
        Ok(())
    }

    fn commit_item_to_bin(
        &mut self,
        context: &mut PropagationContext,
        bin: usize,
        item: usize,
    ) -> PropagationStatus {
        if !context.trailed_set_insert(self.required[bin], item) {
            return Ok(());
        }
        let required_load = context.add_assign_trailed(self.required_load[bin], self.sizes[item]);
        let _ = context.set_lower_bound(self.loads[bin], saturate(required_load))?;
        self.mark_bin(bin);

        for other in 0..self.loads.len() {
            if other != bin && context.trailed_set_remove(self.possible[other], item) {
                let possible_load =
                    context.add_assign_trailed(self.possible_load[other], -self.sizes[item]);
                let _ = context.set_upper_bound(self.loads[other], saturate(possible_load))?;
                self.mark_bin(other);
            }
        }
        Ok(())
    }

    /// Removes the item from every bin its domain no longer contains, and commits it when it is
    /// fixed.
    fn compare_item_with_bins(
        &mut self,
        context: &mut PropagationContext,
        item: usize,
    ) -> PropagationStatus {
        let variable = self.items[item];
        match context.fixed_value(variable) {
            Some(value) => {
                if let Some(bin) = self.bin_of(value) {
                    self.commit_item_to_bin(context, bin, item)?;
                }
            }
            None => {
                for bin in 0..self.loads.len() {
                    if !context.contains(variable, self.bin_value(bin)) {
                        self.remove_item_from_bin(context, bin, item)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn start_monitors(&mut self, context: &PropagationContext) {
        for monitor in self.monitors.iter_mut() {
            monitor.start_monitoring(context);
        }
    }

    fn possible_items(&self, context: &PropagationContext, bin: usize) -> Vec<usize> {
        context.trailed_set_iter(self.possible[bin]).collect()
    }

    /// An item is committed when the bin cannot reach its minimum load without it, and eliminated
    /// when it does not fit on top of the committed items.
    fn single_item_elimination_and_commitment(
        &mut self,
        context: &mut PropagationContext,
        bin: usize,
    ) -> Result<bool, Contradiction> {
        let mut filtered = false;
        let value = self.bin_value(bin);

        for item in self.possible_items(context, bin) {
            let variable = self.items[item];
            if !context.contains(variable, value) {
                self.remove_item_from_bin(context, bin, item)?;
            } else if !context.trailed_set_contains(self.required[bin], item) {
                let possible_load = context.read_trailed(self.possible_load[bin]);
                let required_load = context.read_trailed(self.required_load[bin]);
                let load = self.loads[bin];

                if possible_load - self.sizes[item] < context.lower_bound(load) as i64 {
                    filtered |= context.assign(variable, value)?;
                    self.commit_item_to_bin(context, bin, item)?;
                } else if required_load + self.sizes[item] > context.upper_bound(load) as i64
                    && context.remove(variable, value)?
                {
                    filtered = true;
                    self.remove_item_from_bin(context, bin, item)?;
                }
            }
        }

        Ok(filtered)
    }

    /// Collects the sizes of the undecided items of `bin`, largest first.
    fn fill_candidates(
        &mut self,
        context: &PropagationContext,
        bin: usize,
        excluded: Option<usize>,
    ) {
        self.candidate_sizes.clear();
        for &item in self.by_decreasing_size.iter() {
            if Some(item) != excluded
                && context.trailed_set_contains(self.possible[bin], item)
                && !context.trailed_set_contains(self.required[bin], item)
            {
                self.candidate_sizes.push(self.sizes[item]);
            }
        }
    }

    fn filter_with_no_sum(
        &mut self,
        context: &mut PropagationContext,
        bin: usize,
    ) -> Result<bool, Contradiction> {
        let load = self.loads[bin];
        let value = self.bin_value(bin);
        let mut filtered = false;

        self.fill_candidates(context, bin, None);
        let required_load = context.read_trailed(self.required_load[bin]);
        let lower = context.lower_bound(load) as i64 - required_load;
        let upper = context.upper_bound(load) as i64 - required_load;

        if no_sum(&self.candidate_sizes, lower, upper).is_some() {
            self.statistics.num_no_sum_conflicts += 1;
            return Err(context.contradiction());
        }
        if let Some(bounds) = no_sum(&self.candidate_sizes, lower, lower) {
            self.statistics.num_no_sum_prunings += 1;
            filtered |= context
                .set_lower_bound(load, saturate(required_load + bounds.smallest_above))?;
        }
        let upper = context.upper_bound(load) as i64 - required_load;
        if let Some(bounds) = no_sum(&self.candidate_sizes, upper, upper) {
            self.statistics.num_no_sum_prunings += 1;
            filtered |= context
                .set_upper_bound(load, saturate(required_load + bounds.largest_below))?;
        }

        for item in self.possible_items(context, bin) {
            if context.trailed_set_contains(self.required[bin], item) {
                continue;
            }
            self.fill_candidates(context, bin, Some(item));
            let required_load = context.read_trailed(self.required_load[bin]);
            let lower = context.lower_bound(load) as i64 - required_load;
            let upper = context.upper_bound(load) as i64 - required_load;
            let size = self.sizes[item];

            // The other items cannot complement this one.
            if no_sum(&self.candidate_sizes, lower - size, upper - size).is_some()
                && context.remove(self.items[item], value)?
            {
                self.statistics.num_no_sum_prunings += 1;
                filtered = true;
                self.remove_item_from_bin(context, bin, item)?;
            }
            // The other items cannot fill the bin without this one.
            if no_sum(&self.candidate_sizes, lower, upper).is_some() {
                self.statistics.num_no_sum_prunings += 1;
                filtered |= context.assign(self.items[item], value)?;
                self.commit_item_to_bin(context, bin, item)?;
            }
        }

        Ok(filtered)
    }

    fn process_bin(&mut self, context: &mut PropagationContext, bin: usize) -> PropagationStatus {
        self.bins_to_process[bin] = false;
        loop {
            let mut filtered = self.single_item_elimination_and_commitment(context, bin)?;
            if self.no_sum_filtering {
                filtered |= self.filter_with_no_sum(context, bin)?;
            }
            if !filtered {
                return Ok(());
            }
        }
    }

    fn process_marked_bins(&mut self, context: &mut PropagationContext) -> PropagationStatus {
        while let Some(bin) = self.bins_to_process.iter().position(|&marked| marked) {
            self.process_bin(context, bin)?;
        }
        Ok(())
    }

    fn clear_pending(&mut self) {
        for item in self.dirty_items.drain(..) {
            self.is_dirty[item] = false;
        }
        self.bins_to_process.fill(false);
    }
}

impl Propagator for BinPackingPropagator {
    fn name(&self) -> &str {
        "BinPacking"
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    fn notify(
        &mut self,
        _domains: Domains,
        local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        if index < self.items.len() {
            if !self.is_dirty[index] {
                self.is_dirty[index] = true;
                self.dirty_items.push(index);
            }
        } else {
            self.mark_bin(index - self.items.len());
        }
        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, _domains: Domains) {
        self.clear_pending();
    }

    /// Packs every item into one of the bins and rebuilds the sets from the domains.
    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        self.statistics.num_calls += 1;
        self.clear_pending();

        let last_bin = self.offset as i64 + self.loads.len() as i64 - 1;
        for item in 0..self.items.len() {
            let variable = self.items[item];
            let _ = context.set_lower_bound(variable, self.offset)?;
            let _ = context.set_upper_bound(variable, saturate(last_bin))?;

            self.compare_item_with_bins(&mut context, item)?;
        }

        for bin in 0..self.loads.len() {
            let required_load = context.read_trailed(self.required_load[bin]);
            let possible_load = context.read_trailed(self.possible_load[bin]);
            let _ = context.set_lower_bound(self.loads[bin], saturate(required_load))?;
            let _ = context.set_upper_bound(self.loads[bin], saturate(possible_load))?;
        }

        self.start_monitors(&context);
        self.bins_to_process.fill(true);
        self.process_marked_bins(&mut context)
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus {
        self.statistics.num_calls += 1;

        if self
            .monitors
            .first()
            .is_some_and(|monitor| !monitor.is_started(&context))
        {
            // First call in this node: the deltas only report what happens from here on.
            self.start_monitors(&context);
            while let Some(item) = self.dirty_items.pop() {
                self.is_dirty[item] = false;
                self.compare_item_with_bins(&mut context, item)?;
            }
        }

        while let Some(item) = self.dirty_items.pop() {
            self.is_dirty[item] = false;

            self.removed_values.clear();
            self.removed_values
                .extend(self.monitors[item].freeze(&context).removed_values());
            for position in 0..self.removed_values.len() {
                if let Some(bin) = self.bin_of(self.removed_values[position]) {
                    self.remove_item_from_bin(&mut context, bin, item)?;
                }
            }

            if let Some(value) = context.fixed_value(self.items[item]) {
                if let Some(bin) = self.bin_of(value) {
                    self.commit_item_to_bin(&mut context, bin, item)?;
                }
            }
        }

        self.process_marked_bins(&mut context)
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        if self
            .items
            .iter()
            .filter_map(|&item| domains.fixed_value(item))
            .any(|value| self.bin_of(value).is_none())
        {
            return EntailmentStatus::Violated;
        }

        for (bin, &load) in self.loads.iter().enumerate() {
            let value = self.bin_value(bin);
            let mut packed = 0;
            let mut possible = 0;
            for (item, &variable) in self.items.iter().enumerate() {
                if domains.contains(variable, value) {
                    possible += self.sizes[item];
                    if domains.is_fixed(variable) {
                        packed += self.sizes[item];
                    }
                }
            }
            if packed > domains.upper_bound(load) as i64
                || possible < domains.lower_bound(load) as i64
            {
                return EntailmentStatus::Violated;
            }
        }

        let all_fixed = self
            .items
            .iter()
            .chain(self.loads.iter())
            .all(|&variable| domains.is_fixed(variable));
        if all_fixed {
            EntailmentStatus::Satisfied
        } else {
            EntailmentStatus::Undetermined
        }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use marrow_core::testing::TestSolver;
    use marrow_core::PropagatorHandle;

    use super::*;

    fn post(
        solver: &mut TestSolver,
        items: &[DomainId],
        sizes: &[i32],
        loads: &[DomainId],
    ) -> Result<PropagatorHandle<BinPackingPropagator>, Contradiction> {
        solver.new_propagator(BinPackingPropagatorArgs {
            items: items.to_vec(),
            sizes: sizes.to_vec(),
            loads: loads.to_vec(),
            offset: 0,
            no_sum_filtering: true,
        })
    }

    #[test]
    fn items_are_packed_into_existing_bins() {
        let mut solver = TestSolver::default();
        let item = solver.new_enumerated_variable(-3, 7);
        let loads = [solver.new_variable(0, 10), solver.new_variable(0, 10)];

        let _ = post(&mut solver, &[item], &[4], &loads).expect("no conflict");

        assert_eq!(solver.values(item), vec![0, 1]);
    }

    #[test]
    fn loads_are_bounded_by_possible_and_packed_items() {
        let mut solver = TestSolver::default();
        let first = solver.new_enumerated_variable(0, 0);
        let second = solver.new_enumerated_variable(0, 1);
        let loads = [solver.new_variable(0, 100), solver.new_variable(0, 100)];

        let _ = post(&mut solver, &[first, second], &[3, 5], &loads).expect("no conflict");

        solver.assert_bounds(loads[0], 3, 8);
        solver.assert_bounds(loads[1], 0, 5);
    }

    #[test]
    fn an_item_which_does_not_fit_is_eliminated() {
        let mut solver = TestSolver::default();
        let first = solver.new_enumerated_variable(0, 0);
        let second = solver.new_enumerated_variable(0, 1);
        let loads = [solver.new_variable(0, 6), solver.new_variable(0, 6)];

        let _ = post(&mut solver, &[first, second], &[4, 3], &loads).expect("no conflict");

        assert_eq!(solver.values(second), vec![1]);
        solver.assert_bounds(loads[0], 4, 4);
        solver.assert_bounds(loads[1], 3, 3);
    }

    #[test]
    fn an_item_which_is_needed_is_committed() {
        let mut solver = TestSolver::default();
        let first = solver.new_enumerated_variable(0, 1);
        let second = solver.new_enumerated_variable(0, 1);
        let loads = [solver.new_variable(5, 10), solver.new_variable(0, 10)];

        let _ = post(&mut solver, &[first, second], &[2, 4], &loads).expect("no conflict");

        assert_eq!(solver.values(first), vec![0]);
        assert_eq!(solver.values(second), vec![0]);
    }

    #[test]
    fn no_sum_detects_an_unreachable_load() {
        let mut solver = TestSolver::default();
        let items = [
            solver.new_enumerated_variable(0, 1),
            solver.new_enumerated_variable(0, 1),
            solver.new_enumerated_variable(0, 1),
        ];
        let loads = [solver.new_variable(7, 8), solver.new_variable(0, 15)];

        // Every single item fits and none is needed, yet one item is too light and two are too
        // heavy.
        let _ = post(&mut solver, &items, &[5, 5, 5], &loads)
            .expect_err("no subset of the items weighs 7 or 8");
    }

    #[test]
    fn no_sum_tightens_the_load() {
        let mut solver = TestSolver::default();
        let items = [
            solver.new_enumerated_variable(0, 1),
            solver.new_enumerated_variable(0, 1),
        ];
        let loads = [solver.new_variable(1, 9), solver.new_variable(0, 10)];

        // Two items of size 5 reach the loads 0, 5 and 10 only.
        let _ = post(&mut solver, &items, &[5, 5], &loads).expect("no conflict");

        solver.assert_bounds(loads[0], 5, 5);
    }

    #[test]
    fn removals_during_search_are_picked_up_from_the_delta() {
        let mut solver = TestSolver::default();
        let items = [
            solver.new_enumerated_variable(0, 2),
            solver.new_enumerated_variable(0, 2),
        ];
        let loads = [
            solver.new_variable(0, 10),
            solver.new_variable(0, 10),
            solver.new_variable(0, 10),
        ];
        let _ = post(&mut solver, &items, &[4, 6], &loads).expect("no conflict");
        solver.assert_bounds(loads[1], 0, 10);

        solver.new_checkpoint();
        let _ = solver.remove(items[0], 1).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[1], 0, 6);

        let _ = solver.assign(items[1], 2).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[1], 0, 0);
        solver.assert_bounds(loads[2], 6, 10);

        solver.restore_to(0);
        solver.assert_bounds(loads[1], 0, 10);
        solver.assert_bounds(loads[2], 0, 10);
    }

    #[test]
    fn removals_are_followed_across_nodes() {
        let mut solver = TestSolver::default();
        let items = [
            solver.new_enumerated_variable(0, 1),
            solver.new_enumerated_variable(0, 1),
            solver.new_enumerated_variable(0, 1),
        ];
        let loads = [solver.new_variable(0, 10), solver.new_variable(0, 10)];
        let _ = post(&mut solver, &items, &[2, 3, 4], &loads).expect("no conflict");
        solver.assert_bounds(loads[0], 0, 9);

        solver.new_checkpoint();
        let _ = solver.remove(items[0], 0).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[0], 0, 7);
        let _ = solver.remove(items[1], 0).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[0], 0, 4);

        solver.new_checkpoint();
        let _ = solver.remove(items[2], 0).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[0], 0, 0);
        solver.assert_bounds(loads[1], 9, 9);

        solver.restore_to(1);
        solver.assert_bounds(loads[0], 0, 4);
        let _ = solver.remove(items[2], 1).expect("non-empty domain");
        solver.propagate_until_fixed_point().expect("no conflict");
        solver.assert_bounds(loads[0], 4, 4);
        solver.assert_bounds(loads[1], 5, 5);
    }

    #[test]
    fn entailment_of_a_complete_packing() {
        let mut solver = TestSolver::default();
        let items = [
            solver.new_enumerated_variable(0, 0),
            solver.new_enumerated_variable(1, 1),
        ];
        let loads = [solver.new_variable(0, 10), solver.new_variable(0, 10)];

        let handle = post(&mut solver, &items, &[2, 3], &loads).expect("no conflict");
        let propagator = solver.get_propagator(handle).expect("valid handle");

        assert_eq!(
            propagator.is_entailed(solver.domains()),
            EntailmentStatus::Satisfied
        );
    }
}
