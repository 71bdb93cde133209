#![cfg(test)]
use marrow_core::Solver;
use marrow_propagators::constraints;
use marrow_propagators::BinPackingPropagatorArgs;

use crate::count_solutions;
use crate::for_each_solution;

/// Counts the packings of `sizes` into `num_bins` bins with loads in `[min_load, max_load]`.
fn brute_force(sizes: &[i32], num_bins: usize, min_load: i32, max_load: i32) -> usize {
    let num_packings = num_bins.pow(sizes.len() as u32);
    (0..num_packings)
        .filter(|&packing| {
            let mut loads = vec![0; num_bins];
            let mut remaining = packing;
            for &size in sizes {
                loads[remaining % num_bins] += size;
                remaining /= num_bins;
            }
            loads
                .iter()
                .all(|&load| min_load <= load && load <= max_load)
        })
        .count()
}

fn count_packings(
    sizes: &[i32],
    num_bins: usize,
    min_load: i32,
    max_load: i32,
    no_sum_filtering: bool,
) -> usize {
    let mut solver = Solver::default();
    let items = sizes
        .iter()
        .map(|_| solver.new_bounded_integer(1, num_bins as i32))
        .collect::<Vec<_>>();
    let loads = (0..num_bins)
        .map(|_| solver.new_bounded_integer(min_load, max_load))
        .collect::<Vec<_>>();

    let result = solver.add_propagator(BinPackingPropagatorArgs {
        items,
        sizes: sizes.to_vec(),
        loads,
        offset: 1,
        no_sum_filtering,
    });
    if result.is_err() {
        return 0;
    }

    let mut brancher = solver.default_brancher();
    count_solutions(&mut solver, &mut brancher)
}

#[test]
fn packings_match_enumeration() {
    let instances: [(&[i32], usize, i32, i32); 5] = [
        (&[4, 3, 3, 2], 2, 6, 6),
        (&[4, 3, 3, 2, 2, 1], 3, 0, 6),
        (&[5, 5, 5], 2, 7, 8),
        (&[3, 3, 2, 2, 2], 2, 5, 7),
        (&[6, 4, 3, 1], 3, 2, 7),
    ];

    for (sizes, num_bins, min_load, max_load) in instances {
        let expected = brute_force(sizes, num_bins, min_load, max_load);
        for no_sum_filtering in [false, true] {
            assert_eq!(
                count_packings(sizes, num_bins, min_load, max_load, no_sum_filtering),
                expected,
                "sizes {sizes:?} in {num_bins} bins with loads [{min_load}, {max_load}], \
                 no sum filtering: {no_sum_filtering}"
            );
        }
    }
}

#[test]
fn loads_equal_the_packed_sizes() {
    let sizes = [4, 3, 2, 2, 1];
    let mut solver = Solver::default();
    let items = sizes
        .iter()
        .map(|_| solver.new_bounded_integer(0, 2))
        .collect::<Vec<_>>();
    let loads = (0..3)
        .map(|_| solver.new_bounded_integer(0, 5))
        .collect::<Vec<_>>();
    let _ = solver
        .add_propagator(constraints::bin_packing(
            items.clone(),
            sizes,
            loads.clone(),
            0,
        ))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    let num_solutions = for_each_solution(&mut solver, &mut brancher, |solution| {
        let mut packed = [0; 3];
        for (&item, &size) in items.iter().zip(sizes.iter()) {
            packed[solution.integer_value(item) as usize] += size;
        }
        for (bin, &load) in loads.iter().enumerate() {
            assert_eq!(solution.integer_value(load), packed[bin]);
        }
    });

    assert_eq!(num_solutions, brute_force(&sizes, 3, 0, 5));
}
