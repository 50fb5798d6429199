// Shared fixtures and a brute-force oracle for small collections

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use letscover::{
    CoverSelection, CoverVariant, HighsSolver, Scalar, SetCollection, SetCoverService,
    SolverConfig,
};

pub fn highs_service() -> SetCoverService {
    SetCoverService::new(Arc::new(HighsSolver::new()), SolverConfig::default())
}

/// Sets labeled by their position, elements as small integers
pub fn collection(sets: &[BTreeSet<u8>]) -> SetCollection {
    SetCollection::new(
        sets.iter()
            .enumerate()
            .map(|(i, set)| (i as i64, set.iter().map(|&e| i64::from(e)).collect::<Vec<_>>())),
    )
    .expect("fixture is valid")
}

pub fn solve(sets: &[BTreeSet<u8>], variant: CoverVariant) -> CoverSelection {
    highs_service()
        .solve(&collection(sets), variant)
        .into_selection()
        .expect("fixture always has an optimal solution")
}

/// Indices of the selected sets, recovered from their integer labels
pub fn chosen_indices(selection: &CoverSelection) -> Vec<usize> {
    selection
        .labels
        .iter()
        .map(|label| match label {
            Scalar::Int(i) => *i as usize,
            Scalar::Str(s) => panic!("unexpected string label {}", s),
        })
        .collect()
}

pub fn universe(sets: &[BTreeSet<u8>]) -> BTreeSet<u8> {
    sets.iter().flatten().copied().collect()
}

pub fn union_of(sets: &[BTreeSet<u8>], chosen: &[usize]) -> BTreeSet<u8> {
    chosen.iter().flat_map(|&i| sets[i].iter().copied()).collect()
}

fn masks(sets: &[BTreeSet<u8>]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let everything = universe(sets).len();
    (0u32..1 << sets.len()).map(move |mask| {
        let chosen: Vec<usize> = (0..sets.len()).filter(|i| mask & (1 << i) != 0).collect();
        let covered = union_of(sets, &chosen).len();
        (chosen.len(), everything - covered)
    })
}

/// Fewest sets covering the whole universe
pub fn min_cover(sets: &[BTreeSet<u8>]) -> usize {
    masks(sets)
        .filter(|&(_, uncovered)| uncovered == 0)
        .map(|(count, _)| count)
        .min()
        .expect("the full collection always covers its universe")
}

/// Best `(set count, uncovered)` with at most `k` uncovered, fewest sets first
pub fn relaxed_optimum(sets: &[BTreeSet<u8>], k: usize) -> (usize, usize) {
    masks(sets)
        .filter(|&(_, uncovered)| uncovered <= k)
        .min()
        .expect("the full collection is always feasible")
}

/// Best `(covered, set count)` with at most `k` sets, most coverage first
pub fn transpose_optimum(sets: &[BTreeSet<u8>], k: usize) -> (usize, usize) {
    let everything = universe(sets).len();
    masks(sets)
        .filter(|&(count, _)| count <= k)
        .map(|(count, uncovered)| (everything - uncovered, count))
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .expect("the empty selection is always feasible")
}
