// Result decoder: engine solution vector -> chosen set labels

use super::models::Solution;
use super::set_collection::{Scalar, SetCollection};
use super::value_objects::SolutionStatus;

/// Values at or above this count as 1
pub const ROUNDING_THRESHOLD: f64 = 0.5;

/// Set labels picked by an optimal solution
#[derive(Debug, Clone, PartialEq)]
pub struct CoverSelection {
    /// Selected labels, in collection order
    pub labels: Vec<Scalar>,
    /// Number of universe elements contained in a selected set
    pub covered: usize,
    /// Universe elements left uncovered, in universe order
    pub uncovered: Vec<Scalar>,
}

impl CoverSelection {
    pub fn empty(collection: &SetCollection) -> Self {
        Self {
            labels: Vec::new(),
            covered: 0,
            uncovered: collection.universe().iter().cloned().collect(),
        }
    }

    pub fn set_count(&self) -> usize {
        self.labels.len()
    }
}

/// Result of a solve: a selection, or an explicit absence of one.
///
/// `Solved` with no labels means the optimum uses zero sets, which is
/// different from `NoSolution`.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverOutcome {
    Solved(CoverSelection),
    NoSolution(SolutionStatus),
}

impl CoverOutcome {
    pub fn selection(&self) -> Option<&CoverSelection> {
        match self {
            CoverOutcome::Solved(selection) => Some(selection),
            CoverOutcome::NoSolution(_) => None,
        }
    }

    pub fn into_selection(self) -> Option<CoverSelection> {
        match self {
            CoverOutcome::Solved(selection) => Some(selection),
            CoverOutcome::NoSolution(_) => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, CoverOutcome::Solved(_))
    }
}

/// Indices of the set columns whose value rounds to 1
pub fn selected_sets(values: &[f64], num_sets: usize) -> Vec<usize> {
    values
        .iter()
        .take(num_sets)
        .enumerate()
        .filter(|&(_, &value)| value >= ROUNDING_THRESHOLD)
        .map(|(set_idx, _)| set_idx)
        .collect()
}

/// Largest distance of any value from its nearest integer
pub fn max_integrality_violation(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|v| (v - v.round()).abs())
        .fold(0.0, f64::max)
}

/// Map an engine solution back onto the collection's labels.
///
/// Anything other than an optimal solution carrying at least one value per
/// set decodes to `NoSolution`.
pub fn decode(collection: &SetCollection, solution: &Solution) -> CoverOutcome {
    if !solution.is_optimal() {
        return CoverOutcome::NoSolution(solution.status);
    }
    if solution.variable_values.len() < collection.num_sets() {
        return CoverOutcome::NoSolution(SolutionStatus::Error);
    }

    let chosen = selected_sets(&solution.variable_values, collection.num_sets());
    let uncovered = collection.uncovered_by(&chosen);

    CoverOutcome::Solved(CoverSelection {
        labels: chosen
            .iter()
            .map(|&set_idx| collection.labels()[set_idx].clone())
            .collect(),
        covered: collection.num_elements() - uncovered.len(),
        uncovered,
    })
}
