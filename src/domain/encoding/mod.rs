// Set-cover variants encoded as minimization MILPs.
//
// Every encoding uses the same column layout: one binary per set, in
// collection order, occupying columns `0..num_sets`, followed by one binary
// per universe element (in universe order) for the variants that need it.
// Element rows come first, in universe order, then the budget row if any.
//
// Secondary objectives are expressed by integer scaling instead of a
// fractional epsilon: the primary term is weighted by `count + 1` and the
// tie-break term by 1, where `count` bounds the tie-break term. That is the
// epsilon formulation multiplied by `count + 1`, so optima coincide and all
// coefficients stay exact in floating point.

pub mod relaxed;
pub mod strict;
pub mod transpose;

use std::ops::Range;

use super::models::{Constraint, MilpProblem, Variable};
use super::set_collection::SetCollection;
use super::value_objects::CoverVariant;

/// Build the MILP for `variant` over `collection`
pub fn encode(collection: &SetCollection, variant: CoverVariant) -> MilpProblem {
    match variant {
        CoverVariant::Strict => strict::encode(collection),
        CoverVariant::Relaxed { max_uncovered } => relaxed::encode(collection, max_uncovered),
        CoverVariant::Transpose { max_sets } => transpose::encode(collection, max_sets),
    }
}

/// Weight making one unit of the primary term outweigh `count` units of the
/// tie-break term
pub(crate) fn tie_break_weight(count: usize) -> f64 {
    (count + 1) as f64
}

/// Add one binary column per set, each costing `cost`
pub(crate) fn add_set_columns(
    problem: &mut MilpProblem,
    collection: &SetCollection,
    cost: f64,
) -> Range<usize> {
    let start = problem.num_variables();
    for label in collection.labels() {
        problem.add_variable(Variable::binary(format!("x[{}]", label)), cost);
    }
    start..problem.num_variables()
}

/// Add one binary column per universe element, each costing `cost`
pub(crate) fn add_element_columns(
    problem: &mut MilpProblem,
    collection: &SetCollection,
    prefix: &str,
    cost: f64,
) -> Range<usize> {
    let start = problem.num_variables();
    for element in collection.universe() {
        problem.add_variable(Variable::binary(format!("{}[{}]", prefix, element)), cost);
    }
    start..problem.num_variables()
}

/// Row with coefficient 1 on every set column containing the element
pub(crate) fn coverage_row(
    collection: &SetCollection,
    elem_idx: usize,
    num_vars: usize,
) -> Vec<f64> {
    let mut row = vec![0.0; num_vars];
    for &set_idx in collection.covering_sets(elem_idx) {
        row[set_idx] = 1.0;
    }
    row
}

/// `sum(columns) <= budget`, written as `-sum(columns) >= -budget`
pub(crate) fn budget_row(columns: Range<usize>, num_vars: usize, budget: u64) -> Constraint {
    let mut row = vec![0.0; num_vars];
    for col in columns {
        row[col] = -1.0;
    }
    Constraint::at_least(row, -(budget as f64)).with_name("budget")
}
