// Cover that may leave up to `k` elements uncovered.
//
// minimize   (|U| + 1) · Σ x_s + Σ y_e
// subject to Σ_{s ∋ e} x_s + y_e ≥ 1   for every element e
//            −Σ y_e ≥ −k
//
// `y_e = 1` forgives element e. Dropping one set always beats forgiving
// any number of elements; among equal set counts fewer forgiven wins.

use super::{add_element_columns, add_set_columns, budget_row, coverage_row, tie_break_weight};
use crate::domain::models::{Constraint, MilpProblem};
use crate::domain::set_collection::SetCollection;

pub fn encode(collection: &SetCollection, max_uncovered: u64) -> MilpProblem {
    let mut problem = MilpProblem::new("relaxed-cover");
    let set_cost = tie_break_weight(collection.num_elements());
    add_set_columns(&mut problem, collection, set_cost);
    let forgiven = add_element_columns(&mut problem, collection, "y", 1.0);

    let num_vars = problem.num_variables();
    for (elem_idx, element) in collection.universe().iter().enumerate() {
        let mut row = coverage_row(collection, elem_idx, num_vars);
        row[forgiven.start + elem_idx] = 1.0;
        problem.add_constraint(
            Constraint::at_least(row, 1.0).with_name(format!("cover[{}]", element)),
        );
    }

    problem.add_constraint(budget_row(forgiven, num_vars, max_uncovered));
    problem
}
