// Budgeted maximum coverage: at most `k` sets, as many elements as possible.
//
// minimize   −(|S| + 1) · Σ z_e + Σ x_s
// subject to Σ_{s ∋ e} x_s − z_e ≥ 0   for every element e
//            −Σ x_s ≥ −k
//
// `z_e = 1` counts element e as covered, which the element row only allows
// when some set containing it is used.

use super::{add_element_columns, add_set_columns, budget_row, coverage_row, tie_break_weight};
use crate::domain::models::{Constraint, MilpProblem};
use crate::domain::set_collection::SetCollection;

pub fn encode(collection: &SetCollection, max_sets: u64) -> MilpProblem {
    let mut problem = MilpProblem::new("transpose-cover");
    let sets = add_set_columns(&mut problem, collection, 1.0);
    let coverage_gain = -tie_break_weight(collection.num_sets());
    let counted = add_element_columns(&mut problem, collection, "z", coverage_gain);

    let num_vars = problem.num_variables();
    for (elem_idx, element) in collection.universe().iter().enumerate() {
        let mut row = coverage_row(collection, elem_idx, num_vars);
        row[counted.start + elem_idx] = -1.0;
        problem.add_constraint(
            Constraint::at_least(row, 0.0).with_name(format!("count[{}]", element)),
        );
    }

    problem.add_constraint(budget_row(sets, num_vars, max_sets));
    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_rows_link_sets_to_counted_elements() {
        let collection = SetCollection::new([("A", vec![1, 2, 3]), ("B", vec![3, 4])]).unwrap();
        let problem = encode(&collection, 1);

        // |S| = 2, so each counted element is worth 3 against 1 per set
        assert_eq!(problem.objective, vec![1.0, 1.0, -3.0, -3.0, -3.0, -3.0]);
        assert_eq!(problem.integrality(), vec![true; 6]);
        assert_eq!(problem.lower_bounds(), vec![0.0; 6]);
        assert_eq!(
            problem.matrix(),
            vec![
                vec![1.0, 0.0, -1.0, 0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0, -1.0, 0.0, 0.0],
                vec![1.0, 1.0, 0.0, 0.0, -1.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
                vec![-1.0, -1.0, 0.0, 0.0, 0.0, 0.0],
            ]
        );
        assert_eq!(problem.row_lower_bounds(), vec![0.0, 0.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn using_every_set_costs_less_than_one_element() {
        let collection =
            SetCollection::new([("A", vec![1]), ("B", vec![2]), ("C", vec![3])]).unwrap();
        let problem = encode(&collection, 3);
        let all_sets: f64 = problem.objective[..collection.num_sets()].iter().sum();
        let one_element = -problem.objective[collection.num_sets()];
        assert!(all_sets < one_element);
    }

    #[test]
    fn zero_budget_forbids_every_set() {
        let collection = SetCollection::new([("A", vec![1, 2])]).unwrap();
        let problem = encode(&collection, 0);
        let budget = problem.constraints.last().unwrap();
        assert_eq!(budget.coefficients, vec![-1.0, 0.0, 0.0]);
        assert_eq!(budget.lower_bound, 0.0);
    }
}
