// Exact cover: fewest sets whose union is the universe.
//
// minimize   Σ x_s
// subject to Σ_{s ∋ e} x_s ≥ 1   for every element e

use super::{add_set_columns, coverage_row};
use crate::domain::models::{Constraint, MilpProblem};
use crate::domain::set_collection::SetCollection;

pub fn encode(collection: &SetCollection) -> MilpProblem {
    let mut problem = MilpProblem::new("strict-cover");
    add_set_columns(&mut problem, collection, 1.0);

    let num_vars = problem.num_variables();
    for (elem_idx, element) in collection.universe().iter().enumerate() {
        let row = coverage_row(collection, elem_idx, num_vars);
        problem.add_constraint(
            Constraint::at_least(row, 1.0).with_name(format!("cover[{}]", element)),
        );
    }

    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_element() {
        let collection = SetCollection::new([("A", vec![1, 2, 3]), ("B", vec![3, 4])]).unwrap();
        let problem = encode(&collection);

        assert_eq!(problem.objective, vec![1.0, 1.0]);
        assert_eq!(problem.integrality(), vec![true, true]);
        assert_eq!(problem.lower_bounds(), vec![0.0, 0.0]);
        assert_eq!(problem.upper_bounds(), vec![1.0, 1.0]);
        assert_eq!(
            problem.matrix(),
            vec![
                vec![1.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 1.0],
            ]
        );
        assert_eq!(problem.row_lower_bounds(), vec![1.0; 4]);
        assert!(problem.row_upper_bounds().iter().all(|b| *b == f64::INFINITY));
    }

    #[test]
    fn empty_universe_has_no_rows() {
        let collection = SetCollection::new([("A", Vec::<i64>::new())]).unwrap();
        let problem = encode(&collection);
        assert_eq!(problem.num_variables(), 1);
        assert_eq!(problem.num_constraints(), 0);
    }

    #[test]
    fn variable_names_use_labels() {
        let collection = SetCollection::new([(10, vec!["a"]), (20, vec!["b"])]).unwrap();
        let problem = encode(&collection);
        let names: Vec<_> = problem.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["x[10]", "x[20]"]);
        assert_eq!(problem.constraints[1].name, "cover[\"b\"]");
    }
}
