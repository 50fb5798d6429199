// HiGHS Solver Adapter
// Implements the SolverService interface for HiGHS
// Translates a MilpProblem into a HiGHS RowProblem and back

use crate::domain::{
    models::{MilpProblem, Solution as DomainSolution, SolverConfig, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{SolutionStatus as DomainSolutionStatus, VariableType},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &MilpProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();
        let mut statistics = SolverStatistics::for_problem(problem);

        // Add variables first, then constraints
        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(problem.num_variables());

        for (var_def, &cost) in problem.variables.iter().zip(&problem.objective) {
            let bounds = var_def.lower_bound..=var_def.upper_bound;
            let col = match var_def.variable_type {
                VariableType::Integer | VariableType::Binary => pb.add_integer_column(cost, bounds),
                VariableType::Continuous => pb.add_column(cost, bounds),
            };
            cols.push(col);
        }

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .terms()
                .map(|(i, coeff)| (cols[i], coeff))
                .collect();
            pb.add_row(constraint.lower_bound..=constraint.upper_bound, &terms);
        }

        let mut model = pb.optimise(Sense::Minimise);
        let config = &problem.solver_config;
        if !config.verbose {
            model.make_quiet();
        }
        for (option, value) in numeric_options(config) {
            model.set_option(option, value);
        }

        let solved = model.try_solve().map_err(|status| {
            SolverError::ExecutionFailed(format!("HiGHS run failed with status: {:?}", status))
        })?;
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let objective = problem.objective_value(&variable_values);

                let mut solution = DomainSolution::optimal(objective, variable_values);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                solution
            }
            HighsModelStatus::Infeasible => DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                DomainSolution::new(
                    DomainSolutionStatus::Unbounded,
                    "Problem is unbounded or infeasible",
                )
            }
            HighsModelStatus::ReachedTimeLimit => DomainSolution::new(
                DomainSolutionStatus::TimeLimit,
                "HiGHS stopped at the time limit before proving optimality",
            ),
            HighsModelStatus::ReachedIterationLimit => DomainSolution::new(
                DomainSolutionStatus::IterationLimit,
                "HiGHS stopped at the iteration limit before proving optimality",
            ),
            status => DomainSolution::new(
                DomainSolutionStatus::Error,
                format!("HiGHS solver returned status: {:?}", status),
            ),
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}

/// Numeric HiGHS options derived from the caller's config
fn numeric_options(config: &SolverConfig) -> Vec<(&'static str, f64)> {
    let mut options = vec![("mip_rel_gap", config.mip_gap())];
    if let Some(seconds) = config.time_limit {
        options.push(("time_limit", seconds));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Variable};

    #[test]
    fn solves_small_knapsack() {
        // max 5a + 4b + 3c  s.t. 2a + 3b + c <= 4, written as a minimization
        let mut problem = MilpProblem::new("knapsack");
        for (name, value) in [("a", 5.0), ("b", 4.0), ("c", 3.0)] {
            problem.add_variable(Variable::binary(name), -value);
        }
        problem.add_constraint(Constraint::new(
            vec![2.0, 3.0, 1.0],
            f64::NEG_INFINITY,
            4.0,
        ));

        let solution = HighsSolver::new().solve(&problem).unwrap();
        assert!(solution.is_optimal());
        assert_eq!(solution.variable_values.len(), 3);
        let rounded: Vec<f64> = solution.variable_values.iter().map(|v| v.round()).collect();
        assert_eq!(rounded, vec![1.0, 0.0, 1.0]);
        assert!((solution.optimal_value.unwrap() + 8.0).abs() < 1e-6);
        assert_eq!(solution.statistics.num_binary_vars, 3);
    }

    #[test]
    fn default_config_closes_the_gap() {
        assert_eq!(
            numeric_options(&SolverConfig::default()),
            vec![("mip_rel_gap", 0.0)]
        );

        let config = SolverConfig {
            time_limit: Some(5.0),
            gap_tolerance: Some(0.01),
            ..SolverConfig::default()
        };
        assert_eq!(
            numeric_options(&config),
            vec![("mip_rel_gap", 0.01), ("time_limit", 5.0)]
        );
    }

    #[test]
    fn reports_infeasible_model() {
        let mut problem = MilpProblem::new("impossible");
        problem.add_variable(Variable::binary("x"), 1.0);
        problem.add_constraint(Constraint::at_least(vec![1.0], 2.0));

        let solution = HighsSolver::new().solve(&problem).unwrap();
        assert!(!solution.is_optimal());
        assert!(solution.variable_values.is_empty());
    }

    #[test]
    fn rejects_malformed_problem() {
        let mut problem = MilpProblem::new("malformed");
        problem.add_variable(Variable::binary("x"), 1.0);
        problem.add_constraint(Constraint::at_least(vec![1.0, 1.0], 1.0));

        assert!(matches!(
            HighsSolver::new().solve(&problem),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}
