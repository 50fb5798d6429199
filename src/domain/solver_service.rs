// Domain service interface for solving MILP problems
// Any engine adapter implements this; the cover service only sees the trait

use super::models::{MilpProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Boundary to an external MILP engine.
///
/// `solve` minimizes `problem.objective` and reports infeasibility or limits
/// through `Solution::status`; an `Err` means the engine itself broke down.
pub trait SolverService: Send + Sync {
    /// Solve a minimization problem
    fn solve(&self, problem: &MilpProblem) -> Result<Solution>;

    /// Check that dimensions and bounds are mutually consistent
    fn validate(&self, problem: &MilpProblem) -> Result<()> {
        let mut errors = Vec::new();

        let num_vars = problem.num_variables();

        if num_vars == 0 {
            errors.push("Problem must have at least one variable".to_string());
        }

        if problem.variables.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                problem.variables.len(),
                num_vars
            ));
        }

        if problem.objective.iter().any(|c| !c.is_finite()) {
            errors.push("Objective coefficients must be finite".to_string());
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if constraint.num_variables() != num_vars {
                errors.push(format!(
                    "Constraint {} has {} coefficients but problem has {} variables",
                    i,
                    constraint.num_variables(),
                    num_vars
                ));
            }
            if constraint.coefficients.iter().any(|c| !c.is_finite()) {
                errors.push(format!("Constraint {} has a non-finite coefficient", i));
            }
            if constraint.lower_bound > constraint.upper_bound {
                errors.push(format!(
                    "Constraint {} has lower bound ({}) > upper bound ({})",
                    i, constraint.lower_bound, constraint.upper_bound
                ));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                    i, var.name, var.lower_bound, var.upper_bound
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}
