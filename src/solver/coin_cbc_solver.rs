// COIN-OR CBC Solver Adapter (through good_lp)

use crate::domain::{
    models::{MilpProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{SolutionStatus as DomainSolutionStatus, VariableType},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, IntoAffineExpression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolutionStatus as GoodLpSolutionStatus, SolverModel,
    Variable as GoodLpVariable,
};
use std::time::Instant;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &MilpProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();
        let mut statistics = SolverStatistics::for_problem(problem);

        // Rows without terms are constant; good_lp would pass them through as-is
        if let Some(i) = problem.constraints.iter().position(|c| {
            c.terms().next().is_none() && (c.lower_bound > 0.0 || c.upper_bound < 0.0)
        }) {
            return Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                format!("Constraint {} has no terms and excludes zero", i),
            )
            .with_statistics(statistics));
        }

        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(problem.num_variables());

        for var_def in &problem.variables {
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound;

            let var = match var_def.variable_type {
                VariableType::Binary | VariableType::Integer => {
                    vars.add(variable().integer().min(lower).max(upper))
                }
                VariableType::Continuous => vars.add(variable().min(lower).max(upper)),
            };
            lp_variables.push(var);
        }

        let mut obj_expr: Expression = 0.into();
        for (i, &coeff) in problem.objective.iter().enumerate() {
            if coeff != 0.0 {
                obj_expr += coeff * lp_variables[i];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);

        let config = &problem.solver_config;
        if !config.verbose {
            lp_model.set_parameter("log", "0");
        }
        if let Some(seconds) = config.time_limit {
            lp_model.set_parameter("seconds", &seconds.to_string());
        }
        lp_model.set_parameter("ratioGap", &config.mip_gap().to_string());

        for constraint in &problem.constraints {
            if constraint.terms().next().is_none() {
                continue;
            }
            let lhs = || -> Expression {
                let mut lhs: Expression = 0.into();
                for (i, coeff) in constraint.terms() {
                    lhs += coeff * lp_variables[i];
                }
                lhs
            };

            let (lower, upper) = (constraint.lower_bound, constraint.upper_bound);
            if lower == upper {
                lp_model = lp_model.with(lhs().eq(lower));
                continue;
            }
            if lower.is_finite() {
                lp_model = lp_model.with(lhs().geq(lower));
            }
            if upper.is_finite() {
                lp_model = lp_model.with(lhs().leq(upper));
            }
        }

        let solution_result = lp_model.solve();
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        let solution = match solution_result {
            Ok(sol) => match incumbent_status(sol.status(), config.gap_tolerance.is_some()) {
                DomainSolutionStatus::Optimal => {
                    let variable_values: Vec<f64> =
                        lp_variables.iter().map(|&var| sol.value(var)).collect();
                    let objective = problem.objective_value(&variable_values);

                    let mut solution = DomainSolution::optimal(objective, variable_values);
                    solution.message = format!("Optimal solution found for '{}'", problem.name);
                    solution
                }
                status => DomainSolution::new(
                    status,
                    format!("CBC stopped before proving optimality ({:?})", sol.status()),
                ),
            },
            Err(ResolutionError::Infeasible) => DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            Err(ResolutionError::Unbounded) => DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            ),
            Err(ResolutionError::Other(reason)) => DomainSolution::new(
                DomainSolutionStatus::Error,
                format!("CBC stopped without a solution: {}", reason),
            ),
            Err(e) => return Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}

/// Status of an incumbent CBC returned. A gap stop only counts as optimal
/// when the caller asked for that gap.
fn incumbent_status(status: GoodLpSolutionStatus, gap_requested: bool) -> DomainSolutionStatus {
    match status {
        GoodLpSolutionStatus::Optimal => DomainSolutionStatus::Optimal,
        GoodLpSolutionStatus::GapLimit if gap_requested => DomainSolutionStatus::Optimal,
        GoodLpSolutionStatus::GapLimit => DomainSolutionStatus::Feasible,
        GoodLpSolutionStatus::TimeLimit => DomainSolutionStatus::TimeLimit,
    }
}
