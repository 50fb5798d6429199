use super::value_objects::{SolutionStatus, SolverBackend, VariableType};

/// Decision variable in an optimization problem
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound: 0.0,
            upper_bound: f64::INFINITY,
            name: name.into(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: 1.0,
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

/// Linear constraint `lower_bound <= coefficients · x <= upper_bound`.
///
/// One-sided rows use an infinite bound on the open side.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(coefficients: Vec<f64>, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            coefficients,
            lower_bound,
            upper_bound,
            name: String::new(),
        }
    }

    pub fn at_least(coefficients: Vec<f64>, bound: f64) -> Self {
        Self::new(coefficients, bound, f64::INFINITY)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Non-zero entries as `(column, coefficient)` pairs
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.coefficients
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, coeff)| coeff != 0.0)
    }

    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms().map(|(col, coeff)| coeff * values[col]).sum()
    }
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit in seconds
    pub time_limit: Option<f64>,
    /// Relative MIP gap at which the engine may stop
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit: None,
            gap_tolerance: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    /// Relative gap handed to the engine. Without an explicit tolerance the
    /// engine must close the gap, since a unit tie-break term is a fraction
    /// of a large objective.
    pub fn mip_gap(&self) -> f64 {
        self.gap_tolerance.unwrap_or(0.0)
    }
}

/// Minimization MILP: objective, per-variable type and bounds, and
/// two-sided constraint rows over the same columns
#[derive(Debug, Clone)]
pub struct MilpProblem {
    pub name: String,
    pub objective: Vec<f64>,
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub solver_config: SolverConfig,
}

impl MilpProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objective: Vec::new(),
            variables: Vec::new(),
            constraints: Vec::new(),
            solver_config: SolverConfig::default(),
        }
    }

    /// Append a column and return its index
    pub fn add_variable(&mut self, variable: Variable, cost: f64) -> usize {
        self.variables.push(variable);
        self.objective.push(cost);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn integrality(&self) -> Vec<bool> {
        self.variables.iter().map(Variable::is_integer).collect()
    }

    pub fn lower_bounds(&self) -> Vec<f64> {
        self.variables.iter().map(|v| v.lower_bound).collect()
    }

    pub fn upper_bounds(&self) -> Vec<f64> {
        self.variables.iter().map(|v| v.upper_bound).collect()
    }

    /// Dense constraint matrix, one row per constraint
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.constraints
            .iter()
            .map(|c| c.coefficients.clone())
            .collect()
    }

    pub fn row_lower_bounds(&self) -> Vec<f64> {
        self.constraints.iter().map(|c| c.lower_bound).collect()
    }

    pub fn row_upper_bounds(&self) -> Vec<f64> {
        self.constraints.iter().map(|c| c.upper_bound).collect()
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_integer_vars: u32,
    pub num_binary_vars: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &MilpProblem) -> Self {
        let num_binary = problem
            .variables
            .iter()
            .filter(|v| matches!(v.variable_type, VariableType::Binary))
            .count();

        Self {
            solve_time_ms: 0.0,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.num_constraints() as u32,
            num_integer_vars: (problem.num_integer_variables() - num_binary) as u32,
            num_binary_vars: num_binary as u32,
        }
    }
}

/// Engine result: status plus one value per column when a solution exists
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub optimal_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            optimal_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            optimal_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_views_stay_aligned() {
        let mut problem = MilpProblem::new("toy");
        let x = problem.add_variable(Variable::binary("x"), 1.0);
        let y = problem.add_variable(Variable::continuous("y").with_bounds(-1.0, 2.5), -0.5);
        problem.add_constraint(Constraint::at_least(vec![1.0, 1.0], 1.0));
        problem.add_constraint(Constraint::new(vec![0.0, -1.0], -2.0, 0.0));

        assert_eq!((x, y), (0, 1));
        assert_eq!(problem.integrality(), vec![true, false]);
        assert_eq!(problem.lower_bounds(), vec![0.0, -1.0]);
        assert_eq!(problem.upper_bounds(), vec![1.0, 2.5]);
        assert_eq!(problem.matrix(), vec![vec![1.0, 1.0], vec![0.0, -1.0]]);
        assert_eq!(problem.row_lower_bounds(), vec![1.0, -2.0]);
        assert_eq!(problem.row_upper_bounds(), vec![f64::INFINITY, 0.0]);
        assert_eq!(problem.objective_value(&[1.0, 2.0]), 0.0);
    }

    #[test]
    fn engine_gap_is_closed_unless_requested() {
        assert_eq!(SolverConfig::default().mip_gap(), 0.0);
        let loose = SolverConfig {
            gap_tolerance: Some(0.05),
            ..SolverConfig::default()
        };
        assert_eq!(loose.mip_gap(), 0.05);
    }

    #[test]
    fn terms_skip_zero_coefficients() {
        let row = Constraint::at_least(vec![0.0, 2.0, 0.0, -1.0], 0.0);
        assert_eq!(row.terms().collect::<Vec<_>>(), vec![(1, 2.0), (3, -1.0)]);
        assert_eq!(row.activity(&[5.0, 1.0, 5.0, 1.0]), 1.0);
    }

    #[test]
    fn statistics_split_binary_from_integer() {
        let mut problem = MilpProblem::new("stats");
        problem.add_variable(Variable::binary("a"), 1.0);
        problem.add_variable(
            Variable {
                variable_type: VariableType::Integer,
                lower_bound: 0.0,
                upper_bound: 9.0,
                name: "n".into(),
            },
            1.0,
        );
        problem.add_variable(Variable::continuous("c"), 0.0);

        let stats = SolverStatistics::for_problem(&problem);
        assert_eq!(stats.num_variables, 3);
        assert_eq!(stats.num_binary_vars, 1);
        assert_eq!(stats.num_integer_vars, 1);
    }
}
