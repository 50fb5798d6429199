// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

use super::set_collection::InputError;

/// Type of decision variable in the optimization problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous real number (x ∈ ℝ)
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Found feasible solution (may not be optimal)
    Feasible,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached
    TimeLimit,
    /// Iteration limit reached
    IterationLimit,
    /// Solver error occurred
    Error,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Feasible => write!(f, "Feasible"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
            SolutionStatus::IterationLimit => write!(f, "Iteration Limit Reached"),
            SolutionStatus::Error => write!(f, "Error"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Use whichever engine is compiled in, preferring HiGHS
    #[default]
    Auto,
    /// HiGHS solver
    Highs,
    /// COIN-OR CBC solver
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "highs" => Ok(SolverBackend::Highs),
            "cbc" | "coin-cbc" | "coin_cbc" => Ok(SolverBackend::CoinCbc),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

/// Which set-cover problem to encode.
///
/// The budget `k` is part of the variant so a relaxed or transpose
/// problem can never be built without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverVariant {
    /// Minimum number of sets covering the whole universe
    Strict,
    /// Minimum number of sets covering all but at most `max_uncovered` elements
    Relaxed { max_uncovered: u64 },
    /// At most `max_sets` sets covering as many elements as possible
    Transpose { max_sets: u64 },
}

impl CoverVariant {
    /// Build a variant from its selector string and an optional budget.
    ///
    /// A negative `k` is rejected for every selector. `strict` otherwise
    /// ignores `k`; the other two require it.
    pub fn from_selector(selector: &str, k: Option<i64>) -> Result<Self, InputError> {
        if let Some(k) = k.filter(|k| *k < 0) {
            return Err(InputError::NegativeBudget(k));
        }
        let budget = |variant: &str| -> Result<u64, InputError> {
            k.map(|k| k as u64)
                .ok_or_else(|| InputError::MissingBudget(variant.to_string()))
        };

        match selector {
            "strict" => Ok(CoverVariant::Strict),
            "relaxed" => Ok(CoverVariant::Relaxed {
                max_uncovered: budget(selector)?,
            }),
            "transpose" => Ok(CoverVariant::Transpose {
                max_sets: budget(selector)?,
            }),
            other => Err(InputError::UnknownVariant(other.to_string())),
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            CoverVariant::Strict => "strict",
            CoverVariant::Relaxed { .. } => "relaxed",
            CoverVariant::Transpose { .. } => "transpose",
        }
    }

    pub fn budget(&self) -> Option<u64> {
        match *self {
            CoverVariant::Strict => None,
            CoverVariant::Relaxed { max_uncovered } => Some(max_uncovered),
            CoverVariant::Transpose { max_sets } => Some(max_sets),
        }
    }
}

impl fmt::Display for CoverVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.budget() {
            Some(k) => write!(f, "{} (k = {})", self.selector(), k),
            None => write!(f, "{}", self.selector()),
        }
    }
}
