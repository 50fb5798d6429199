// Domain layer: set collections, MILP models, encoders and decoder
pub mod domain;

// Application layer: Use cases and service orchestration
pub mod application;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    decoder::{CoverOutcome, CoverSelection, ROUNDING_THRESHOLD},
    encoding::encode,
    Constraint, CoverVariant, InputError, MilpProblem, Scalar, SetCollection, Solution,
    SolutionStatus, SolverBackend, SolverConfig, SolverError, SolverService, Variable,
    VariableType,
};

pub use application::{CoverRequest, CoverResponse, SetCoverService};

pub use solver::SolverFactory;

#[cfg(feature = "highs")]
pub use solver::HighsSolver;

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
