use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
use std::sync::Arc;

/// Factory for creating solver instances from the configured backend
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend.
    ///
    /// `Auto` prefers HiGHS and falls back to CBC; asking for an engine that
    /// was not compiled in is an error.
    pub fn create_from_backend(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            SolverBackend::Highs => Self::highs(),
            SolverBackend::CoinCbc => Self::coin_cbc(),
        }
    }

    /// Get the default solver
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        Self::highs().or_else(|_| Self::coin_cbc())
    }

    /// Backends compiled into this build
    pub fn available() -> Vec<SolverBackend> {
        [SolverBackend::Highs, SolverBackend::CoinCbc]
            .into_iter()
            .filter(|&backend| Self::create_from_backend(backend).is_ok())
            .collect()
    }

    #[cfg(feature = "highs")]
    fn highs() -> Result<Arc<dyn SolverService>> {
        Ok(Arc::new(super::HighsSolver::new()))
    }

    #[cfg(not(feature = "highs"))]
    fn highs() -> Result<Arc<dyn SolverService>> {
        Err(SolverError::SolverNotAvailable(
            "HiGHS support was not compiled in (enable the `highs` feature)".to_string(),
        ))
    }

    #[cfg(feature = "coin_cbc")]
    fn coin_cbc() -> Result<Arc<dyn SolverService>> {
        Ok(Arc::new(super::CoinCbcSolver::new()))
    }

    #[cfg(not(feature = "coin_cbc"))]
    fn coin_cbc() -> Result<Arc<dyn SolverService>> {
        Err(SolverError::SolverNotAvailable(
            "COIN-OR CBC support was not compiled in (enable the `coin_cbc` feature)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_matches_first_available_backend() {
        let available = SolverFactory::available();
        match SolverFactory::create_from_backend(SolverBackend::Auto) {
            Ok(solver) => {
                let expected = available[0].to_string();
                assert_eq!(solver.name(), expected);
            }
            Err(e) => {
                assert!(available.is_empty());
                assert!(matches!(e, SolverError::SolverNotAvailable(_)));
            }
        }
    }

    #[cfg(feature = "highs")]
    #[test]
    fn highs_backend_is_named() {
        let solver = SolverFactory::create_from_backend(SolverBackend::Highs).unwrap();
        assert_eq!(solver.name(), "HiGHS");
    }
}
