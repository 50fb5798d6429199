// Cover service: validate -> encode -> solve -> decode, one round trip per call

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    decoder::{self, CoverOutcome, CoverSelection},
    encoding,
    models::SolverConfig,
    set_collection::{InputError, Scalar, SetCollection},
    solver_service::{SolverError, SolverService},
    value_objects::{CoverVariant, SolutionStatus},
};
use crate::solver::SolverFactory;

/// Engine values further than this from an integer are logged
const INTEGRALITY_WARN_TOLERANCE: f64 = 1e-6;

/// Stateless entry point for set-cover solves.
///
/// Holds only the engine handle and its configuration, so one instance can
/// serve concurrent calls.
#[derive(Clone)]
pub struct SetCoverService {
    solver: Arc<dyn SolverService>,
    config: SolverConfig,
}

impl SetCoverService {
    pub fn new(solver: Arc<dyn SolverService>, config: SolverConfig) -> Self {
        Self { solver, config }
    }

    /// Service backed by the engine named in `config.backend`
    pub fn from_config(config: SolverConfig) -> Result<Self, SolverError> {
        let solver = SolverFactory::create_from_backend(config.backend)?;
        Ok(Self::new(solver, config))
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Validate raw input, then solve.
    ///
    /// Only invalid input is an error; engine trouble is `NoSolution`.
    pub fn solve_raw<I, L, S, E>(
        &self,
        entries: I,
        selector: &str,
        k: Option<i64>,
    ) -> Result<CoverOutcome, InputError>
    where
        I: IntoIterator<Item = (L, S)>,
        L: Into<Scalar>,
        S: IntoIterator<Item = E>,
        E: Into<Scalar>,
    {
        let variant = CoverVariant::from_selector(selector, k)?;
        let collection = SetCollection::new(entries)?;
        Ok(self.solve(&collection, variant))
    }

    pub fn solve(&self, collection: &SetCollection, variant: CoverVariant) -> CoverOutcome {
        info!(
            variant = %variant,
            sets = collection.num_sets(),
            elements = collection.num_elements(),
            solver = self.solver.name(),
            "Solving set cover"
        );

        if collection.num_elements() == 0 {
            debug!("Empty universe, selecting no sets");
            return CoverOutcome::Solved(CoverSelection::empty(collection));
        }

        let problem = encoding::encode(collection, variant).with_config(self.config.clone());
        debug!(
            model = %problem.name,
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            "Encoded MILP"
        );

        let solution = match self.solver.solve(&problem) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(error = %e, "Solver failed, reporting no solution");
                return CoverOutcome::NoSolution(SolutionStatus::Error);
            }
        };

        debug!(
            status = %solution.status,
            solve_time_ms = solution.statistics.solve_time_ms,
            "Solver finished"
        );

        if !solution.is_optimal() {
            warn!(
                status = %solution.status,
                detail = %solution.message,
                "No optimal solution"
            );
        } else {
            let drift = decoder::max_integrality_violation(&solution.variable_values);
            if drift > INTEGRALITY_WARN_TOLERANCE {
                warn!(drift, "Solution values drift from integrality");
            }
        }

        let outcome = decoder::decode(collection, &solution);
        if let CoverOutcome::Solved(selection) = &outcome {
            info!(
                set_count = selection.set_count(),
                covered = selection.covered,
                uncovered = selection.uncovered.len(),
                "Cover found"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MilpProblem, Solution};
    use crate::domain::solver_service;
    use std::sync::Mutex;

    /// Returns a canned solution and remembers the problem it was given
    struct ScriptedSolver {
        reply: fn(&MilpProblem) -> solver_service::Result<Solution>,
        seen: Mutex<Vec<MilpProblem>>,
    }

    impl ScriptedSolver {
        fn new(reply: fn(&MilpProblem) -> solver_service::Result<Solution>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl SolverService for ScriptedSolver {
        fn solve(&self, problem: &MilpProblem) -> solver_service::Result<Solution> {
            self.seen.lock().unwrap().push(problem.clone());
            (self.reply)(problem)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn sample() -> SetCollection {
        SetCollection::new([("A", vec![1, 2, 3]), ("B", vec![3, 4])]).unwrap()
    }

    #[test]
    fn decodes_engine_solution() {
        let solver = ScriptedSolver::new(|problem| {
            let mut values = vec![0.0; problem.num_variables()];
            values[0] = 1.0;
            values[1] = 0.99999999;
            Ok(Solution::optimal(2.0, values))
        });
        let service = SetCoverService::new(solver.clone(), SolverConfig::default());

        let outcome = service.solve(&sample(), CoverVariant::Strict);
        let selection = outcome.into_selection().unwrap();
        assert_eq!(selection.labels, vec![Scalar::from("A"), Scalar::from("B")]);
        assert_eq!(selection.covered, 4);
        assert_eq!(solver.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn passes_config_to_engine() {
        let solver = ScriptedSolver::new(|problem| {
            Ok(Solution::optimal(0.0, vec![0.0; problem.num_variables()]))
        });
        let config = SolverConfig {
            time_limit: Some(2.5),
            ..SolverConfig::default()
        };
        let service = SetCoverService::new(solver.clone(), config);

        service.solve(&sample(), CoverVariant::Transpose { max_sets: 1 });
        let seen = solver.seen.lock().unwrap();
        assert_eq!(seen[0].solver_config.time_limit, Some(2.5));
        assert_eq!(seen[0].name, "transpose-cover");
    }

    #[test]
    fn engine_errors_become_no_solution() {
        let solver = ScriptedSolver::new(|_| {
            Err(SolverError::ExecutionFailed("out of memory".into()))
        });
        let service = SetCoverService::new(solver, SolverConfig::default());

        assert_eq!(
            service.solve(&sample(), CoverVariant::Relaxed { max_uncovered: 1 }),
            CoverOutcome::NoSolution(SolutionStatus::Error)
        );
    }

    #[test]
    fn infeasible_becomes_no_solution() {
        let solver = ScriptedSolver::new(|_| {
            Ok(Solution::new(SolutionStatus::Infeasible, "no feasible point"))
        });
        let service = SetCoverService::new(solver, SolverConfig::default());

        assert_eq!(
            service.solve(&sample(), CoverVariant::Strict),
            CoverOutcome::NoSolution(SolutionStatus::Infeasible)
        );
    }

    #[test]
    fn empty_universe_skips_engine() {
        let solver = ScriptedSolver::new(|_| panic!("engine must not be called"));
        let service = SetCoverService::new(solver.clone(), SolverConfig::default());
        let collection = SetCollection::new([("A", Vec::<i64>::new())]).unwrap();

        let outcome = service.solve(&collection, CoverVariant::Strict);
        assert_eq!(outcome.selection().map(|s| s.set_count()), Some(0));
        assert!(solver.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn invalid_input_never_reaches_engine() {
        let solver = ScriptedSolver::new(|_| panic!("engine must not be called"));
        let service = SetCoverService::new(solver.clone(), SolverConfig::default());

        let dup = service.solve_raw([("A", vec![1]), ("A", vec![2])], "strict", None);
        assert_eq!(dup.unwrap_err(), InputError::DuplicateLabel(Scalar::from("A")));

        let negative = service.solve_raw([("A", vec![1])], "transpose", Some(-2));
        assert_eq!(negative.unwrap_err(), InputError::NegativeBudget(-2));

        let unknown = service.solve_raw([("A", vec![1])], "greedy", Some(1));
        assert_eq!(unknown.unwrap_err(), InputError::UnknownVariant("greedy".into()));

        assert!(solver.seen.lock().unwrap().is_empty());
    }
}
