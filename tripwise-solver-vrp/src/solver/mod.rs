//! `VrpSolver` implementation backed by `vrp-core`.

use std::time::{Duration, Instant};

use tripwise_core::{
    Degradation, Diagnostics, RouteSolver, Solution, Strategy, TourOrder, TravelTimeMatrix,
};

use crate::vrp::VrpSolveContext;

/// Configuration for [`VrpSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrpSolverConfig {
    /// Wall-clock ceiling for one search, honoured to sub-second precision.
    pub max_time: Duration,
    /// Upper bound on `vrp-core` generations.
    pub max_generations: usize,
}

impl Default for VrpSolverConfig {
    fn default() -> Self {
        Self {
            max_time: Duration::from_secs(5),
            max_generations: 2_000,
        }
    }
}

impl VrpSolverConfig {
    /// Replace the wall-clock budget.
    #[must_use]
    pub const fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = max_time;
        self
    }

    /// Replace the generation cap.
    #[must_use]
    pub const fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }
}

/// Exact strategy using `vrp-core` metaheuristics.
///
/// Trips of at most two nodes have a single possible order and skip the
/// search.
///
/// # Examples
/// ```
/// use tripwise_core::{RouteSolver, Strategy, TravelTimeMatrix};
/// use tripwise_solver_vrp::VrpSolver;
///
/// let matrix = TravelTimeMatrix::from_rows(vec![vec![0, 300], vec![300, 0]])?;
/// let solution = VrpSolver::new().solve(&matrix);
/// assert_eq!(solution.order.nodes(), &[0, 1]);
/// assert_eq!(solution.strategy, Strategy::Exact);
/// # Ok::<(), tripwise_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VrpSolver {
    config: VrpSolverConfig,
}

impl VrpSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: VrpSolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &VrpSolverConfig {
        &self.config
    }

    fn search(&self, matrix: &TravelTimeMatrix) -> (TourOrder, Option<Degradation>) {
        let node_count = matrix.node_count();
        match VrpSolveContext::new(&self.config).solve(matrix) {
            Ok(locations) => match order_from_locations(locations, node_count) {
                Ok(order) => (order, None),
                Err(reason) => {
                    log::warn!(
                        "vrp-core returned an incomplete tour over {node_count} nodes; using sequential order"
                    );
                    (TourOrder::sequential(node_count), Some(reason))
                }
            },
            Err(err) => {
                log::warn!("vrp-core search failed: {err}; using sequential order");
                (
                    TourOrder::sequential(node_count),
                    Some(Degradation::SearchFailed),
                )
            }
        }
    }
}

impl RouteSolver for VrpSolver {
    fn strategy(&self) -> Strategy {
        Strategy::Exact
    }

    fn solve(&self, matrix: &TravelTimeMatrix) -> Solution {
        let started_at = Instant::now();
        let node_count = matrix.node_count();
        let (order, degraded) = if node_count <= 2 {
            (TourOrder::sequential(node_count), None)
        } else {
            self.search(matrix)
        };
        let solve_time = started_at.elapsed();
        log::debug!("vrp solver ordered {node_count} nodes in {solve_time:?}");

        Solution {
            order,
            strategy: Strategy::Exact,
            diagnostics: Diagnostics {
                solve_time,
                degraded,
            },
        }
    }
}

/// Accept a location sequence only if it visits all `node_count` nodes once.
fn order_from_locations(
    locations: Vec<usize>,
    node_count: usize,
) -> Result<TourOrder, Degradation> {
    if locations.len() != node_count {
        return Err(Degradation::IncompleteTour);
    }
    TourOrder::new(locations).map_err(|_| Degradation::IncompleteTour)
}
