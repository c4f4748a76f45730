//! Route solver contract and strategy selection.
//!
//! Every strategy answers the same question: in which order should the
//! stops of a [`TravelTimeMatrix`] be visited, starting from node 0, to keep
//! total travel time low? Strategies never fail for a well-formed matrix;
//! when a search goes wrong they degrade to a simpler order and say so in
//! [`Diagnostics`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::{TourOrder, TravelTimeMatrix};

/// Identifier of the strategy that produced an order.
///
/// Surfaced to callers for observability only; downstream scheduling never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Strategy {
    /// Time-bounded metaheuristic search approximating the optimum.
    Exact,
    /// Nearest-neighbour construction.
    Greedy,
}

impl Strategy {
    /// Return the label as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use tripwise_core::Strategy;
    ///
    /// assert_eq!(Strategy::Exact.as_str(), "exact");
    /// assert_eq!(Strategy::Greedy.to_string(), "greedy");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a strategy returned a fallback order instead of its own result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Degradation {
    /// The search engine reported an error before producing a tour.
    SearchFailed,
    /// The search produced a tour that skipped or repeated stops.
    IncompleteTour,
}

/// Observability data attached to every [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Wall-clock time spent inside the solver.
    pub solve_time: Duration,
    /// Set when the strategy fell back to the sequential order.
    pub degraded: Option<Degradation>,
}

/// A visiting order plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Nodes in visiting order.
    pub order: TourOrder,
    /// Strategy label reported to callers.
    pub strategy: Strategy,
    /// Timing and degradation details.
    pub diagnostics: Diagnostics,
}

/// Compute an open tour over every node of a travel-time matrix.
///
/// The node count is the matrix dimension. Implementations must return a
/// permutation of `0..n` starting with 0 and must not panic; callers validate
/// the matrix before invoking a solver. Solvers must be `Send + Sync` so one
/// instance can serve concurrent requests.
///
/// # Examples
/// ```
/// use tripwise_core::{GreedySolver, RouteSolver, TravelTimeMatrix};
///
/// let matrix = TravelTimeMatrix::from_rows(vec![
///     vec![0, 900, 300],
///     vec![900, 0, 400],
///     vec![300, 400, 0],
/// ])?;
/// let solution = GreedySolver.solve(&matrix);
/// assert_eq!(solution.order.nodes(), &[0, 2, 1]);
/// # Ok::<(), tripwise_core::MatrixError>(())
/// ```
pub trait RouteSolver: Send + Sync {
    /// Strategy label this solver reports when it succeeds.
    fn strategy(&self) -> Strategy;

    /// Solve for a visiting order.
    fn solve(&self, matrix: &TravelTimeMatrix) -> Solution;
}

impl<T> RouteSolver for Box<T>
where
    T: RouteSolver + ?Sized,
{
    fn strategy(&self) -> Strategy {
        (**self).strategy()
    }

    fn solve(&self, matrix: &TravelTimeMatrix) -> Solution {
        (**self).solve(matrix)
    }
}

/// Strategy preference read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SolverKind {
    /// Use the exact strategy when this build includes it.
    #[default]
    Auto,
    /// Prefer the exact strategy; fall back to greedy when unavailable.
    Exact,
    /// Always use nearest-neighbour construction.
    Greedy,
}

/// Error returned when parsing an unknown [`SolverKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solver strategy {0:?}; expected auto, exact or greedy")]
pub struct ParseSolverKindError(String);

impl FromStr for SolverKind {
    type Err = ParseSolverKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" => Ok(Self::Exact),
            "greedy" => Ok(Self::Greedy),
            _ => Err(ParseSolverKindError(s.to_owned())),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::Greedy => "greedy",
        })
    }
}

/// Pick the solver for this process.
///
/// `exact` is the deployment's exact-strategy capability: `Some` when the
/// build ships one, `None` otherwise. Call once at start-up and share the
/// result across requests.
///
/// # Examples
/// ```
/// use tripwise_core::{SolverKind, Strategy, select_solver};
///
/// let solver = select_solver(SolverKind::Exact, None);
/// assert_eq!(solver.strategy(), Strategy::Greedy);
/// ```
pub fn select_solver(
    kind: SolverKind,
    exact: Option<Box<dyn RouteSolver>>,
) -> Box<dyn RouteSolver> {
    match (kind, exact) {
        (SolverKind::Greedy, _) => Box::new(crate::GreedySolver),
        (SolverKind::Auto | SolverKind::Exact, Some(solver)) => solver,
        (SolverKind::Exact, None) => {
            log::warn!("exact route solver requested but not available; using greedy strategy");
            Box::new(crate::GreedySolver)
        }
        (SolverKind::Auto, None) => {
            log::debug!("no exact route solver in this build; using greedy strategy");
            Box::new(crate::GreedySolver)
        }
    }
}
