//! Facade crate for the Tripwise trip planner.
//!
//! This crate re-exports the core domain types and exposes the exact route
//! solver and the OSRM travel-time provider behind feature flags.

#![forbid(unsafe_code)]

use std::time::Duration;

pub use tripwise_core::{
    DEFAULT_END_TIME, DEFAULT_START_TIME, DEFAULT_VISIT_MINUTES, Degradation, Diagnostics,
    FixedMatrixProvider, GreedySolver, InvalidInput, ItineraryEntry, ItineraryError, LatLng,
    MINUTES_PER_DAY, MatrixError, PlaceInput, RouteSolver, Schedule, ScheduleError,
    ScheduleRequest, ScheduleSummary, Scheduler, Solution, SolverKind, Stop, StopError, Strategy,
    TimeOfDay, TimeOfDayError, TourOrder, TourOrderError, TravelTimeError, TravelTimeMatrix,
    TravelTimeProvider, UNREACHABLE_SECONDS, build_itinerary, select_solver,
};

#[cfg(feature = "solver-vrp")]
pub use tripwise_solver_vrp::{VrpSolver, VrpSolverConfig};

#[cfg(feature = "routing-http")]
pub use tripwise_data::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig, ProviderBuildError};

/// Build the route solver for `kind` using the strategies compiled into
/// this build.
///
/// With the `solver-vrp` feature, [`SolverKind::Auto`] and
/// [`SolverKind::Exact`] resolve to [`VrpSolver`] bounded by `max_time`;
/// without it every kind resolves to [`GreedySolver`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use tripwise::{SolverKind, Strategy, build_solver};
///
/// let solver = build_solver(SolverKind::Greedy, Duration::from_secs(5));
/// assert_eq!(solver.strategy(), Strategy::Greedy);
/// ```
#[must_use]
pub fn build_solver(kind: SolverKind, max_time: Duration) -> Box<dyn RouteSolver> {
    select_solver(kind, exact_solver(max_time))
}

#[cfg(feature = "solver-vrp")]
fn exact_solver(max_time: Duration) -> Option<Box<dyn RouteSolver>> {
    let config = VrpSolverConfig::default().with_max_time(max_time);
    Some(Box::new(VrpSolver::with_config(config)))
}

#[cfg(not(feature = "solver-vrp"))]
const fn exact_solver(_max_time: Duration) -> Option<Box<dyn RouteSolver>> {
    None
}
