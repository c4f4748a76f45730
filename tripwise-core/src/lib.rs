//! Core domain types and algorithms for Tripwise.
//!
//! The crate models a day trip as a start location plus a list of stops,
//! orders the stops with a [`RouteSolver`] over a [`TravelTimeMatrix`], and
//! turns the order into wall-clock times with [`build_itinerary`].
//! [`Scheduler`] runs the whole pipeline for a [`ScheduleRequest`].
//!
//! Node 0 of every matrix and order is the trip start; node `k` is stop
//! `k - 1` in input order.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod greedy;
mod itinerary;
mod schedule;
mod solver;
mod stop;
mod time;
mod tour;
pub mod travel_time;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use greedy::{GreedySolver, nearest_neighbour_order};
pub use itinerary::{ItineraryEntry, ItineraryError, build_itinerary};
pub use schedule::{
    DEFAULT_END_TIME, DEFAULT_START_TIME, InvalidInput, LatLng, PlaceInput, Schedule,
    ScheduleError, ScheduleRequest, ScheduleSummary, Scheduler, ValidatedRequest,
};
pub use solver::{
    Degradation, Diagnostics, ParseSolverKindError, RouteSolver, Solution, SolverKind, Strategy,
    select_solver,
};
pub use stop::{DEFAULT_VISIT_MINUTES, Stop, StopError, ensure_finite};
pub use time::{MINUTES_PER_DAY, TimeOfDay, TimeOfDayError};
pub use tour::{TourOrder, TourOrderError};
pub use travel_time::{
    FixedMatrixProvider, MatrixError, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
    UNREACHABLE_SECONDS, is_unreachable,
};
