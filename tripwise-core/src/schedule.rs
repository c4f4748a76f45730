//! Assemble a timed trip schedule from a request.
//!
//! [`Scheduler`] wires the pieces together: validate the request, fetch a
//! travel-time matrix for the start plus every stop, solve for a visiting
//! order, then timestamp each stop. The request shape mirrors the JSON
//! accepted by the schedule endpoint: a start location, a list of places and
//! optional `HH:MM` start and end times.

use geo::Coord;
use thiserror::Error;

use crate::stop::{StopError, ensure_finite};
use crate::{
    Degradation, ItineraryEntry, ItineraryError, MatrixError, RouteSolver, Solution, Stop,
    Strategy, TimeOfDay, TimeOfDayError, TourOrder, TravelTimeError, TravelTimeMatrix,
    TravelTimeProvider, build_itinerary, is_unreachable,
};

/// Day start used when a request omits `start_time`.
pub const DEFAULT_START_TIME: &str = "08:00";
/// Day end used when a request omits `end_time`.
pub const DEFAULT_END_TIME: &str = "18:00";

/// A latitude/longitude pair as exchanged with callers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// A place as submitted by a caller.
///
/// Every field is optional on the wire. Coordinates are required by the
/// scheduler; resolving a name or address to coordinates is the caller's
/// job.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceInput {
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Display address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lng: Option<f64>,
    /// Visit length in minutes; defaults to 30.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_minutes: Option<u32>,
}

/// Parameters for a schedule request.
///
/// # Examples
/// ```
/// use tripwise_core::{LatLng, PlaceInput, ScheduleRequest};
///
/// let request = ScheduleRequest {
///     start_location: LatLng { lat: 21.03, lng: 105.85 },
///     places: vec![PlaceInput {
///         name: Some("Hoan Kiem Lake".into()),
///         lat: Some(21.0288),
///         lng: Some(105.8525),
///         ..PlaceInput::default()
///     }],
///     start_time: None,
///     end_time: None,
/// };
/// let validated = request.validate()?;
/// assert_eq!(validated.stops.len(), 1);
/// assert_eq!(validated.day_start.to_string(), "08:00");
/// # Ok::<(), tripwise_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRequest {
    /// Where the trip begins (node 0).
    pub start_location: LatLng,
    /// Places to visit, in input order (nodes `1..n`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub places: Vec<PlaceInput>,
    /// Day start as `HH:MM`; defaults to `08:00`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<String>,
    /// Day end as `HH:MM`; defaults to `18:00`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end_time: Option<String>,
}

/// A request whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Trip start.
    pub start: Coord<f64>,
    /// Stops in input order.
    pub stops: Vec<Stop>,
    /// Time the trip leaves the start.
    pub day_start: TimeOfDay,
    /// Time the trip should be over.
    pub day_end: TimeOfDay,
}

impl ValidatedRequest {
    /// Matrix nodes: the start followed by every stop.
    pub fn nodes(&self) -> Vec<Coord<f64>> {
        std::iter::once(self.start)
            .chain(self.stops.iter().map(Stop::location))
            .collect()
    }
}

/// Reasons a schedule request is rejected before solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// A place lacked latitude or longitude.
    #[error("place {index} has no coordinates; resolve it before scheduling")]
    MissingCoordinates {
        /// Position of the place in the request.
        index: usize,
    },
    /// The start location was not a finite coordinate.
    #[error("start location is invalid: {0}")]
    StartLocation(#[source] StopError),
    /// A place coordinate was not finite.
    #[error("place {index} is invalid: {source}")]
    Place {
        /// Position of the place in the request.
        index: usize,
        /// Underlying coordinate error.
        #[source]
        source: StopError,
    },
    /// `start_time` did not parse.
    #[error("start_time is invalid: {0}")]
    StartTime(#[source] TimeOfDayError),
    /// `end_time` did not parse.
    #[error("end_time is invalid: {0}")]
    EndTime(#[source] TimeOfDayError),
    /// The travel-time matrix does not fit the request.
    #[error("travel-time matrix is invalid: {0}")]
    Matrix(#[source] MatrixError),
}

/// Errors returned by [`Scheduler`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The request was rejected before solving.
    #[error("invalid schedule request: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// The travel-time provider failed.
    #[error("failed to fetch travel times: {0}")]
    TravelTime(#[source] TravelTimeError),
    /// The itinerary builder rejected the solved order.
    #[error("failed to build itinerary: {0}")]
    Itinerary(#[from] ItineraryError),
}

impl From<TravelTimeError> for ScheduleError {
    fn from(err: TravelTimeError) -> Self {
        match err {
            TravelTimeError::Matrix(source) => Self::InvalidInput(InvalidInput::Matrix(source)),
            other => Self::TravelTime(other),
        }
    }
}

impl ScheduleRequest {
    /// Check coordinates and times and build the stop list.
    pub fn validate(&self) -> Result<ValidatedRequest, ScheduleError> {
        let start = Coord::from(self.start_location);
        ensure_finite(start).map_err(InvalidInput::StartLocation)?;

        let stops = self
            .places
            .iter()
            .enumerate()
            .map(|(index, place)| place_to_stop(index, place))
            .collect::<Result<Vec<_>, _>>()?;

        let day_start = parse_time(self.start_time.as_deref(), DEFAULT_START_TIME)
            .map_err(InvalidInput::StartTime)?;
        let day_end = parse_time(self.end_time.as_deref(), DEFAULT_END_TIME)
            .map_err(InvalidInput::EndTime)?;

        Ok(ValidatedRequest {
            start,
            stops,
            day_start,
            day_end,
        })
    }
}

fn place_to_stop(index: usize, place: &PlaceInput) -> Result<Stop, InvalidInput> {
    let (Some(lat), Some(lng)) = (place.lat, place.lng) else {
        return Err(InvalidInput::MissingCoordinates { index });
    };
    let stop = Stop::new(Coord { x: lng, y: lat })
        .map_err(|source| InvalidInput::Place { index, source })?
        .with_name(place.name.clone().unwrap_or_default())
        .with_address(place.address.clone().unwrap_or_default());
    Ok(match place.visit_minutes {
        Some(minutes) => stop.with_visit_minutes(minutes),
        None => stop,
    })
}

fn parse_time(raw: Option<&str>, default: &str) -> Result<TimeOfDay, TimeOfDayError> {
    raw.unwrap_or(default).parse()
}

/// Aggregate figures for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleSummary {
    /// Sum of travel costs over every leg.
    pub total_travel_seconds: u64,
    /// Sum of visit lengths.
    pub total_visit_minutes: u64,
    /// Departure from the last stop, or the day start when there are none.
    pub finish_time: TimeOfDay,
    /// Whether the last departure falls after the requested day end.
    pub exceeds_day_end: bool,
    /// Legs whose travel cost is the unreachable sentinel.
    pub unreachable_legs: usize,
    /// Set when the solver fell back to the sequential order.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub degraded: Option<Degradation>,
}

/// A solved, timed trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    /// Stops in visiting order with their times.
    pub ordered: Vec<ItineraryEntry>,
    /// Strategy that produced the order.
    pub method: Strategy,
    /// Node order including the start.
    pub order: TourOrder,
    /// Aggregate figures.
    pub summary: ScheduleSummary,
}

/// Plan schedules with a travel-time provider and a route solver.
///
/// The solver is chosen once, typically with [`crate::select_solver`], and
/// reused for every request. A `Scheduler` holds no per-request state, so it
/// can be shared across threads when its provider allows.
pub struct Scheduler<P>
where
    P: TravelTimeProvider,
{
    provider: P,
    solver: Box<dyn RouteSolver>,
}

impl<P> std::fmt::Debug for Scheduler<P>
where
    P: TravelTimeProvider + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("provider", &self.provider)
            .field("strategy", &self.solver.strategy())
            .finish()
    }
}

impl<P> Scheduler<P>
where
    P: TravelTimeProvider,
{
    /// Combine a provider and a solver.
    pub fn new(provider: P, solver: Box<dyn RouteSolver>) -> Self {
        Self { provider, solver }
    }

    /// Strategy the configured solver reports.
    pub fn strategy(&self) -> Strategy {
        self.solver.strategy()
    }

    /// Validate, fetch travel times, solve and timestamp a request.
    ///
    /// A request without places yields an empty schedule and never contacts
    /// the provider.
    pub fn plan(&self, request: &ScheduleRequest) -> Result<Schedule, ScheduleError> {
        let validated = request.validate()?;
        if validated.stops.is_empty() {
            log::debug!("schedule request has no places; returning an empty schedule");
            let matrix = TravelTimeMatrix::from_rows(vec![vec![0]])
                .map_err(InvalidInput::Matrix)?;
            return self.assemble(&validated, &matrix);
        }
        let matrix = self.provider.travel_time_matrix(&validated.nodes())?;
        self.assemble(&validated, &matrix)
    }

    /// Plan a request against a matrix fetched by the caller.
    pub fn plan_with_matrix(
        &self,
        request: &ScheduleRequest,
        matrix: &TravelTimeMatrix,
    ) -> Result<Schedule, ScheduleError> {
        let validated = request.validate()?;
        self.assemble(&validated, matrix)
    }

    fn assemble(
        &self,
        request: &ValidatedRequest,
        matrix: &TravelTimeMatrix,
    ) -> Result<Schedule, ScheduleError> {
        matrix
            .ensure_nodes(request.stops.len() + 1)
            .map_err(InvalidInput::Matrix)?;

        let Solution {
            order,
            strategy,
            diagnostics,
        } = self.solver.solve(matrix);
        if let Some(reason) = diagnostics.degraded {
            log::warn!("{strategy} solver degraded to sequential order: {reason:?}");
        }
        log::debug!(
            "solved {} stops with {strategy} strategy in {:?}",
            request.stops.len(),
            diagnostics.solve_time
        );

        let ordered = build_itinerary(&order, matrix, &request.stops, request.day_start)?;
        let summary = summarise(&ordered, request, diagnostics.degraded);
        if summary.unreachable_legs > 0 {
            log::warn!(
                "schedule includes {} unreachable legs; arrival times are not meaningful",
                summary.unreachable_legs
            );
        }
        Ok(Schedule {
            ordered,
            method: strategy,
            order,
            summary,
        })
    }
}

fn summarise(
    entries: &[ItineraryEntry],
    request: &ValidatedRequest,
    degraded: Option<Degradation>,
) -> ScheduleSummary {
    let start_minutes = u64::from(request.day_start.minutes());
    let finish_minutes = entries
        .last()
        .map_or(start_minutes, |entry| entry.departure_minutes);
    let mut end_minutes = u64::from(request.day_end.minutes());
    if end_minutes <= start_minutes {
        // An end at or before the start means the day runs past midnight.
        end_minutes += crate::time::MINUTES_PER_DAY;
    }
    ScheduleSummary {
        total_travel_seconds: entries
            .iter()
            .map(|entry| entry.travel_seconds)
            .fold(0, u64::saturating_add),
        total_visit_minutes: request
            .stops
            .iter()
            .map(|stop| u64::from(stop.visit_minutes()))
            .sum(),
        finish_time: TimeOfDay::wrapping_from_minutes(finish_minutes),
        exceeds_day_end: finish_minutes > end_minutes,
        unreachable_legs: entries
            .iter()
            .filter(|entry| is_unreachable(entry.travel_seconds))
            .count(),
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingTravelTimeProvider, UnitTravelTimeProvider};
    use crate::{FixedMatrixProvider, GreedySolver, UNREACHABLE_SECONDS};
    use rstest::{fixture, rstest};

    fn place(name: &str, lat: f64, lng: f64, visit: Option<u32>) -> PlaceInput {
        PlaceInput {
            name: Some(name.to_owned()),
            address: None,
            lat: Some(lat),
            lng: Some(lng),
            visit_minutes: visit,
        }
    }

    #[fixture]
    fn request() -> ScheduleRequest {
        ScheduleRequest {
            start_location: LatLng { lat: 0.0, lng: 0.0 },
            places: vec![
                place("far", 0.0, 0.02, Some(30)),
                place("near", 0.0, 0.01, Some(20)),
            ],
            start_time: Some("08:00".to_owned()),
            end_time: None,
        }
    }

    fn fixed(rows: Vec<Vec<u64>>) -> FixedMatrixProvider {
        FixedMatrixProvider::new(TravelTimeMatrix::from_rows(rows).expect("square matrix"))
    }

    #[rstest]
    fn place_defaults_apply(request: ScheduleRequest) {
        let mut req = request;
        req.places[0].visit_minutes = None;
        req.places[0].name = None;
        let validated = req.validate().expect("valid request");
        assert_eq!(validated.stops[0].visit_minutes(), 30);
        assert_eq!(validated.stops[0].name(), "");
        assert_eq!(validated.day_end.to_string(), "18:00");
    }

    #[rstest]
    fn missing_coordinates_are_rejected(request: ScheduleRequest) {
        let mut req = request;
        req.places[1].lng = None;
        let err = req.validate().expect_err("missing longitude");
        assert_eq!(
            err,
            ScheduleError::InvalidInput(InvalidInput::MissingCoordinates { index: 1 })
        );
    }

    #[rstest]
    fn unparseable_start_time_is_rejected(request: ScheduleRequest) {
        let mut req = request;
        req.start_time = Some("8am".to_owned());
        let err = req.validate().expect_err("bad start time");
        assert!(matches!(
            err,
            ScheduleError::InvalidInput(InvalidInput::StartTime(_))
        ));
    }

    #[rstest]
    fn plan_orders_and_times_stops(request: ScheduleRequest) {
        let provider = fixed(vec![
            vec![0, 1200, 600],
            vec![1200, 0, 600],
            vec![600, 600, 0],
        ]);
        let scheduler = Scheduler::new(provider, Box::new(GreedySolver));

        let schedule = scheduler.plan(&request).expect("schedule");

        assert_eq!(schedule.method, Strategy::Greedy);
        assert_eq!(schedule.order.nodes(), &[0, 2, 1]);
        let names: Vec<&str> = schedule.ordered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["near", "far"]);
        assert_eq!(schedule.summary.total_travel_seconds, 1200);
        assert_eq!(schedule.summary.total_visit_minutes, 50);
        assert_eq!(schedule.summary.finish_time.to_string(), "09:10");
        assert!(!schedule.summary.exceeds_day_end);
    }

    #[rstest]
    fn empty_request_skips_provider() {
        let request = ScheduleRequest {
            start_location: LatLng { lat: 0.0, lng: 0.0 },
            places: Vec::new(),
            start_time: None,
            end_time: None,
        };
        // A 2x2 matrix would fail the dimension check if it were consulted.
        let scheduler = Scheduler::new(fixed(vec![vec![0, 1], vec![1, 0]]), Box::new(GreedySolver));
        let schedule = scheduler.plan(&request).expect("empty schedule");
        assert!(schedule.ordered.is_empty());
        assert_eq!(schedule.summary.finish_time.to_string(), "08:00");
    }

    #[rstest]
    fn wrong_matrix_dimension_is_invalid_input(request: ScheduleRequest) {
        let scheduler = Scheduler::new(fixed(vec![vec![0, 1], vec![1, 0]]), Box::new(GreedySolver));
        let err = scheduler.plan(&request).expect_err("dimension mismatch");
        assert!(matches!(
            err,
            ScheduleError::InvalidInput(InvalidInput::Matrix(MatrixError::DimensionMismatch {
                expected: 3,
                found: 2,
            }))
        ));
    }

    #[rstest]
    fn provider_failure_is_reported(request: ScheduleRequest) {
        let offline = FailingTravelTimeProvider::new(TravelTimeError::Network {
            url: "http://localhost:5000".to_owned(),
            message: "connection refused".to_owned(),
        });
        let scheduler = Scheduler::new(offline, Box::new(GreedySolver));
        let err = scheduler.plan(&request).expect_err("offline provider");
        assert!(matches!(
            err,
            ScheduleError::TravelTime(TravelTimeError::Network { .. })
        ));
    }

    #[rstest]
    fn late_finish_is_flagged(request: ScheduleRequest) {
        let mut req = request;
        req.start_time = Some("17:30".to_owned());
        let scheduler = Scheduler::new(UnitTravelTimeProvider, Box::new(GreedySolver));
        let schedule = scheduler.plan(&req).expect("schedule");
        assert!(schedule.summary.exceeds_day_end);
    }

    #[rstest]
    fn overnight_day_end_is_next_day(request: ScheduleRequest) {
        let mut req = request;
        req.start_time = Some("22:00".to_owned());
        req.end_time = Some("02:00".to_owned());
        let scheduler = Scheduler::new(UnitTravelTimeProvider, Box::new(GreedySolver));
        let schedule = scheduler.plan(&req).expect("schedule");
        assert!(!schedule.summary.exceeds_day_end);
        assert_eq!(schedule.summary.finish_time.to_string(), "22:52");
    }

    #[rstest]
    fn unreachable_legs_are_counted(request: ScheduleRequest) {
        let u = UNREACHABLE_SECONDS;
        let matrix =
            TravelTimeMatrix::from_rows(vec![vec![0, u, u], vec![u, 0, u], vec![u, u, 0]])
                .expect("matrix");
        let scheduler = Scheduler::new(UnitTravelTimeProvider, Box::new(GreedySolver));
        let schedule = scheduler
            .plan_with_matrix(&request, &matrix)
            .expect("schedule");
        assert_eq!(schedule.summary.unreachable_legs, 2);
        assert!(schedule.summary.exceeds_day_end);
    }
}
