//! Turn a visiting order into wall-clock arrival and departure times.
//!
//! A running clock starts at the day's start time. Each leg adds its travel
//! time rounded up to whole minutes, giving the arrival; the stop's visit
//! length gives the departure, which becomes the clock for the next leg.
//!
//! Travel costs are used as-is. An unreachable leg therefore shows up as an
//! absurd arrival time rather than an error, which lets callers spot bad
//! upstream data by inspecting `travel_seconds_from_prev`.

use thiserror::Error;

use crate::{Stop, TimeOfDay, TourOrder, TravelTimeMatrix};

/// Errors raised when the builder's inputs disagree about the node count.
///
/// These indicate a caller bug; the scheduler validates inputs so they never
/// surface through [`crate::Scheduler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    /// The order and the matrix cover different numbers of nodes.
    #[error("order visits {order_nodes} nodes but the matrix covers {matrix_nodes}")]
    MatrixMismatch {
        /// Nodes in the order.
        order_nodes: usize,
        /// Nodes in the matrix.
        matrix_nodes: usize,
    },
    /// The stop list does not match nodes `1..n` of the order.
    #[error("order expects {expected} stops but {found} were supplied")]
    StopCountMismatch {
        /// Stops implied by the order.
        expected: usize,
        /// Stops supplied.
        found: usize,
    },
}

/// One timed visit in an itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItineraryEntry {
    /// Matrix node of the stop (stop list index plus one).
    #[cfg_attr(feature = "serde", serde(rename = "index"))]
    pub node_index: usize,
    /// Stop display name.
    pub name: String,
    /// Stop display address.
    pub address: String,
    /// Stop latitude.
    pub lat: f64,
    /// Stop longitude.
    pub lng: f64,
    /// Arrival on the 24-hour clock face.
    #[cfg_attr(feature = "serde", serde(rename = "arrival_time"))]
    pub arrival: TimeOfDay,
    /// Departure on the 24-hour clock face.
    #[cfg_attr(feature = "serde", serde(rename = "departure_time"))]
    pub departure: TimeOfDay,
    /// Travel cost of the leg ending at this stop.
    #[cfg_attr(feature = "serde", serde(rename = "travel_seconds_from_prev"))]
    pub travel_seconds: u64,
    /// Arrival as minutes since the start day's midnight, without wrapping.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub arrival_minutes: u64,
    /// Departure as minutes since the start day's midnight, without wrapping.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub departure_minutes: u64,
}

/// Walk `order` and timestamp every stop after the start.
///
/// `stops[k]` describes node `k + 1`. The start contributes no entry, so an
/// order over `n` nodes yields `n - 1` entries.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripwise_core::{Stop, TourOrder, TravelTimeMatrix, build_itinerary};
///
/// let matrix = TravelTimeMatrix::from_rows(vec![
///     vec![0, 600, 900],
///     vec![600, 0, 300],
///     vec![900, 300, 0],
/// ])?;
/// let stops = vec![
///     Stop::new(Coord { x: 0.01, y: 0.0 })?.with_visit_minutes(30),
///     Stop::new(Coord { x: 0.02, y: 0.0 })?.with_visit_minutes(20),
/// ];
/// let order = TourOrder::new(vec![0, 1, 2])?;
///
/// let entries = build_itinerary(&order, &matrix, &stops, "08:00".parse()?)?;
/// assert_eq!(entries[0].arrival.to_string(), "08:10");
/// assert_eq!(entries[1].departure.to_string(), "09:05");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_itinerary(
    order: &TourOrder,
    matrix: &TravelTimeMatrix,
    stops: &[Stop],
    day_start: TimeOfDay,
) -> Result<Vec<ItineraryEntry>, ItineraryError> {
    let order_nodes = order.node_count();
    if matrix.node_count() != order_nodes {
        return Err(ItineraryError::MatrixMismatch {
            order_nodes,
            matrix_nodes: matrix.node_count(),
        });
    }
    let expected = order_nodes.saturating_sub(1);
    if stops.len() != expected {
        return Err(ItineraryError::StopCountMismatch {
            expected,
            found: stops.len(),
        });
    }

    let mut clock = u64::from(day_start.minutes());
    let mut entries = Vec::with_capacity(expected);
    for (prev, node) in order.legs() {
        // `TourOrder` guarantees node 0 only appears first, so every leg ends
        // at a stop.
        let Some(stop) = node.checked_sub(1).and_then(|idx| stops.get(idx)) else {
            continue;
        };
        let travel_seconds = matrix.cost(prev, node);
        let arrival_minutes = clock.saturating_add(travel_seconds.div_ceil(60));
        let departure_minutes = arrival_minutes.saturating_add(u64::from(stop.visit_minutes()));
        let location = stop.location();
        entries.push(ItineraryEntry {
            node_index: node,
            name: stop.name().to_owned(),
            address: stop.address().to_owned(),
            lat: location.y,
            lng: location.x,
            arrival: TimeOfDay::wrapping_from_minutes(arrival_minutes),
            departure: TimeOfDay::wrapping_from_minutes(departure_minutes),
            travel_seconds,
            arrival_minutes,
            departure_minutes,
        });
        clock = departure_minutes;
    }
    Ok(entries)
}
