//! Deterministic travel-time providers and matrix helpers for tests.

use geo::Coord;

use crate::{Stop, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};

/// Provider returning one-second edges between distinct nodes.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitTravelTimeProvider;

impl TravelTimeProvider for UnitTravelTimeProvider {
    fn travel_time_matrix(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if nodes.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        let n = nodes.len();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| u64::from(i != j)).collect())
            .collect();
        Ok(TravelTimeMatrix::from_rows(rows)?)
    }
}

/// Provider that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingTravelTimeProvider {
    error: TravelTimeError,
}

impl FailingTravelTimeProvider {
    /// Fail every call with `error`.
    pub const fn new(error: TravelTimeError) -> Self {
        Self { error }
    }
}

impl TravelTimeProvider for FailingTravelTimeProvider {
    fn travel_time_matrix(
        &self,
        _nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        Err(self.error.clone())
    }
}

/// Build a matrix for points on a line where each unit costs `seconds_per_unit`.
///
/// Handy for property tests: the matrix is symmetric with a zero diagonal.
pub fn line_matrix(positions: &[u64], seconds_per_unit: u64) -> TravelTimeMatrix {
    let rows = positions
        .iter()
        .map(|a| {
            positions
                .iter()
                .map(|b| a.abs_diff(*b).saturating_mul(seconds_per_unit))
                .collect()
        })
        .collect();
    // Rows built from one slice are always square.
    match TravelTimeMatrix::from_rows(rows) {
        Ok(matrix) => matrix,
        Err(err) => panic!("line matrix must be square: {err}"),
    }
}

/// Build `count` stops spaced along the equator with the given visit length.
pub fn stops_along_equator(count: usize, visit_minutes: u32) -> Vec<Stop> {
    (1..=count)
        .map(|i| {
            let x = f64::from(u32::try_from(i).unwrap_or(u32::MAX)) * 0.01;
            match Stop::new(Coord { x, y: 0.0 }) {
                Ok(stop) => stop
                    .with_name(format!("stop {i}"))
                    .with_visit_minutes(visit_minutes),
                Err(err) => panic!("generated coordinate must be finite: {err}"),
            }
        })
        .collect()
}
