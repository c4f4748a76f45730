//! Places a trip visits.

use geo::Coord;
use thiserror::Error;

/// Visit length assumed when a caller does not specify one.
pub const DEFAULT_VISIT_MINUTES: u32 = 30;

/// Errors returned by [`Stop::new`] and [`ensure_finite`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StopError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate ({lat}, {lng}) must be finite")]
    NonFiniteCoordinate {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lng: f64,
    },
}

/// Reject coordinates that are not finite numbers.
///
/// No range check is applied; WGS84 semantics are assumed but not enforced.
pub fn ensure_finite(location: Coord<f64>) -> Result<(), StopError> {
    if location.x.is_finite() && location.y.is_finite() {
        Ok(())
    } else {
        Err(StopError::NonFiniteCoordinate {
            lat: location.y,
            lng: location.x,
        })
    }
}

/// One place to visit.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A stop's
/// identity is its position in the caller's list: names and addresses may be
/// empty or repeated.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripwise_core::Stop;
///
/// let stop = Stop::new(Coord { x: 105.85, y: 21.03 })?
///     .with_name("Temple of Literature")
///     .with_visit_minutes(45);
///
/// assert_eq!(stop.name(), "Temple of Literature");
/// assert_eq!(stop.address(), "");
/// assert_eq!(stop.visit_minutes(), 45);
/// # Ok::<(), tripwise_core::StopError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    name: String,
    address: String,
    location: Coord<f64>,
    visit_minutes: u32,
}

impl Stop {
    /// Construct an unnamed stop with the default visit length.
    pub fn new(location: Coord<f64>) -> Result<Self, StopError> {
        ensure_finite(location)?;
        Ok(Self {
            name: String::new(),
            address: String::new(),
            location,
            visit_minutes: DEFAULT_VISIT_MINUTES,
        })
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a display address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set how long the visitor stays. Zero is allowed.
    #[must_use]
    pub const fn with_visit_minutes(mut self, minutes: u32) -> Self {
        self.visit_minutes = minutes;
        self
    }

    /// Display name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display address, possibly empty.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Geographic position.
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Planned visit length in minutes.
    pub const fn visit_minutes(&self) -> u32 {
        self.visit_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_thirty_minute_visit() {
        let stop = Stop::new(Coord { x: 0.0, y: 0.0 }).expect("finite coordinate");
        assert_eq!(stop.visit_minutes(), DEFAULT_VISIT_MINUTES);
        assert!(stop.name().is_empty());
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    #[case(f64::NEG_INFINITY, 1.0)]
    fn rejects_non_finite_coordinates(#[case] x: f64, #[case] y: f64) {
        let result = Stop::new(Coord { x, y });
        assert!(matches!(result, Err(StopError::NonFiniteCoordinate { .. })));
    }

    #[rstest]
    fn zero_minute_visit_is_allowed() {
        let stop = Stop::new(Coord { x: 1.0, y: 2.0 })
            .expect("finite coordinate")
            .with_visit_minutes(0);
        assert_eq!(stop.visit_minutes(), 0);
    }
}
