//! OSRM Table service response types.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

/// OSRM Table API response.
///
/// Holds either a duration matrix or an error message; `code` says which.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM: `"Ok"` on success, otherwise values such as
    /// `"InvalidQuery"` or `"NoTable"`.
    pub code: String,

    /// Error detail when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// `durations[i][j]` is the fastest travel time in seconds from the i-th
    /// to the j-th coordinate, or `None` when no route exists.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Whether the service reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
