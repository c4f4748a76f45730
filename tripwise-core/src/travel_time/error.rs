use thiserror::Error;

/// Errors raised when a travel-time matrix fails its shape contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has no rows.
    #[error("travel-time matrix must contain at least one node")]
    Empty,
    /// A row length differs from the number of rows.
    #[error("row {row} has {found} columns but {expected} expected (matrix must be square)")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of columns found in that row.
        found: usize,
        /// Number of rows, and therefore required columns.
        expected: usize,
    },
    /// The matrix dimension does not match the node count of the request.
    #[error("matrix covers {found} nodes but {expected} were requested")]
    DimensionMismatch {
        /// Node count implied by the request (start plus stops).
        expected: usize,
        /// Dimension of the supplied matrix.
        found: usize,
    },
}

/// Errors from [`crate::TravelTimeProvider::travel_time_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No nodes were provided.
    ///
    /// A matrix needs at least the start location. Callers should pre-filter
    /// input to avoid this condition.
    #[error("at least one location is required")]
    EmptyInput,
    /// The request to the routing service timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The routing service could not be reached.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The routing service reported an application-level failure.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service status code.
        code: String,
        /// Service-provided message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The returned matrix violated the shape contract.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
