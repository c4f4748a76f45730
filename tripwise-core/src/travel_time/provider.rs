//! Travel-time provider trait and a provider backed by a pre-fetched table.

use geo::Coord;

use super::error::TravelTimeError;
use super::matrix::TravelTimeMatrix;

/// Fetch pairwise travel times for a list of trip nodes.
///
/// `nodes[0]` is the trip start and `nodes[1..]` are the stops in input
/// order. Implementers must return a square `n x n` matrix where
/// `n == nodes.len()`, with pairs they cannot route recorded as
/// [`UNREACHABLE_SECONDS`](crate::UNREACHABLE_SECONDS).
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tripwise_core::{TravelTimeError, TravelTimeMatrix, TravelTimeProvider};
///
/// struct MinuteApart;
///
/// impl TravelTimeProvider for MinuteApart {
///     fn travel_time_matrix(
///         &self,
///         nodes: &[Coord<f64>],
///     ) -> Result<TravelTimeMatrix, TravelTimeError> {
///         if nodes.is_empty() {
///             return Err(TravelTimeError::EmptyInput);
///         }
///         let n = nodes.len();
///         let rows = (0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0 } else { 60 }).collect())
///             .collect();
///         Ok(TravelTimeMatrix::from_rows(rows)?)
///     }
/// }
///
/// let matrix = MinuteApart.travel_time_matrix(&[Coord { x: 105.85, y: 21.03 }])?;
/// assert_eq!(matrix.node_count(), 1);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Return a matrix of travel times for `nodes`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `nodes` is empty.
    fn travel_time_matrix(&self, nodes: &[Coord<f64>])
    -> Result<TravelTimeMatrix, TravelTimeError>;
}

impl<T> TravelTimeProvider for &T
where
    T: TravelTimeProvider + ?Sized,
{
    fn travel_time_matrix(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        (**self).travel_time_matrix(nodes)
    }
}

impl<T> TravelTimeProvider for Box<T>
where
    T: TravelTimeProvider + ?Sized,
{
    fn travel_time_matrix(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        (**self).travel_time_matrix(nodes)
    }
}

/// A [`TravelTimeProvider`] returning a matrix fetched ahead of time.
///
/// Useful when an upstream collaborator has already queried a routing
/// service. The stored matrix must cover exactly the requested nodes;
/// mismatches surface as [`TravelTimeError::Matrix`].
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tripwise_core::{FixedMatrixProvider, TravelTimeMatrix, TravelTimeProvider};
///
/// let matrix = TravelTimeMatrix::from_rows(vec![vec![0, 60], vec![60, 0]])?;
/// let provider = FixedMatrixProvider::new(matrix);
/// let nodes = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }];
/// assert!(provider.travel_time_matrix(&nodes).is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMatrixProvider {
    matrix: TravelTimeMatrix,
}

impl FixedMatrixProvider {
    /// Wrap a pre-fetched matrix.
    pub const fn new(matrix: TravelTimeMatrix) -> Self {
        Self { matrix }
    }
}

impl TravelTimeProvider for FixedMatrixProvider {
    fn travel_time_matrix(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if nodes.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        self.matrix.ensure_nodes(nodes.len())?;
        Ok(self.matrix.clone())
    }
}
