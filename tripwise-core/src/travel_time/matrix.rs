//! Square matrix of directed travel costs in whole seconds.

use std::time::Duration;

use super::error::MatrixError;

/// Travel cost recorded for a pair the routing service could not connect.
///
/// The value is large enough that a nearest-neighbour pass never prefers it
/// while a reachable alternative remains, yet small enough that summing a
/// handful of such legs stays far from `u64` overflow.
pub const UNREACHABLE_SECONDS: u64 = 1_000_000_000;

/// Directed travel costs between trip nodes.
///
/// Node 0 is the trip start and nodes `1..n` are stops in input order.
/// `seconds(i, j)` is the cost of driving or walking from node `i` to node
/// `j`. The diagonal is conventionally zero but is never traversed.
///
/// # Examples
/// ```
/// use tripwise_core::TravelTimeMatrix;
///
/// let matrix = TravelTimeMatrix::from_rows(vec![
///     vec![0, 600],
///     vec![540, 0],
/// ])?;
/// assert_eq!(matrix.node_count(), 2);
/// assert_eq!(matrix.seconds(0, 1), Some(600));
/// # Ok::<(), tripwise_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")
)]
pub struct TravelTimeMatrix {
    rows: Vec<Vec<u64>>,
}

impl TravelTimeMatrix {
    /// Validate and wrap a row-major table of seconds.
    ///
    /// Rejects an empty table and any row whose length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, MatrixError> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let expected = rows.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(MatrixError::NotSquare {
                row,
                found,
                expected,
            });
        }
        Ok(Self { rows })
    }

    /// Build a matrix from [`Duration`] cells.
    ///
    /// Sub-second precision is rounded up. Cells at or beyond
    /// [`UNREACHABLE_SECONDS`] (including `Duration::MAX`) collapse to the
    /// sentinel.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use tripwise_core::{TravelTimeMatrix, UNREACHABLE_SECONDS};
    ///
    /// let matrix = TravelTimeMatrix::from_durations(vec![
    ///     vec![Duration::ZERO, Duration::from_millis(90_500)],
    ///     vec![Duration::MAX, Duration::ZERO],
    /// ])?;
    /// assert_eq!(matrix.seconds(0, 1), Some(91));
    /// assert_eq!(matrix.seconds(1, 0), Some(UNREACHABLE_SECONDS));
    /// # Ok::<(), tripwise_core::MatrixError>(())
    /// ```
    pub fn from_durations(rows: Vec<Vec<Duration>>) -> Result<Self, MatrixError> {
        let seconds = rows
            .into_iter()
            .map(|row| row.into_iter().map(duration_to_seconds).collect())
            .collect();
        Self::from_rows(seconds)
    }

    /// Number of nodes covered by the matrix.
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Travel cost from `from` to `to`, or `None` when either index is out of
    /// range.
    pub fn seconds(&self, from: usize, to: usize) -> Option<u64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Travel cost from `from` to `to`, treating out-of-range pairs as
    /// unreachable.
    pub fn cost(&self, from: usize, to: usize) -> u64 {
        self.seconds(from, to).unwrap_or(UNREACHABLE_SECONDS)
    }

    /// Borrow the underlying rows.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    /// Check that the matrix covers exactly `expected` nodes.
    ///
    /// # Examples
    /// ```
    /// use tripwise_core::{MatrixError, TravelTimeMatrix};
    ///
    /// let matrix = TravelTimeMatrix::from_rows(vec![vec![0]])?;
    /// assert!(matrix.ensure_nodes(1).is_ok());
    /// assert_eq!(
    ///     matrix.ensure_nodes(3),
    ///     Err(MatrixError::DimensionMismatch { expected: 3, found: 1 }),
    /// );
    /// # Ok::<(), MatrixError>(())
    /// ```
    pub fn ensure_nodes(&self, expected: usize) -> Result<(), MatrixError> {
        let found = self.node_count();
        if found == expected {
            Ok(())
        } else {
            Err(MatrixError::DimensionMismatch { expected, found })
        }
    }

    /// Total cost of walking `path` leg by leg.
    ///
    /// Saturates instead of overflowing when unreachable legs pile up.
    pub fn path_seconds(&self, path: &[usize]) -> u64 {
        path.windows(2)
            .filter_map(|leg| match leg {
                [from, to] => Some(self.cost(*from, *to)),
                _ => None,
            })
            .fold(0_u64, u64::saturating_add)
    }
}

/// Whether a travel cost denotes an unreachable pair.
pub const fn is_unreachable(seconds: u64) -> bool {
    seconds >= UNREACHABLE_SECONDS
}

fn duration_to_seconds(duration: Duration) -> u64 {
    let whole = duration.as_secs();
    let rounded = if duration.subsec_nanos() > 0 {
        whole.saturating_add(1)
    } else {
        whole
    };
    rounded.min(UNREACHABLE_SECONDS)
}

impl TryFrom<Vec<Vec<u64>>> for TravelTimeMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<TravelTimeMatrix> for Vec<Vec<u64>> {
    fn from(matrix: TravelTimeMatrix) -> Self {
        matrix.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_empty_table() {
        let err = TravelTimeMatrix::from_rows(Vec::new()).expect_err("empty table");
        assert_eq!(err, MatrixError::Empty);
    }

    #[rstest]
    #[case::short_row(vec![vec![0, 1], vec![1]], 1, 1)]
    #[case::long_row(vec![vec![0, 1, 2], vec![1, 0]], 0, 3)]
    fn rejects_ragged_rows(
        #[case] rows: Vec<Vec<u64>>,
        #[case] bad_row: usize,
        #[case] bad_len: usize,
    ) {
        let err = TravelTimeMatrix::from_rows(rows).expect_err("ragged table");
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: bad_row,
                found: bad_len,
                expected: 2,
            }
        );
    }

    #[rstest]
    fn out_of_range_lookup_is_unreachable() {
        let matrix = TravelTimeMatrix::from_rows(vec![vec![0]]).expect("1x1 matrix");
        assert_eq!(matrix.seconds(0, 4), None);
        assert_eq!(matrix.cost(0, 4), UNREACHABLE_SECONDS);
    }

    #[rstest]
    fn path_seconds_sums_legs_in_order() {
        let matrix = TravelTimeMatrix::from_rows(vec![
            vec![0, 600, 900],
            vec![600, 0, 300],
            vec![900, 300, 0],
        ])
        .expect("3x3 matrix");
        assert_eq!(matrix.path_seconds(&[0, 1, 2]), 900);
        assert_eq!(matrix.path_seconds(&[0, 2, 1]), 1200);
        assert_eq!(matrix.path_seconds(&[0]), 0);
    }

    #[rstest]
    fn path_seconds_saturates() {
        let matrix = TravelTimeMatrix::from_rows(vec![vec![0, u64::MAX], vec![u64::MAX, 0]])
            .expect("2x2 matrix");
        assert_eq!(matrix.path_seconds(&[0, 1, 0]), u64::MAX);
    }

    #[rstest]
    #[case(0, false)]
    #[case(UNREACHABLE_SECONDS - 1, false)]
    #[case(UNREACHABLE_SECONDS, true)]
    #[case(u64::MAX, true)]
    fn classifies_unreachable_costs(#[case] seconds: u64, #[case] expected: bool) {
        assert_eq!(is_unreachable(seconds), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_validates_shape() {
        let ok: TravelTimeMatrix =
            serde_json::from_str("[[0, 60], [45, 0]]").expect("square matrix parses");
        assert_eq!(ok.seconds(1, 0), Some(45));

        let ragged = serde_json::from_str::<TravelTimeMatrix>("[[0, 60], [45]]");
        assert!(ragged.is_err());
    }
}
