//! Visiting orders over trip nodes.
//!
//! A [`TourOrder`] is an open path: it starts at node 0 and visits every
//! other node exactly once without returning to the start.

use thiserror::Error;

/// Errors returned by [`TourOrder::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourOrderError {
    /// The order contained no nodes.
    #[error("tour order must contain at least the start node")]
    Empty,
    /// The first node was not the start.
    #[error("tour order must begin at node 0, found {found}")]
    MissingStart {
        /// Node found in the first position.
        found: usize,
    },
    /// A node index exceeded the node count.
    #[error("node {node} is out of range for {node_count} nodes")]
    OutOfRange {
        /// Offending node index.
        node: usize,
        /// Number of nodes in the order.
        node_count: usize,
    },
    /// A node appeared more than once.
    #[error("node {node} appears more than once")]
    Duplicate {
        /// Repeated node index.
        node: usize,
    },
}

/// A validated permutation of `0..n` beginning with node 0.
///
/// # Examples
/// ```
/// use tripwise_core::TourOrder;
///
/// let order = TourOrder::new(vec![0, 2, 1])?;
/// assert_eq!(order.nodes(), &[0, 2, 1]);
/// assert_eq!(order.node_count(), 3);
/// assert!(TourOrder::new(vec![0, 1, 1]).is_err());
/// # Ok::<(), tripwise_core::TourOrderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TourOrder {
    nodes: Vec<usize>,
}

impl TourOrder {
    /// Validate and wrap a node sequence.
    ///
    /// The node count is taken from the sequence length, so every index in
    /// `0..nodes.len()` must appear exactly once.
    pub fn new(nodes: Vec<usize>) -> Result<Self, TourOrderError> {
        let Some(&first) = nodes.first() else {
            return Err(TourOrderError::Empty);
        };
        if first != 0 {
            return Err(TourOrderError::MissingStart { found: first });
        }
        let node_count = nodes.len();
        let mut seen = vec![false; node_count];
        for &node in &nodes {
            let slot = seen
                .get_mut(node)
                .ok_or(TourOrderError::OutOfRange { node, node_count })?;
            if *slot {
                return Err(TourOrderError::Duplicate { node });
            }
            *slot = true;
        }
        Ok(Self { nodes })
    }

    /// The identity order `[0, 1, ..., node_count - 1]`.
    ///
    /// Used when a search produced nothing usable. A zero node count yields
    /// the single-node order `[0]`.
    ///
    /// # Examples
    /// ```
    /// use tripwise_core::TourOrder;
    ///
    /// assert_eq!(TourOrder::sequential(3).nodes(), &[0, 1, 2]);
    /// ```
    pub fn sequential(node_count: usize) -> Self {
        Self {
            nodes: (0..node_count.max(1)).collect(),
        }
    }

    /// Nodes in visiting order, starting with node 0.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of nodes in the order, including the start.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consecutive `(from, to)` legs of the path.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).filter_map(|leg| match leg {
            [from, to] => Some((*from, *to)),
            _ => None,
        })
    }
}

impl From<TourOrder> for Vec<usize> {
    fn from(order: TourOrder) -> Self {
        order.nodes
    }
}
