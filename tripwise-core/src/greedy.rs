//! Nearest-neighbour route construction.
//!
//! Starting at node 0, repeatedly travel to the cheapest unvisited node.
//! Ties go to the lowest node index, so identical matrices always produce
//! identical orders. Runs in O(n²) and cannot fail.

use std::time::Instant;

use crate::{Diagnostics, RouteSolver, Solution, Strategy, TourOrder, TravelTimeMatrix};

/// Always-available greedy strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreedySolver;

impl RouteSolver for GreedySolver {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn solve(&self, matrix: &TravelTimeMatrix) -> Solution {
        let started_at = Instant::now();
        let order = nearest_neighbour_order(matrix);
        log::debug!(
            "greedy solver ordered {} nodes in {:?}",
            order.node_count(),
            started_at.elapsed()
        );
        Solution {
            order,
            strategy: Strategy::Greedy,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                degraded: None,
            },
        }
    }
}

/// Build a nearest-neighbour order over every node of `matrix`.
///
/// # Examples
/// ```
/// use tripwise_core::{TravelTimeMatrix, nearest_neighbour_order};
///
/// // Nodes 1 and 2 are equally close to the start; the lower index wins.
/// let matrix = TravelTimeMatrix::from_rows(vec![
///     vec![0, 60, 60],
///     vec![60, 0, 60],
///     vec![60, 60, 0],
/// ])?;
/// assert_eq!(nearest_neighbour_order(&matrix).nodes(), &[0, 1, 2]);
/// # Ok::<(), tripwise_core::MatrixError>(())
/// ```
pub fn nearest_neighbour_order(matrix: &TravelTimeMatrix) -> TourOrder {
    let node_count = matrix.node_count();
    let mut visited = vec![false; node_count];
    let mut nodes = Vec::with_capacity(node_count);
    let mut current = 0_usize;
    if let Some(start) = visited.first_mut() {
        *start = true;
        nodes.push(0);
    }

    while let Some(next) = cheapest_unvisited(matrix, current, &visited) {
        if let Some(flag) = visited.get_mut(next) {
            *flag = true;
        }
        nodes.push(next);
        current = next;
    }

    TourOrder::new(nodes).unwrap_or_else(|err| {
        log::warn!("nearest-neighbour construction produced an invalid order: {err}");
        debug_assert!(false, "nearest-neighbour order must be a permutation");
        TourOrder::sequential(node_count)
    })
}

fn cheapest_unvisited(matrix: &TravelTimeMatrix, from: usize, visited: &[bool]) -> Option<usize> {
    visited
        .iter()
        .enumerate()
        .filter(|(_, seen)| !**seen)
        // `min_by_key` keeps the first minimum, which is the lowest index.
        .min_by_key(|(node, _)| matrix.cost(from, *node))
        .map(|(node, _)| node)
}
