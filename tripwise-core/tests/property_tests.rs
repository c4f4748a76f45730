//! Property-based tests for the greedy solver and the itinerary builder.
//!
//! # Invariants tested
//!
//! - **Permutation:** every order visits each node exactly once, starting at 0.
//! - **Determinism:** identical matrices yield identical greedy orders.
//! - **Monotonicity:** arrivals never precede departures from the previous stop.
//! - **Idempotence:** rebuilding an itinerary gives the same entries.

use std::collections::HashSet;

use proptest::prelude::*;
use tripwise_core::test_support::stops_along_equator;
use tripwise_core::{
    GreedySolver, RouteSolver, TimeOfDay, TourOrder, TravelTimeMatrix, UNREACHABLE_SECONDS,
    build_itinerary,
};

/// Square matrices of 1 to 12 nodes with occasional unreachable pairs.
fn matrix_strategy() -> impl Strategy<Value = TravelTimeMatrix> {
    (1_usize..=12).prop_flat_map(|n| {
        let cell = prop_oneof![
            9 => 0_u64..=7_200,
            1 => Just(UNREACHABLE_SECONDS),
        ];
        proptest::collection::vec(proptest::collection::vec(cell, n), n).prop_map(|rows| {
            TravelTimeMatrix::from_rows(rows).expect("generated rows are square")
        })
    })
}

fn assert_permutation(order: &TourOrder, n: usize) -> Result<(), TestCaseError> {
    let nodes = order.nodes();
    prop_assert_eq!(nodes.len(), n);
    prop_assert_eq!(nodes.first().copied(), Some(0));
    let unique: HashSet<usize> = nodes.iter().copied().collect();
    prop_assert_eq!(unique.len(), n);
    prop_assert!(nodes.iter().all(|&node| node < n));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn greedy_order_is_a_permutation(matrix in matrix_strategy()) {
        let solution = GreedySolver.solve(&matrix);
        assert_permutation(&solution.order, matrix.node_count())?;
    }

    #[test]
    fn greedy_is_deterministic(matrix in matrix_strategy()) {
        let first = GreedySolver.solve(&matrix).order;
        let second = GreedySolver.solve(&matrix).order;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn itinerary_times_are_monotone(
        matrix in matrix_strategy(),
        visit in 0_u32..=240,
        start in 0_u64..1_440,
    ) {
        let order = GreedySolver.solve(&matrix).order;
        let stops = stops_along_equator(matrix.node_count() - 1, visit);
        let day_start = TimeOfDay::wrapping_from_minutes(start);

        let entries = build_itinerary(&order, &matrix, &stops, day_start)
            .expect("sizes agree");

        prop_assert_eq!(entries.len(), stops.len());
        let mut clock = start;
        for entry in &entries {
            prop_assert!(entry.arrival_minutes >= clock);
            prop_assert!(entry.departure_minutes >= entry.arrival_minutes);
            prop_assert_eq!(entry.departure_minutes - entry.arrival_minutes, u64::from(visit));
            clock = entry.departure_minutes;
        }
    }

    #[test]
    fn itinerary_is_idempotent(matrix in matrix_strategy(), start in 0_u64..1_440) {
        let order = GreedySolver.solve(&matrix).order;
        let stops = stops_along_equator(matrix.node_count() - 1, 30);
        let day_start = TimeOfDay::wrapping_from_minutes(start);

        let first = build_itinerary(&order, &matrix, &stops, day_start).expect("sizes agree");
        let second = build_itinerary(&order, &matrix, &stops, day_start).expect("sizes agree");
        prop_assert_eq!(first, second);
    }
}
