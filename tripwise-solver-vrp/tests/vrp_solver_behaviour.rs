//! Behavioural tests for `VrpSolver` using rstest-bdd.

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tripwise_core::test_support::line_matrix;
use tripwise_core::{RouteSolver, Solution, SolverKind, Strategy, TravelTimeMatrix, select_solver};
use tripwise_solver_vrp::{VrpSolver, VrpSolverConfig};

#[derive(Debug)]
struct VrpWorld {
    matrix: RefCell<Option<TravelTimeMatrix>>,
    outcome: RefCell<Option<Solution>>,
}

impl VrpWorld {
    const fn new() -> Self {
        Self {
            matrix: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_matrix(&self) -> TravelTimeMatrix {
        self.matrix
            .borrow()
            .clone()
            .expect("matrix should be configured before solving")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Solution {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
    }
}

#[fixture]
fn world() -> VrpWorld {
    VrpWorld::new()
}

fn solver() -> VrpSolver {
    VrpSolver::with_config(
        VrpSolverConfig::default()
            .with_max_time(Duration::from_secs(2))
            .with_max_generations(300),
    )
}

#[given("stops on a line at 0, 5 and 8 minutes with the start at 3")]
fn given_line(world: &VrpWorld) {
    world.matrix.replace(Some(line_matrix(&[3, 0, 5, 8], 60)));
}

#[given("a single stop two minutes away")]
fn given_single(world: &VrpWorld) {
    world.matrix.replace(Some(line_matrix(&[0, 2], 60)));
}

#[when("the exact solver runs")]
fn when_exact_runs(world: &VrpWorld) {
    let matrix = world.expect_matrix();
    world.outcome.replace(Some(solver().solve(&matrix)));
}

#[when("the solver is selected automatically")]
fn when_auto_selected(world: &VrpWorld) {
    let matrix = world.expect_matrix();
    let selected = select_solver(SolverKind::Auto, Some(Box::new(solver())));
    world.outcome.replace(Some(selected.solve(&matrix)));
}

#[then("the order is 0,1,2,3")]
fn then_line_order(world: &VrpWorld) {
    assert_eq!(world.expect_outcome().order.nodes(), &[0, 1, 2, 3]);
}

#[then("the order is 0,1")]
fn then_trivial_order(world: &VrpWorld) {
    assert_eq!(world.expect_outcome().order.nodes(), &[0, 1]);
}

#[then("the tour takes 660 seconds")]
fn then_tour_seconds(world: &VrpWorld) {
    let matrix = world.expect_matrix();
    let outcome = world.expect_outcome();
    assert_eq!(matrix.path_seconds(outcome.order.nodes()), 660);
}

#[then("the solution is not degraded")]
fn then_not_degraded(world: &VrpWorld) {
    assert_eq!(world.expect_outcome().diagnostics.degraded, None);
}

#[then("the strategy label is exact")]
fn then_exact_label(world: &VrpWorld) {
    assert_eq!(world.expect_outcome().strategy, Strategy::Exact);
}

#[scenario(path = "tests/features/vrp_solver.feature", index = 0)]
fn exact_beats_greedy(world: VrpWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/vrp_solver.feature", index = 1)]
fn exact_selected_when_available(world: VrpWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/vrp_solver.feature", index = 2)]
fn single_stop_skips_search(world: VrpWorld) {
    let _ = world;
}
