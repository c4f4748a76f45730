//! Behavioural tests for strategy selection and the greedy solver.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tripwise_core::{
    GreedySolver, RouteSolver, Solution, SolverKind, Strategy, TravelTimeMatrix,
    UNREACHABLE_SECONDS, select_solver,
};

type MatrixSlot = RefCell<Option<TravelTimeMatrix>>;
type SolutionSlot = RefCell<Option<Solution>>;

#[fixture]
fn matrix() -> MatrixSlot {
    RefCell::new(None)
}

#[fixture]
fn solution() -> SolutionSlot {
    RefCell::new(None)
}

fn solve_with(solver: &dyn RouteSolver, matrix: &MatrixSlot, solution: &SolutionSlot) {
    let borrow = matrix.borrow();
    let matrix = borrow.as_ref().expect("matrix configured in a Given step");
    *solution.borrow_mut() = Some(solver.solve(matrix));
}

fn expect_order(solution: &SolutionSlot, expected: &[usize]) {
    let borrow = solution.borrow();
    let solution = borrow.as_ref().expect("solver ran");
    assert_eq!(solution.order.nodes(), expected);
}

#[given("a four node matrix where node 2 is unreachable from node 1")]
fn given_sentinel(#[from(matrix)] matrix: &MatrixSlot) {
    let u = UNREACHABLE_SECONDS;
    *matrix.borrow_mut() = Some(
        TravelTimeMatrix::from_rows(vec![
            vec![0, 100, 200, 300],
            vec![100, 0, u, 50],
            vec![200, u, 0, 60],
            vec![300, 50, 60, 0],
        ])
        .expect("4x4 matrix"),
    );
}

#[given("a two node matrix")]
fn given_two(#[from(matrix)] matrix: &MatrixSlot) {
    *matrix.borrow_mut() =
        Some(TravelTimeMatrix::from_rows(vec![vec![0, 420], vec![420, 0]]).expect("2x2 matrix"));
}

#[when("I solve with the greedy strategy")]
fn solve_greedy(#[from(matrix)] matrix: &MatrixSlot, #[from(solution)] solution: &SolutionSlot) {
    solve_with(&GreedySolver, matrix, solution);
}

#[when("I solve with the exact strategy in a build without it")]
fn solve_exact_unavailable(
    #[from(matrix)] matrix: &MatrixSlot,
    #[from(solution)] solution: &SolutionSlot,
) {
    let solver = select_solver(SolverKind::Exact, None);
    solve_with(solver.as_ref(), matrix, solution);
}

#[then("the order is 0,1,3,2")]
fn then_sentinel_order(#[from(solution)] solution: &SolutionSlot) {
    expect_order(solution, &[0, 1, 3, 2]);
}

#[then("the order is 0,1")]
fn then_trivial_order(#[from(solution)] solution: &SolutionSlot) {
    expect_order(solution, &[0, 1]);
}

#[then("the strategy label is greedy")]
fn then_greedy_label(#[from(solution)] solution: &SolutionSlot) {
    let borrow = solution.borrow();
    let solution = borrow.as_ref().expect("solver ran");
    assert_eq!(solution.strategy, Strategy::Greedy);
    assert_eq!(solution.diagnostics.degraded, None);
}

#[scenario(path = "tests/features/route_solver.feature", index = 0)]
fn greedy_avoids_sentinel(matrix: MatrixSlot, solution: SolutionSlot) {
    let _ = (matrix, solution);
}

#[scenario(path = "tests/features/route_solver.feature", index = 1)]
fn two_nodes_trivial(matrix: MatrixSlot, solution: SolutionSlot) {
    let _ = (matrix, solution);
}

#[scenario(path = "tests/features/route_solver.feature", index = 2)]
fn exact_falls_back(matrix: MatrixSlot, solution: SolutionSlot) {
    let _ = (matrix, solution);
}
