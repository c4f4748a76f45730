//! Exact route strategy for Tripwise backed by `vrp-core`.
//!
//! [`VrpSolver`] models the visiting-order problem as a single-vehicle VRP:
//! the vehicle starts at node 0, every stop is a mandatory job, and the tour
//! is open so the vehicle never returns. `vrp-core` metaheuristics search for
//! the order with the lowest total travel time within a wall-clock budget.
//!
//! Search failures never surface as errors. The solver falls back to the
//! sequential order and records the [`Degradation`](tripwise_core::Degradation)
//! in the solution diagnostics.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod solver;
mod vrp;

pub use solver::{VrpSolver, VrpSolverConfig};
