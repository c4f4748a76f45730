//! Travel times between trip nodes.
//!
//! [`TravelTimeMatrix`] holds directed travel costs in whole seconds between
//! the start (node 0) and every stop (nodes `1..n`). The
//! [`TravelTimeProvider`] trait abstracts where those numbers come from: a
//! routing service, a pre-fetched table, or a test double.
//!
//! A pair the provider could not route is stored as
//! [`UNREACHABLE_SECONDS`] rather than left missing, so solvers never need to
//! special-case absent entries.

mod error;
mod matrix;
mod provider;

pub use error::{MatrixError, TravelTimeError};
pub use matrix::{TravelTimeMatrix, UNREACHABLE_SECONDS, is_unreachable};
pub use provider::{FixedMatrixProvider, TravelTimeProvider};
