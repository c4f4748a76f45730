//! Data access adapters for Tripwise.
//!
//! Responsibilities:
//! - Fetch travel-time matrices from routing services over HTTP.
//! - Translate service payloads into `tripwise-core` types.
//!
//! Boundaries:
//! - Do not encode scheduling rules (they live in `tripwise-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - Unroutable pairs are reported as
//!   [`UNREACHABLE_SECONDS`](tripwise_core::UNREACHABLE_SECONDS), never as errors.
//! - No global mutable state.

pub mod routing;

pub use routing::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    ProviderBuildError,
};
