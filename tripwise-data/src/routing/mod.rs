//! HTTP-based travel-time providers for routing services.
//!
//! [`HttpTravelTimeProvider`] implements [`tripwise_core::TravelTimeProvider`]
//! on top of the OSRM Table API. The trait is synchronous, so the provider
//! blocks on its HTTP calls internally and the core stays usable from plain
//! threads.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use tripwise_core::TravelTimeProvider;
//! use tripwise_data::routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
//!
//! let config = HttpTravelTimeProviderConfig::new("http://localhost:5000")
//!     .with_profile("foot")
//!     .with_timeout(Duration::from_secs(60));
//! let provider = HttpTravelTimeProvider::with_config(config)?;
//!
//! let nodes = [Coord { x: 105.85, y: 21.03 }, Coord { x: 105.84, y: 21.02 }];
//! let matrix = provider.travel_time_matrix(&nodes)?;
//! println!("start to first stop: {:?} s", matrix.seconds(0, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    ProviderBuildError,
};
