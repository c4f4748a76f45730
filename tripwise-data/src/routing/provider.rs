//! HTTP-based `TravelTimeProvider` using OSRM's Table API.
//!
//! The [`TravelTimeProvider`] trait is synchronous. This provider bridges its
//! async HTTP calls to that interface by blocking on a Tokio runtime.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripwise_core::{TravelTimeError, TravelTimeMatrix, TravelTimeProvider, UNREACHABLE_SECONDS};

use super::osrm::TableResponse;

/// Errors raised while constructing an [`HttpTravelTimeProvider`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "tripwise-routing/0.1";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpTravelTimeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTravelTimeProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment of the request path.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpTravelTimeProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTravelTimeProviderConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Travel-time provider backed by an OSRM Table service.
///
/// The provider owns a current-thread Tokio runtime reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the provider drives requests on its own runtime.
/// Inside a multi-threaded runtime (detected via [`Handle::try_current()`]
/// and [`RuntimeFlavor::MultiThread`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime, which blocks
/// the caller's executor for the duration of the request.
///
/// Pairs OSRM cannot route (`null`, negative or non-finite durations) are
/// recorded as [`UNREACHABLE_SECONDS`]. Fractional seconds round up.
pub struct HttpTravelTimeProvider {
    client: Client,
    config: HttpTravelTimeProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTravelTimeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTravelTimeProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpTravelTimeProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTravelTimeProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpTravelTimeProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HttpTravelTimeProviderConfig {
        &self.config
    }

    /// Build the Table API URL: `{base}/table/v1/{profile}/{lon,lat;...}`.
    fn build_table_url(&self, nodes: &[Coord<f64>]) -> String {
        let coords = nodes
            .iter()
            .map(|node| format!("{},{}", node.x, node.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    async fn fetch_matrix_async(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        let url = self.build_table_url(nodes);
        log::debug!("requesting {n}x{n} travel-time table", n = nodes.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let table: TableResponse = response.json().await.map_err(|err| TravelTimeError::Parse {
            message: err.to_string(),
        })?;

        let matrix = convert_response(table)?;
        matrix.ensure_nodes(nodes.len())?;
        Ok(matrix)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TravelTimeError {
        if error.is_timeout() {
            return TravelTimeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TravelTimeError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TravelTimeError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response into a matrix of whole seconds.
fn convert_response(response: TableResponse) -> Result<TravelTimeMatrix, TravelTimeError> {
    if !response.is_ok() {
        return Err(TravelTimeError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let durations = response.durations.ok_or_else(|| TravelTimeError::Parse {
        message: "OSRM response missing durations array".to_owned(),
    })?;

    let mut unreachable = 0_usize;
    let rows = durations
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                        .unwrap_or_else(|| {
                            unreachable += 1;
                            Duration::from_secs(UNREACHABLE_SECONDS)
                        })
                })
                .collect()
        })
        .collect();
    if unreachable > 0 {
        log::warn!("routing service could not route {unreachable} node pairs");
    }

    Ok(TravelTimeMatrix::from_durations(rows)?)
}

impl TravelTimeProvider for HttpTravelTimeProvider {
    /// Fetch the travel-time matrix for `nodes`.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime, that runtime should be
    /// multi-threaded. From a `current_thread` runtime the call blocks the
    /// caller's executor, which deadlocks if that executor drives IO this
    /// request depends on.
    fn travel_time_matrix(
        &self,
        nodes: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if nodes.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        let future = self.fetch_matrix_async(nodes);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
