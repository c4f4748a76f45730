//! Command-line interface for planning day trips with Tripwise.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

mod error;
mod schedule;

pub use error::CliError;

use schedule::{ScheduleArgs, run_schedule};

const ARG_SCHEDULE_REQUEST: &str = "request";
const ARG_SCHEDULE_MATRIX: &str = "matrix";
const ARG_SCHEDULE_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_SCHEDULE_OSRM_PROFILE: &str = "osrm-profile";
const ARG_SCHEDULE_STRATEGY: &str = "strategy";
const ARG_SCHEDULE_MAX_SOLVE_SECONDS: &str = "max-solve-seconds";
const ARG_SCHEDULE_OUTPUT: &str = "output";
const ENV_SCHEDULE_REQUEST: &str = "TRIPWISE_CMDS_SCHEDULE_REQUEST_PATH";

/// Run the Tripwise CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Schedule(args) => run_schedule(args),
    }
}

/// Install the process-wide log subscriber.
///
/// Honours `RUST_LOG` and defaults to warnings. Records emitted through the
/// `log` facade by the library crates are forwarded to the subscriber. Output
/// goes to stderr so stdout stays machine-readable.
///
/// # Errors
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    let default_level = LevelFilter::WARN;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
}

#[derive(Debug, Parser)]
#[command(
    name = "tripwise",
    about = "Order and timestamp the stops of a day trip",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a schedule for a JSON trip request.
    Schedule(ScheduleArgs),
}

#[cfg(test)]
mod tests;
