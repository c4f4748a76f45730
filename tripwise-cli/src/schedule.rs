//! Schedule command implementation for the Tripwise CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripwise_core::{
    FixedMatrixProvider, RouteSolver, Schedule, ScheduleRequest, Scheduler, SolverKind,
    TravelTimeMatrix, TravelTimeProvider,
};
use tripwise_data::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};

use crate::{
    ARG_SCHEDULE_MATRIX, ARG_SCHEDULE_MAX_SOLVE_SECONDS, ARG_SCHEDULE_OSRM_BASE_URL,
    ARG_SCHEDULE_OSRM_PROFILE, ARG_SCHEDULE_OUTPUT, ARG_SCHEDULE_REQUEST, ARG_SCHEDULE_STRATEGY,
    CliError, ENV_SCHEDULE_REQUEST,
};

/// Wall-clock budget handed to the exact strategy when none is configured.
pub(crate) const DEFAULT_MAX_SOLVE_SECONDS: u64 = 5;

/// CLI arguments for the `schedule` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a day trip from a JSON request holding a start \
                 location, the places to visit and an optional day window. \
                 Travel times come from an OSRM table service unless a \
                 pre-computed matrix file is supplied.",
    about = "Order and timestamp the places of a trip request"
)]
#[ortho_config(prefix = "TRIPWISE")]
pub(crate) struct ScheduleArgs {
    /// Path to a JSON file containing a schedule request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// JSON travel time matrix in seconds, start node first.
    #[arg(long = ARG_SCHEDULE_MATRIX, value_name = "path")]
    #[serde(default)]
    pub(crate) matrix: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_SCHEDULE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_SCHEDULE_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Ordering strategy: auto, exact or greedy.
    #[arg(long = ARG_SCHEDULE_STRATEGY, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<SolverKind>,
    /// Time budget for the exact strategy, in seconds.
    #[arg(long = ARG_SCHEDULE_MAX_SOLVE_SECONDS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) max_solve_seconds: Option<u64>,
    /// Write the schedule here instead of stdout.
    #[arg(long = ARG_SCHEDULE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScheduleArgs {
    pub(crate) fn into_config(self) -> Result<ScheduleConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScheduleConfig::try_from(merged)
    }
}

/// Where travel times come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TravelTimeSource {
    /// Read a square matrix of seconds from disk.
    MatrixFile(Utf8PathBuf),
    /// Query an OSRM table service.
    Osrm { base_url: String, profile: String },
}

/// Resolved `schedule` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScheduleConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) travel_times: TravelTimeSource,
    pub(crate) strategy: SolverKind,
    pub(crate) max_solve_time: Duration,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScheduleConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SCHEDULE_REQUEST)?;
        if let TravelTimeSource::MatrixFile(path) = &self.travel_times {
            require_existing(path, ARG_SCHEDULE_MATRIX)?;
        }
        Ok(())
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match tripwise_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.as_std_path().exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::ReadSource {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<ScheduleArgs> for ScheduleConfig {
    type Error = CliError;

    fn try_from(args: ScheduleArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SCHEDULE_REQUEST,
            env: ENV_SCHEDULE_REQUEST,
        })?;

        let travel_times = match args.matrix {
            Some(path) => TravelTimeSource::MatrixFile(path),
            None => {
                let defaults = HttpTravelTimeProviderConfig::default();
                TravelTimeSource::Osrm {
                    base_url: args.osrm_base_url.unwrap_or(defaults.base_url),
                    profile: args.osrm_profile.unwrap_or(defaults.profile),
                }
            }
        };

        let seconds = args
            .max_solve_seconds
            .unwrap_or(DEFAULT_MAX_SOLVE_SECONDS)
            .max(1);

        Ok(Self {
            request_path,
            travel_times,
            strategy: args.strategy.unwrap_or_default(),
            max_solve_time: Duration::from_secs(seconds),
            output: args.output,
        })
    }
}

/// Builds the route solver for the current invocation.
pub(super) trait ScheduleSolverBuilder {
    fn build(&self, config: &ScheduleConfig) -> Box<dyn RouteSolver>;
}

pub(super) struct DefaultScheduleSolverBuilder;

impl ScheduleSolverBuilder for DefaultScheduleSolverBuilder {
    fn build(&self, config: &ScheduleConfig) -> Box<dyn RouteSolver> {
        tripwise::build_solver(config.strategy, config.max_solve_time)
    }
}

pub(super) fn run_schedule(args: ScheduleArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultScheduleSolverBuilder;
    run_schedule_with(args, &builder, &mut stdout)
}

pub(super) fn run_schedule_with(
    args: ScheduleArgs,
    builder: &dyn ScheduleSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let schedule = execute_schedule(&config, builder)?;
    match &config.output {
        Some(path) => write_schedule_file(path, &schedule),
        None => write_schedule(writer, &schedule),
    }
}

fn execute_schedule(
    config: &ScheduleConfig,
    builder: &dyn ScheduleSolverBuilder,
) -> Result<Schedule, CliError> {
    let request = load_schedule_request(&config.request_path)?;
    let provider = build_provider(&config.travel_times)?;
    let scheduler = Scheduler::new(provider, builder.build(config));
    log::info!(
        "planning {} places with the {} strategy",
        request.places.len(),
        scheduler.strategy()
    );
    Ok(scheduler.plan(&request)?)
}

fn build_provider(source: &TravelTimeSource) -> Result<Box<dyn TravelTimeProvider>, CliError> {
    match source {
        TravelTimeSource::MatrixFile(path) => {
            let matrix = load_matrix(path)?;
            Ok(Box::new(FixedMatrixProvider::new(matrix)))
        }
        TravelTimeSource::Osrm { base_url, profile } => {
            let config =
                HttpTravelTimeProviderConfig::new(base_url.clone()).with_profile(profile.clone());
            let provider = HttpTravelTimeProvider::with_config(config).map_err(|source| {
                CliError::BuildTravelTimeProvider {
                    base_url: base_url.clone(),
                    source,
                }
            })?;
            Ok(Box::new(provider))
        }
    }
}

/// Loads a JSON-encoded [`ScheduleRequest`] from disk.
pub(super) fn load_schedule_request(path: &Utf8Path) -> Result<ScheduleRequest, CliError> {
    let payload = read_source(path, ARG_SCHEDULE_REQUEST)?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a square JSON matrix of whole seconds from disk.
pub(super) fn load_matrix(path: &Utf8Path) -> Result<TravelTimeMatrix, CliError> {
    let payload = read_source(path, ARG_SCHEDULE_MATRIX)?;
    let rows: Vec<Vec<u64>> =
        serde_json::from_str(&payload).map_err(|source| CliError::ParseMatrix {
            path: path.to_path_buf(),
            source,
        })?;
    TravelTimeMatrix::from_rows(rows).map_err(|source| CliError::InvalidMatrix {
        path: path.to_path_buf(),
        source,
    })
}

fn read_source(path: &Utf8Path, field: &'static str) -> Result<String, CliError> {
    tripwise_fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn render_schedule(schedule: &Schedule) -> Result<String, CliError> {
    serde_json::to_string_pretty(schedule).map_err(CliError::SerialiseSchedule)
}

fn write_schedule(writer: &mut dyn Write, schedule: &Schedule) -> Result<(), CliError> {
    let payload = render_schedule(schedule)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn write_schedule_file(path: &Utf8Path, schedule: &Schedule) -> Result<(), CliError> {
    let mut payload = render_schedule(schedule)?;
    payload.push('\n');
    tripwise_fs::write_string(path, &payload).map_err(|source| CliError::WriteOutputFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote schedule to {path}");
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScheduleConfig, CliError> {
    let merged = ScheduleArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScheduleConfig::try_from(merged)
}
