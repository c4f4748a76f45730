//! `vrp-core` modelling helpers for `VrpSolver`.
//!
//! This module converts a travel-time matrix into an open-tour `vrp-core`
//! problem, runs the search and returns the visited locations in order.

use std::sync::Arc;
use std::time::Duration;

use tripwise_core::TravelTimeMatrix;
use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::TravelTime;
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;
use vrp_core::utils::{Environment, InfoLogger, Quota, TimeQuota};

use crate::solver::VrpSolverConfig;

/// Unassigned stops dominate; travel time breaks ties between full tours.
fn define_goal(transport: Arc<dyn TransportCost>) -> GenericResult<GoalContext> {
    let unassigned_feature = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-travel-time")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[unassigned_feature, transport_feature])?.build()
}

fn define_problem(
    node_count: usize,
    transport: Arc<dyn TransportCost>,
    goal: GoalContext,
) -> GenericResult<Problem> {
    let jobs = (1..node_count)
        .map(|location| {
            SingleBuilder::default()
                .id(format!("stop{location}").as_str())
                .location(location)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    // No end location: the tour finishes at the last stop.
    let vehicle = VehicleBuilder::default()
        .id("traveller")
        .add_detail(
            VehicleDetailBuilder::default()
                .set_start_location(0)
                .set_start_time(0.0)
                .build()?,
        )
        .build()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(std::iter::once(vehicle))
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

struct MatrixTransportCost {
    durations: Vec<Vec<f64>>,
}

impl MatrixTransportCost {
    fn new(matrix: &TravelTimeMatrix) -> Self {
        let durations = matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&seconds| Duration::from_secs(seconds).as_secs_f64())
                    .collect()
            })
            .collect();
        Self { durations }
    }

    fn duration_seconds(&self, from: Location, to: Location) -> f64 {
        let result = self
            .durations
            .get(from)
            .and_then(|row| row.get(to))
            .copied();
        debug_assert!(result.is_some(), "matrix lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

impl TransportCost for MatrixTransportCost {
    // Costs come straight from the matrix, so the route and departure time
    // passed by `vrp-core` are ignored.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.duration_seconds(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.duration_seconds(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_seconds(from, to)
    }
}

/// Runs a bounded `vrp-core` search over one matrix.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpSolverConfig,
}

impl<'a> VrpSolveContext<'a> {
    /// Create a new solve context.
    pub(super) const fn new(config: &'a VrpSolverConfig) -> Self {
        Self { config }
    }

    /// Search for an open tour and return its locations, start included.
    pub(super) fn solve(&self, matrix: &TravelTimeMatrix) -> GenericResult<Vec<Location>> {
        let transport: Arc<dyn TransportCost> = Arc::new(MatrixTransportCost::new(matrix));
        let goal = define_goal(transport.clone())?;
        let problem = Arc::new(define_problem(matrix.node_count(), transport, goal)?);

        let vrp_config = VrpConfigBuilder::new(problem.clone())
            .set_environment(self.environment())
            .prebuild()?
            .with_max_time(Some(whole_seconds_ceiling(self.config.max_time)))
            .with_max_generations(Some(self.config.max_generations))
            .build()?;

        let solution = vrp_core::solver::Solver::new(problem, vrp_config).solve()?;
        if !solution.unassigned.is_empty() {
            log::debug!(
                "vrp-core left {} stops unassigned",
                solution.unassigned.len()
            );
        }
        Ok(solution.get_locations().flatten().collect())
    }

    /// Search environment whose quota stops the search at `max_time`.
    ///
    /// Progress messages go to `log` at debug level instead of stdout.
    fn environment(&self) -> Arc<Environment> {
        let quota: Arc<dyn Quota> = Arc::new(TimeQuota::new(self.config.max_time.as_secs_f64()));
        let logger: InfoLogger = Arc::new(|message: &str| log::debug!("vrp-core: {message}"));
        Arc::new(Environment {
            quota: Some(quota),
            logger,
            ..Environment::default()
        })
    }
}

/// Whole seconds for `vrp-core`'s own time termination, rounded up so the
/// environment quota is always the tighter bound. Never zero.
pub(crate) fn whole_seconds_ceiling(budget: Duration) -> usize {
    let secs = budget
        .as_secs()
        .saturating_add(u64::from(budget.subsec_nanos() > 0))
        .max(1);
    usize::try_from(secs).unwrap_or(usize::MAX)
}
