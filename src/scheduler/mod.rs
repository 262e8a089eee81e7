//! Plan generation pipeline.
//!
//! # Algorithm
//!
//! 1. Validate the request and normalize focus weights.
//! 2. Build the prerequisite graph and association map, then break any
//!    prerequisite cycles by dropping the weakest edge per cycle.
//! 3. Sequence skills into ordered, bounded modules with focus-share
//!    hour allocations.
//! 4. Select catalog resources per skill to hit each skill's ideal
//!    duration window.
//! 5. Assemble calendar sessions module by module and compact empty
//!    module slots away.
//!
//! Stages 2–5 each tolerate degraded inputs (cyclic data, sparse
//! catalogs, exhausted pools) without aborting; only stage 1 fails a
//! run.

pub mod assembler;

pub use assembler::{assemble_module, assemble_schedule, compact_modules};

use chrono::{Duration, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::PlanError;
use crate::graph::build_graphs;
use crate::models::{normalize_focus, LearningPlan, PlanRequest};
use crate::selector::{select_resources, SelectorConfig};
use crate::sequencer::sequence_modules;
use crate::solver::{BranchAndBoundSolver, SubsetSolver};
use crate::timeblock::BlockPlanner;
use crate::validation::validate_request;

/// End-to-end curriculum planner.
///
/// Holds the selection configuration and the subset solver; one
/// instance can serve any number of independent [`plan`](Self::plan)
/// calls.
///
/// # Example
///
/// ```
/// use learnplan::models::{CatalogResource, PlanRequest, Skill};
/// use learnplan::scheduler::CurriculumPlanner;
///
/// let request = PlanRequest::new(
///     1,
///     vec![Skill::new("sql", 1.0, 0.5)],
///     2,
///     10.0,
/// )
/// .with_catalog(vec![
///     CatalogResource::new("sql", "SQL Fundamentals", 12.0),
///     CatalogResource::new("sql", "Window Functions", 8.0),
/// ]);
///
/// let planner = CurriculumPlanner::new();
/// let plan = planner.plan(&request).unwrap();
/// assert!(!plan.sessions.is_empty());
/// ```
pub struct CurriculumPlanner {
    selector: SelectorConfig,
    solver: Box<dyn SubsetSolver>,
}

impl CurriculumPlanner {
    /// Creates a planner with default selection weights and the exact
    /// branch-and-bound solver.
    pub fn new() -> Self {
        Self {
            selector: SelectorConfig::default(),
            solver: Box::new(BranchAndBoundSolver::new()),
        }
    }

    /// Sets the selection configuration.
    pub fn with_selector_config(mut self, config: SelectorConfig) -> Self {
        self.selector = config;
        self
    }

    /// Sets the subset solver used for resource selection.
    pub fn with_solver(mut self, solver: Box<dyn SubsetSolver>) -> Self {
        self.solver = solver;
        self
    }

    /// Generates a complete learning plan for the request.
    ///
    /// # Errors
    ///
    /// [`PlanError::EmptySkillList`] or [`PlanError::EmptyCatalog`] when
    /// a required input is missing, [`PlanError::InvalidInput`] when
    /// integrity checks fail. Degraded-but-usable inputs (prerequisite
    /// cycles, skills without catalog coverage) produce a degraded plan,
    /// not an error.
    pub fn plan(&self, request: &PlanRequest) -> Result<LearningPlan, PlanError> {
        if request.skills.is_empty() {
            return Err(PlanError::EmptySkillList);
        }
        if request.catalog.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }
        validate_request(request).map_err(PlanError::InvalidInput)?;

        let skills = normalize_focus(&request.skills);
        let skill_keys: HashSet<String> = skills.iter().map(|s| s.key()).collect();

        let (prerequisites, associations) = build_graphs(&request.relationships, &skill_keys);
        let (prerequisites, removed) = prerequisites.break_cycles();
        if !removed.is_empty() {
            debug!(removed = removed.len(), "broke prerequisite cycles");
        }

        let modules = sequence_modules(&skills, &prerequisites, &associations, request.total_hours());

        let selections = select_resources(
            &skills,
            &request.catalog,
            request.total_weeks,
            request.weekly_hours,
            &modules,
            &prerequisites,
            &self.selector,
            self.solver.as_ref(),
        );

        let start_date = request
            .start_date
            .unwrap_or_else(|| Utc::now().date_naive() + Duration::days(1));

        let mut block_planner = BlockPlanner::new();
        let (modules, sessions) = assemble_schedule(
            &modules,
            start_date,
            request.weekly_hours,
            &request.learning_days,
            &selections,
            request.user_id,
            &mut block_planner,
        );

        info!(
            user = request.user_id,
            modules = modules.len(),
            sessions = sessions.len(),
            "generated learning plan"
        );

        Ok(LearningPlan {
            modules,
            sessions,
            selections,
        })
    }
}

impl Default for CurriculumPlanner {
    fn default() -> Self {
        Self::new()
    }
}
