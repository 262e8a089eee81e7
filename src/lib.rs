//! Personalized curriculum planning engine.
//!
//! Turns a ranked skill list, a skill-relationship dataset, and a
//! resource catalog into a concrete study calendar: ordered modules,
//! selected resources, and dated, clocked sessions.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Skill`, `RelationshipRecord`,
//!   `CatalogResource`, `Module`, `ScheduledSession`, `PlanRequest`
//! - **`validation`**: Input integrity checks (duplicate skills, ranges,
//!   catalog rows, learning days)
//! - **`graph`**: Prerequisite graph, cycle breaking, priority
//!   topological ordering
//! - **`sequencer`**: Skill grouping into bounded modules with
//!   focus-share hour allocation
//! - **`solver`**: Subset selection under duration constraints
//! - **`selector`**: Catalog scoring and per-skill resource selection
//! - **`timeblock`**: Weekly hour distribution and day-shape planning
//! - **`scheduler`**: The end-to-end pipeline ([`CurriculumPlanner`])
//!
//! # Example
//!
//! ```
//! use learnplan::models::{CatalogResource, PlanRequest, Skill};
//! use learnplan::CurriculumPlanner;
//!
//! let request = PlanRequest::new(
//!     1,
//!     vec![Skill::new("python", 0.6, 0.3), Skill::new("sql", 0.4, 0.7)],
//!     2,
//!     10.0,
//! )
//! .with_catalog(vec![
//!     CatalogResource::new("python", "Python Crash Course", 12.0),
//!     CatalogResource::new("sql", "SQL Fundamentals", 8.0),
//! ]);
//!
//! let plan = CurriculumPlanner::new().plan(&request)?;
//! assert!(!plan.modules.is_empty());
//! # Ok::<(), learnplan::PlanError>(())
//! ```

pub mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod selector;
pub mod sequencer;
pub mod solver;
pub mod timeblock;
pub mod validation;

pub use error::PlanError;
pub use models::{LearningPlan, PlanRequest};
pub use scheduler::CurriculumPlanner;
pub use selector::SelectorConfig;
