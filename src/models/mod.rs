//! Curriculum planning domain models.
//!
//! Core data types for one planning run: the immutable inputs (skills,
//! relationship records, resource catalog, time parameters) and the
//! engine's artifacts (modules, selections, scheduled sessions).
//!
//! # Pipeline
//!
//! | Stage | Consumes | Produces |
//! |-------|----------|----------|
//! | Graph | `RelationshipRecord` | prerequisite graph, associations |
//! | Sequencer | skills + graphs | `Module` |
//! | Selector | skills + `CatalogResource` | `SkillSelections` |
//! | Assembler | modules + selections | `ScheduledSession` |

mod module;
mod relation;
mod request;
mod resource;
mod session;
mod skill;

pub use module::{Module, MODULE_SKILL_CAP};
pub use relation::{RelationKind, RelationshipRecord};
pub use request::{
    is_weekend, LearningDays, LearningPlan, PlanRequest, SkillSelections, WEEK,
};
pub use resource::{CatalogResource, Difficulty};
pub use session::{ScheduledSession, SessionStatus};
pub use skill::{normalize_focus, Skill};
