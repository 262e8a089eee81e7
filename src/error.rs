//! Planning error taxonomy.
//!
//! Only run-fatal conditions surface here: missing domain data and
//! unusable inputs. Recoverable conditions (infeasible optimizations,
//! fuzzy near-misses, resource-pool exhaustion) are handled inside the
//! stage that hits them and never abort a run.

use thiserror::Error;

use crate::validation::ValidationError;

/// A fatal, run-scoped planning failure.
#[derive(Debug, Error)]
pub enum PlanError {
    /// No relationship dataset exists for the matched job domain.
    ///
    /// The engine consumes in-process records, so this is raised by
    /// callers that load domain datasets and find none; it is part of
    /// the taxonomy so one error type covers the whole planning path.
    #[error("skill graph not found for domain '{domain}'")]
    GraphNotFound { domain: String },

    /// The request carried no skills.
    #[error("skill list is empty")]
    EmptySkillList,

    /// The request carried no catalog resources.
    #[error("resource catalog is empty")]
    EmptyCatalog,

    /// Input integrity checks failed.
    #[error("invalid planning input: {}", format_errors(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
