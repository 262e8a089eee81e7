//! Domain relationship records.
//!
//! The skill-dependency dataset for a job domain is a flat list of
//! weighted relationships between skill names. Two kinds exist:
//! prerequisites (directed, "learn source before target") and
//! associations (symmetric affinity, used for module grouping).

use serde::{Deserialize, Serialize};

/// The kind of a skill relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Directed: the source skill must be learned before the target.
    Prerequisite,
    /// Symmetric: the two skills pair well when learned together.
    Association,
}

/// One relationship record from a domain's skill graph dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Source skill name.
    pub source: String,
    /// Target skill name.
    pub target: String,
    /// Relationship kind.
    #[serde(rename = "relationship")]
    pub kind: RelationKind,
    /// Strength of the relationship.
    pub weight: f64,
}

impl RelationshipRecord {
    /// Creates a prerequisite record (source before target).
    pub fn prerequisite(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Prerequisite,
            weight,
        }
    }

    /// Creates an association record.
    pub fn association(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: RelationKind::Association,
            weight,
        }
    }
}
