//! Skill model.
//!
//! A skill is one competency the learner wants to acquire, weighted by
//! how much of the plan should be devoted to it (`focus`) and how much
//! of it the learner already knows (`confidence`).
//!
//! # Identity
//! Skill names are case-insensitive identity keys. Every lookup in the
//! engine goes through [`Skill::key`] (lowercased name).

use serde::{Deserialize, Serialize};

/// A skill to be learned, with importance and proficiency estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name (case-insensitive identity key).
    pub name: String,
    /// Relative importance weight (>= 0). Normalized across the run's
    /// skill set before any duration math.
    pub focus: f64,
    /// Existing proficiency estimate (0.0 = none, 1.0 = expert).
    pub confidence: f64,
}

impl Skill {
    /// Creates a new skill.
    pub fn new(name: impl Into<String>, focus: f64, confidence: f64) -> Self {
        Self {
            name: name.into(),
            focus,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Canonical lookup key (lowercased name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Normalizes focus weights so they sum to 1 across the skill set.
///
/// If the total focus is zero (or the list is empty), weights are left
/// unchanged — there is nothing meaningful to scale by.
pub fn normalize_focus(skills: &[Skill]) -> Vec<Skill> {
    let total: f64 = skills.iter().map(|s| s.focus).sum();
    if total <= 0.0 {
        return skills.to_vec();
    }
    skills
        .iter()
        .map(|s| Skill {
            name: s.name.clone(),
            focus: s.focus / total,
            confidence: s.confidence,
        })
        .collect()
}
