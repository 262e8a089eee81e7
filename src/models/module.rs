//! Study module model.
//!
//! A module is a small, prerequisite-respecting group of skills (1–3)
//! learned together, with a per-skill hour allocation drawn from the
//! run's total time budget. Modules are identified by a 1-based index;
//! downstream compaction keeps indices contiguous when a module ends up
//! producing no sessions.

use serde::{Deserialize, Serialize};

/// Maximum number of skills grouped into one module.
pub const MODULE_SKILL_CAP: usize = 3;

/// An ordered group of skills scheduled to be learned together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// 1-based sequence index.
    pub index: u32,
    /// Skill keys (lowercased), in grouping order.
    pub skills: Vec<String>,
    /// Per-skill hour allocations, parallel to `skills`.
    pub durations: Vec<f64>,
}

impl Module {
    /// Creates a module from parallel skill/duration lists.
    pub fn new(index: u32, skills: Vec<String>, durations: Vec<f64>) -> Self {
        debug_assert_eq!(skills.len(), durations.len());
        Self {
            index,
            skills,
            durations,
        }
    }

    /// Total allocated hours across the module's skills.
    pub fn total_hours(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// Allocated hours for one skill (0 if the skill is not in the module).
    pub fn hours_for(&self, skill: &str) -> f64 {
        self.skills
            .iter()
            .position(|s| s.eq_ignore_ascii_case(skill))
            .map(|i| self.durations[i])
            .unwrap_or(0.0)
    }

    /// Whether the module contains the given skill.
    pub fn contains_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Number of skills in the module.
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_totals() {
        let m = Module::new(
            1,
            vec!["python".into(), "sql".into()],
            vec![12.0, 8.0],
        );
        assert!((m.total_hours() - 20.0).abs() < 1e-10);
        assert!((m.hours_for("SQL") - 8.0).abs() < 1e-10);
        assert!((m.hours_for("docker") - 0.0).abs() < 1e-10);
        assert_eq!(m.skill_count(), 2);
    }

    #[test]
    fn test_contains_skill() {
        let m = Module::new(2, vec!["docker".into()], vec![4.0]);
        assert!(m.contains_skill("Docker"));
        assert!(!m.contains_skill("sql"));
    }
}
