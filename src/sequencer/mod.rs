//! Module sequencing.
//!
//! Turns the ordered skill list into bounded study modules: a single
//! greedy pass groups each skill with earlier skills it associates
//! strongly with, never ahead of its prerequisites, then allocates each
//! skill its focus share of the total hour budget.
//!
//! The grouping is deliberately order-sensitive and not globally
//! optimal: one O(n·m) pass over skills and modules, trading optimality
//! for predictability.

use tracing::debug;

use crate::graph::{AssociationMap, PrerequisiteGraph};
use crate::models::{Module, Skill, MODULE_SKILL_CAP};

/// Minimum average association weight to join an existing module.
pub const ASSOCIATION_THRESHOLD: f64 = 0.2;

/// Groups ordered skills into modules of at most [`MODULE_SKILL_CAP`].
///
/// For each skill, candidate modules are those strictly after the
/// highest module holding one of its prerequisites. The skill joins the
/// first candidate under the size cap whose members' average association
/// weight with it clears `threshold`; otherwise it opens a new module.
pub fn group_skills(
    order: &[String],
    associations: &AssociationMap,
    prerequisites: &PrerequisiteGraph,
    threshold: f64,
) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut placement: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();

    for skill in order {
        let max_prereq_module = prerequisites
            .prerequisites_of(skill)
            .iter()
            .filter_map(|p| placement.get(p).copied().map(|i| i as i64))
            .max()
            .unwrap_or(-1);

        let first_candidate = (max_prereq_module + 1) as usize;
        let mut joined = None;

        for (idx, group) in groups.iter().enumerate().skip(first_candidate) {
            if group.len() >= MODULE_SKILL_CAP {
                continue;
            }
            let total: f64 = group
                .iter()
                .map(|other| associations.weight(skill, other))
                .sum();
            let avg = total / group.len() as f64;
            if avg >= threshold {
                joined = Some(idx);
                break;
            }
        }

        match joined {
            Some(idx) => {
                groups[idx].push(skill.clone());
                placement.insert(skill.clone(), idx);
            }
            None => {
                groups.push(vec![skill.clone()]);
                placement.insert(skill.clone(), groups.len() - 1);
            }
        }
    }

    groups
}

/// Allocates each skill its focus share of the total hour budget.
///
/// Focus weights must already be normalized. Allocations are rounded to
/// one decimal; skills missing from the list get zero hours.
pub fn assign_durations(groups: Vec<Vec<String>>, skills: &[Skill], total_hours: f64) -> Vec<Module> {
    let focus_by_key: std::collections::HashMap<String, f64> =
        skills.iter().map(|s| (s.key(), s.focus)).collect();

    groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let durations: Vec<f64> = group
                .iter()
                .map(|skill| {
                    let focus = focus_by_key.get(skill).copied().unwrap_or(0.0);
                    round_tenth(focus * total_hours)
                })
                .collect();
            Module::new(i as u32 + 1, group, durations)
        })
        .collect()
}

/// Full sequencing pass: order, group, and allocate.
///
/// `prerequisites` must already be acyclic; `skills` must be normalized.
pub fn sequence_modules(
    skills: &[Skill],
    prerequisites: &PrerequisiteGraph,
    associations: &AssociationMap,
    total_hours: f64,
) -> Vec<Module> {
    let names: Vec<String> = skills.iter().map(|s| s.name.clone()).collect();
    let order = prerequisites.priority_topo_order(&names);
    let groups = group_skills(&order, associations, prerequisites, ASSOCIATION_THRESHOLD);
    debug!(
        skills = order.len(),
        modules = groups.len(),
        "grouped skills into modules"
    );
    assign_durations(groups, skills, total_hours)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;

    fn assoc(pairs: &[(&str, &str, f64)]) -> AssociationMap {
        let mut map = AssociationMap::new();
        for (a, b, w) in pairs {
            map.insert(a, b, *w);
        }
        map
    }

    #[test]
    fn test_group_joins_on_strong_association() {
        let order: Vec<String> = vec!["a".into(), "b".into()];
        let associations = assoc(&[("a", "b", 0.5)]);
        let groups = group_skills(&order, &associations, &PrerequisiteGraph::new(), 0.2);
        assert_eq!(groups, vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_group_splits_on_weak_association() {
        let order: Vec<String> = vec!["a".into(), "b".into()];
        let associations = assoc(&[("a", "b", 0.1)]);
        let groups = group_skills(&order, &associations, &PrerequisiteGraph::new(), 0.2);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_group_respects_skill_cap() {
        let order: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let associations = assoc(&[
            ("a", "b", 0.9),
            ("a", "c", 0.9),
            ("b", "c", 0.9),
            ("a", "d", 0.9),
            ("b", "d", 0.9),
            ("c", "d", 0.9),
        ]);
        let groups = group_skills(&order, &associations, &PrerequisiteGraph::new(), 0.2);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), MODULE_SKILL_CAP);
        assert_eq!(groups[1], vec!["d".to_string()]);
    }

    #[test]
    fn test_group_never_precedes_prerequisite() {
        // b depends on a, yet associates strongly with it; b must not
        // join a's module, only one strictly after it.
        let mut prereq = PrerequisiteGraph::new();
        prereq.add_edge("a", "b", 0.8);
        let order: Vec<String> = vec!["a".into(), "b".into()];
        let associations = assoc(&[("a", "b", 0.9)]);

        let groups = group_skills(&order, &associations, &prereq, 0.2);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec!["a".to_string()]);
        assert_eq!(groups[1], vec!["b".to_string()]);
    }

    #[test]
    fn test_prerequisite_module_invariant() {
        let mut prereq = PrerequisiteGraph::new();
        prereq.add_edge("a", "c", 0.5);
        prereq.add_edge("b", "c", 0.5);
        prereq.add_edge("c", "d", 0.5);
        let order: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let associations = assoc(&[("a", "b", 0.9), ("c", "d", 0.9)]);

        let groups = group_skills(&order, &associations, &prereq, 0.2);
        let module_of = |s: &str| {
            groups
                .iter()
                .position(|g| g.iter().any(|x| x == s))
                .unwrap()
        };
        for (skill, prereqs) in [("c", vec!["a", "b"]), ("d", vec!["c"])] {
            for p in prereqs {
                assert!(
                    module_of(skill) > module_of(p),
                    "{skill} scheduled no later than its prerequisite {p}"
                );
            }
        }
    }

    #[test]
    fn test_assign_durations_focus_share() {
        let skills = vec![
            Skill::new("python", 0.6, 0.3),
            Skill::new("sql", 0.4, 0.7),
        ];
        let groups = vec![vec!["python".to_string()], vec!["sql".to_string()]];
        let modules = assign_durations(groups, &skills, 20.0);

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].index, 1);
        assert!((modules[0].durations[0] - 12.0).abs() < 1e-10);
        assert!((modules[1].durations[0] - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_assign_durations_rounds_to_tenth() {
        let skills = vec![Skill::new("a", 1.0 / 3.0, 0.5)];
        let groups = vec![vec!["a".to_string()]];
        let modules = assign_durations(groups, &skills, 10.0);
        assert!((modules[0].durations[0] - 3.3).abs() < 1e-10);
    }

    #[test]
    fn test_sequence_modules_end_to_end() {
        let skills = vec![
            Skill::new("python", 0.6, 0.3),
            Skill::new("sql", 0.4, 0.7),
        ];
        let mut prereq = PrerequisiteGraph::new();
        prereq.add_edge("python", "sql", 0.5);
        let modules = sequence_modules(&skills, &prereq, &AssociationMap::new(), 20.0);

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].skills, vec!["python".to_string()]);
        assert_eq!(modules[1].skills, vec!["sql".to_string()]);
        assert!((modules[0].durations[0] - 12.0).abs() < 1e-10);
    }
}
