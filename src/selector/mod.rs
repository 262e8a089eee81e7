//! Resource selection.
//!
//! For each skill: filter the catalog to the skill's tag, score every
//! candidate, and pick a subset whose total duration lands within
//! tolerance of the skill's ideal duration. The subset is chosen by the
//! injected [`SubsetSolver`]; when the solver reports infeasible (or
//! runs out of budget), a greedy pass takes over, and when even that
//! places nothing, the single shortest candidate is taken — a skill with
//! any candidates never ends up empty-handed.
//!
//! An empty candidate set is not an error: the catalog is allowed to be
//! incomplete for niche skills, and downstream tolerates zero resources
//! for a skill.

pub mod score;

use tracing::debug;

use crate::graph::PrerequisiteGraph;
use crate::models::{CatalogResource, Module, Skill, SkillSelections};
use crate::solver::{SubsetConstraints, SubsetItem, SubsetSolver};
use score::{difficulty_score, match_score, standardize};

/// Selection weights and windows.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Share of the total budget targeted by resource content.
    pub portion: f64,
    /// Relative tolerance around the ideal duration.
    pub tolerance: f64,
    /// Difficulty-fit weight in the objective.
    pub alpha: f64,
    /// Quality weight.
    pub beta: f64,
    /// Price weight (subtracted).
    pub lambda: f64,
    /// Per-item count penalty (subtracted per selected resource).
    pub gamma: f64,
    /// Jaro-Winkler threshold for fuzzy text matches.
    pub fuzzy_threshold: f64,
    /// Maximum resources per skill.
    pub max_items: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            portion: 1.0,
            tolerance: 0.1,
            alpha: 1.0,
            beta: 0.5,
            lambda: 0.1,
            gamma: 0.05,
            fuzzy_threshold: 0.8,
            max_items: 5,
        }
    }
}

/// Selects resources for every skill in the run.
///
/// `skills` must carry normalized focus weights. `modules` supply
/// co-module skills and `prerequisites` supply prerequisite skills for
/// topical scoring.
pub fn select_resources(
    skills: &[Skill],
    catalog: &[CatalogResource],
    total_weeks: u32,
    weekly_hours: f64,
    modules: &[Module],
    prerequisites: &PrerequisiteGraph,
    config: &SelectorConfig,
    solver: &dyn SubsetSolver,
) -> SkillSelections {
    let mut selections = SkillSelections::new();

    for skill in skills {
        let key = skill.key();
        let candidates: Vec<&CatalogResource> =
            catalog.iter().filter(|r| r.matches_skill(&key)).collect();
        if candidates.is_empty() {
            selections.insert(key, Vec::new());
            continue;
        }

        let ideal =
            config.portion * f64::from(total_weeks) * weekly_hours * skill.focus;
        let co_module = co_module_skills(modules, &key);
        let prereqs = prerequisites.prerequisites_of(&key);

        let objectives = candidate_objectives(&candidates, skill, &co_module, &prereqs, config);
        let chosen = pick_subset(&candidates, &objectives, ideal, config, solver);

        debug!(
            skill = %key,
            candidates = candidates.len(),
            selected = chosen.len(),
            ideal_hours = ideal,
            "selected resources"
        );
        selections.insert(
            key,
            chosen.into_iter().map(|i| candidates[i].clone()).collect(),
        );
    }

    selections
}

/// Other skills sharing a module with the given skill.
fn co_module_skills(modules: &[Module], skill: &str) -> Vec<String> {
    modules
        .iter()
        .filter(|m| m.contains_skill(skill))
        .flat_map(|m| m.skills.iter())
        .filter(|other| *other != skill)
        .cloned()
        .collect()
}

/// Weighted, standardized objective value per candidate.
fn candidate_objectives(
    candidates: &[&CatalogResource],
    skill: &Skill,
    co_module: &[String],
    prereqs: &[String],
    config: &SelectorConfig,
) -> Vec<f64> {
    let key = skill.key();
    let match_raw: Vec<f64> = candidates
        .iter()
        .map(|r| match_score(r, &key, co_module, prereqs, config.fuzzy_threshold))
        .collect();
    let difficulty_raw: Vec<f64> = candidates
        .iter()
        .map(|r| difficulty_score(r, skill.confidence))
        .collect();
    let quality_raw: Vec<f64> = candidates.iter().map(|r| r.quality).collect();
    let price_raw: Vec<f64> = candidates.iter().map(|r| r.price).collect();

    let m = standardize(&match_raw);
    let d = standardize(&difficulty_raw);
    let q = standardize(&quality_raw);
    let p = standardize(&price_raw);

    (0..candidates.len())
        .map(|i| m[i] + config.alpha * d[i] + config.beta * q[i] - config.lambda * p[i])
        .collect()
}

/// Solver path with greedy and shortest-single fallbacks.
fn pick_subset(
    candidates: &[&CatalogResource],
    objectives: &[f64],
    ideal: f64,
    config: &SelectorConfig,
    solver: &dyn SubsetSolver,
) -> Vec<usize> {
    let items: Vec<SubsetItem> = candidates
        .iter()
        .zip(objectives)
        .map(|(r, &value)| SubsetItem::new(value - config.gamma, r.duration_hours))
        .collect();
    let constraints = SubsetConstraints::around(ideal, config.tolerance, 1, config.max_items);

    if let Some(chosen) = solver.solve(&items, &constraints) {
        return chosen;
    }

    let greedy = greedy_selection(candidates, objectives, ideal, config);
    if !greedy.is_empty() {
        return greedy;
    }

    // Mandatory-minimum fallback: the shortest candidate, even outside
    // the tolerance band.
    let shortest = candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.duration_hours
                .partial_cmp(&b.duration_hours)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .expect("candidate set is non-empty");
    vec![shortest]
}

/// Greedy accumulation: walk candidates by descending objective, take
/// anything that fits under the upper duration bound, stop once the
/// lower bound is reached.
fn greedy_selection(
    candidates: &[&CatalogResource],
    objectives: &[f64],
    ideal: f64,
    config: &SelectorConfig,
) -> Vec<usize> {
    let min_duration = ideal * (1.0 - config.tolerance);
    let max_duration = ideal * (1.0 + config.tolerance);

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        objectives[b]
            .partial_cmp(&objectives[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut chosen = Vec::new();
    let mut total = 0.0;
    for idx in order {
        if chosen.len() >= config.max_items {
            break;
        }
        let proposed = total + candidates[idx].duration_hours;
        if proposed > max_duration {
            continue;
        }
        chosen.push(idx);
        total = proposed;
        if total >= min_duration && !chosen.is_empty() {
            break;
        }
    }
    chosen
}
