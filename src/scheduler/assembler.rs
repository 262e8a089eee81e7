//! Session assembly.
//!
//! Walks modules in order and turns abstract hour allocations into
//! concrete sessions: each week's budget is spread over the active
//! days, each day's hours are shaped into learning blocks, and each
//! block is filled from the module's resource pool, longest remaining
//! resource first. Within a day a resource is not repeated unless it is
//! the only one left.
//!
//! Pool exhaustion is not an error — a module simply ends early and the
//! next one starts the day after the last emitted session.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

use crate::models::{
    CatalogResource, LearningDays, Module, ScheduledSession, SessionStatus, SkillSelections,
};
use crate::timeblock::{distribute_weekly_hours, BlockPlanner};

/// Minimum hours a session may hold; smaller remainders are dropped
/// rather than fragmented, so an entry below this is spent.
const SCHEDULABLE_MIN_HOURS: f64 = 1.0;

/// A mutable working copy of one selected resource during assembly.
#[derive(Debug, Clone)]
struct PoolEntry {
    skill: String,
    resource: CatalogResource,
    remaining: f64,
}

/// Rounds to the nearest half hour.
fn round_half(hours: f64) -> f64 {
    (hours * 2.0).round() / 2.0
}

/// Rounds down to the half hour. Allocations use this so a session can
/// never exceed the resource's remaining hours or its block's length.
fn floor_half(hours: f64) -> f64 {
    (hours * 2.0).floor() / 2.0
}

/// Builds a module's working pool: one entry per selected resource per
/// member skill, longest declared duration first.
fn build_pool(module: &Module, selections: &SkillSelections) -> Vec<PoolEntry> {
    let mut pool: Vec<PoolEntry> = module
        .skills
        .iter()
        .flat_map(|skill| {
            selections
                .get(skill)
                .into_iter()
                .flatten()
                .map(|resource| PoolEntry {
                    skill: skill.clone(),
                    resource: resource.clone(),
                    remaining: resource.duration_hours,
                })
        })
        .collect();
    pool.sort_by(|a, b| {
        b.resource
            .duration_hours
            .partial_cmp(&a.resource.duration_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pool
}

/// Schedules one module starting at `start_date`.
///
/// Ends when the module's hour allocation is consumed or every pool
/// entry is spent, whichever comes first.
pub fn assemble_module(
    module: &Module,
    start_date: NaiveDate,
    weekly_hours: f64,
    days: &LearningDays,
    selections: &SkillSelections,
    user_id: i64,
    planner: &mut BlockPlanner,
) -> Vec<ScheduledSession> {
    let mut sessions = Vec::new();
    let mut pool = build_pool(module, selections);
    if pool.is_empty() {
        return sessions;
    }

    let mut hours_remaining: f64 = module.durations.iter().map(|d| round_half(*d)).sum();
    let mut current = start_date;

    while hours_remaining > 0.0
        && pool.iter().any(|e| e.remaining >= SCHEDULABLE_MIN_HOURS)
    {
        let allocation = distribute_weekly_hours(weekly_hours.min(hours_remaining), days);
        if allocation.total_hours() <= 0.0 {
            break;
        }

        for _ in 0..7 {
            let weekday = current.weekday();
            if !days.is_active(weekday) {
                current += Duration::days(1);
                continue;
            }
            let daily_hours = allocation.hours(weekday);
            if daily_hours <= 0.0 {
                current += Duration::days(1);
                continue;
            }

            let blocks = planner.blocks_for(daily_hours);
            let mut used_today: HashSet<String> = HashSet::new();
            let repeat_allowed = pool
                .iter()
                .filter(|e| e.remaining >= SCHEDULABLE_MIN_HOURS)
                .count()
                == 1;

            for block in &blocks {
                for entry in pool.iter_mut() {
                    if entry.remaining < SCHEDULABLE_MIN_HOURS {
                        continue;
                    }
                    if !repeat_allowed && used_today.contains(&entry.resource.title) {
                        continue;
                    }

                    let allocated = floor_half(entry.remaining.min(block.duration_hours()));
                    if allocated < SCHEDULABLE_MIN_HOURS {
                        continue;
                    }
                    let end = block.start + Duration::minutes((allocated * 60.0) as i64);

                    sessions.push(ScheduledSession {
                        user_id,
                        module: module.index,
                        skill: entry.skill.clone(),
                        resource_name: entry.resource.title.clone(),
                        resource_url: entry.resource.url.clone(),
                        thumbnail_url: entry.resource.thumbnail_url.clone(),
                        date: current,
                        start: block.start,
                        end,
                        status: SessionStatus::Pending,
                    });

                    entry.remaining -= allocated;
                    used_today.insert(entry.resource.title.clone());
                    break; // one resource per block
                }
            }

            hours_remaining -= daily_hours;
            current += Duration::days(1);
            if hours_remaining <= 0.0 {
                break;
            }
        }
    }

    debug!(
        module = module.index,
        sessions = sessions.len(),
        "assembled module"
    );
    sessions
}

/// Schedules every module in sequence and compacts empty slots.
///
/// Each module starts the day after the previous module's last session.
/// Modules that yield no sessions (no resources selected, or nothing
/// schedulable) are dropped; see [`compact_modules`].
pub fn assemble_schedule(
    modules: &[Module],
    start_date: NaiveDate,
    weekly_hours: f64,
    days: &LearningDays,
    selections: &SkillSelections,
    user_id: i64,
    planner: &mut BlockPlanner,
) -> (Vec<Module>, Vec<ScheduledSession>) {
    let mut planned = Vec::new();
    let mut current = start_date;

    for module in modules {
        let sessions = assemble_module(
            module,
            current,
            weekly_hours,
            days,
            selections,
            user_id,
            planner,
        );
        if let Some(last) = sessions.iter().map(|s| s.date).max() {
            current = last + Duration::days(1);
        }
        planned.push((module.clone(), sessions));
    }

    compact_modules(planned)
}

/// Drops modules that produced no sessions and renumbers the rest.
///
/// Contract: resulting module indices are contiguous starting at 1,
/// original relative order is preserved, and every session's module
/// reference is rewritten to match.
pub fn compact_modules(
    planned: Vec<(Module, Vec<ScheduledSession>)>,
) -> (Vec<Module>, Vec<ScheduledSession>) {
    let mut modules = Vec::new();
    let mut sessions = Vec::new();

    for (mut module, mut module_sessions) in planned {
        if module_sessions.is_empty() {
            continue;
        }
        let new_index = modules.len() as u32 + 1;
        module.index = new_index;
        for session in &mut module_sessions {
            session.module = new_index;
        }
        modules.push(module);
        sessions.append(&mut module_sessions);
    }

    (modules, sessions)
}
