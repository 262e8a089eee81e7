//! Day-shape planning.
//!
//! Partitions one working day (08:00–21:00, 15-minute units) into
//! contiguous learning blocks and breaks for a target hour count.
//! Two fixed break windows — 11:00–12:00 and 17:00–18:00 — are never
//! learning time; every learning group spans 1–3 hours and is followed
//! by at least one free unit unless it touches the end of the window
//! (a fixed break counts as the rest).
//!
//! The shape is chosen by exact dynamic programming over
//! (unit index, units still to place): maximize time inside the
//! preferred 12:00–17:00 window, penalizing group lengths outside
//! 1.5–2 h. The optimal shape depends only on the hour count, so shapes
//! are memoized in [`BlockPlanner`].

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minutes per scheduling unit.
pub const UNIT_MINUTES: u32 = 15;
/// Units in the 08:00–21:00 working window.
pub const UNITS_PER_DAY: usize = 52;

const DAY_START_MINUTE: u32 = 8 * 60;
/// 11:00–12:00, units 12–15.
const LUNCH_UNITS: std::ops::Range<usize> = 12..16;
/// 17:00–18:00, units 36–39.
const DINNER_UNITS: std::ops::Range<usize> = 36..40;
/// Preferred 12:00–17:00 window, units 16–35.
const AFTERNOON_UNITS: std::ops::Range<usize> = 16..36;

/// 1 hour minimum group.
const MIN_GROUP_UNITS: usize = 4;
/// 3 hour maximum group.
const MAX_GROUP_UNITS: usize = 12;
/// Penalty-free group lengths: 1.5–2 h.
const PREFERRED_MIN_UNITS: usize = 6;
const PREFERRED_MAX_UNITS: usize = 8;

/// A contiguous learning interval within one day, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningBlock {
    /// Clock start time.
    pub start: NaiveTime,
    /// Clock end time (exclusive).
    pub end: NaiveTime,
}

impl LearningBlock {
    /// Block length in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}

fn is_fixed_break(unit: usize) -> bool {
    LUNCH_UNITS.contains(&unit) || DINNER_UNITS.contains(&unit)
}

fn unit_time(unit: usize) -> NaiveTime {
    let minute = DAY_START_MINUTE + unit as u32 * UNIT_MINUTES;
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).expect("unit within the day")
}

/// Score of a group starting at `start` with `len` units: afternoon
/// coverage minus the off-preference length penalty.
fn group_score(start: usize, len: usize) -> i64 {
    let overlap_start = start.max(AFTERNOON_UNITS.start);
    let overlap_end = (start + len).min(AFTERNOON_UNITS.end);
    let afternoon = overlap_end.saturating_sub(overlap_start) as i64;

    let penalty = if len < PREFERRED_MIN_UNITS {
        (PREFERRED_MIN_UNITS - len) as i64
    } else if len > PREFERRED_MAX_UNITS {
        (len - PREFERRED_MAX_UNITS) as i64
    } else {
        0
    };
    afternoon - penalty
}

/// Selects the optimal learning units for a target unit count.
///
/// Returns `None` when the target is infeasible (cannot be covered by
/// valid groups within the window).
fn plan_units(target_units: usize) -> Option<Vec<bool>> {
    const UNREACHABLE: i64 = i64::MIN;
    let n = UNITS_PER_DAY;

    // dp[i][r]: best score placing r units in [i, n); choice = group
    // length started at i (0 = leave i free).
    let mut dp = vec![vec![UNREACHABLE; target_units + 1]; n + 1];
    let mut choice = vec![vec![0usize; target_units + 1]; n + 1];
    dp[n][0] = 0;

    for i in (0..n).rev() {
        for r in 0..=target_units {
            let mut best = dp[i + 1][r];
            let mut pick = 0usize;

            if !is_fixed_break(i) {
                // Grow the span one unit at a time so every unit gets
                // checked against the fixed breaks exactly once.
                for len in 1..=MAX_GROUP_UNITS {
                    if i + len > n || is_fixed_break(i + len - 1) {
                        break;
                    }
                    if len < MIN_GROUP_UNITS || len > r {
                        continue;
                    }
                    let next = (i + len + 1).min(n);
                    let sub = dp[next][r - len];
                    if sub == UNREACHABLE {
                        continue;
                    }
                    let score = group_score(i, len) + sub;
                    if score > best {
                        best = score;
                        pick = len;
                    }
                }
            }

            dp[i][r] = best;
            choice[i][r] = pick;
        }
    }

    if dp[0][target_units] == UNREACHABLE {
        return None;
    }

    let mut selected = vec![false; n];
    let mut i = 0usize;
    let mut r = target_units;
    while i < n {
        let len = choice[i][r];
        if len == 0 {
            i += 1;
            continue;
        }
        for unit in selected.iter_mut().skip(i).take(len) {
            *unit = true;
        }
        r -= len;
        i = i + len + 1;
    }
    debug_assert_eq!(r, 0);

    Some(selected)
}

/// Merges selected units into contiguous clock-time blocks.
fn merge_blocks(selected: &[bool]) -> Vec<LearningBlock> {
    let mut blocks = Vec::new();
    let mut run_start: Option<usize> = None;

    for (unit, &on) in selected.iter().enumerate() {
        match (on, run_start) {
            (true, None) => run_start = Some(unit),
            (false, Some(start)) => {
                blocks.push(LearningBlock {
                    start: unit_time(start),
                    end: unit_time(unit),
                });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        blocks.push(LearningBlock {
            start: unit_time(start),
            end: unit_time(selected.len()),
        });
    }

    blocks
}

/// Day-shape planner with per-hour-count memoization.
///
/// One instance lives per planning run; recomputing on a miss is always
/// correct, the cache only avoids duplicate work.
#[derive(Debug, Clone, Default)]
pub struct BlockPlanner {
    // Keyed by target quarter-hour units.
    cache: HashMap<usize, Vec<LearningBlock>>,
}

impl BlockPlanner {
    /// Creates an empty planner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learning blocks for a target hour count.
    ///
    /// Infeasible targets (below the 1 h minimum group, or beyond what
    /// the window holds) yield an empty shape.
    pub fn blocks_for(&mut self, hours: f64) -> Vec<LearningBlock> {
        let target_units = (hours * 4.0).round().max(0.0) as usize;
        self.cache
            .entry(target_units)
            .or_insert_with(|| {
                plan_units(target_units)
                    .map(|selected| merge_blocks(&selected))
                    .unwrap_or_default()
            })
            .clone()
    }

    /// Number of cached shapes.
    pub fn cached_shapes(&self) -> usize {
        self.cache.len()
    }
}
