//! Planning request and result containers.
//!
//! A [`PlanRequest`] bundles everything one planning run consumes:
//! the ranked skill list, the domain relationship records, the resource
//! catalog, and the time parameters. A [`LearningPlan`] is the run's
//! complete output.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CatalogResource, Module, RelationshipRecord, ScheduledSession, Skill};

/// Per-skill resource selections (skill key → chosen resources, in
/// selection order).
pub type SkillSelections = HashMap<String, Vec<CatalogResource>>;

/// The set of weekdays available for studying.
///
/// Stored as seven flags in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningDays {
    active: [bool; 7],
}

impl LearningDays {
    /// All seven days active.
    pub fn every_day() -> Self {
        Self { active: [true; 7] }
    }

    /// Monday through Friday active.
    pub fn weekdays() -> Self {
        Self {
            active: [true, true, true, true, true, false, false],
        }
    }

    /// Builds from explicit Monday-first flags.
    pub fn from_flags(active: [bool; 7]) -> Self {
        Self { active }
    }

    /// Enables or disables one day.
    pub fn with_day(mut self, day: Weekday, active: bool) -> Self {
        self.active[day.num_days_from_monday() as usize] = active;
        self
    }

    /// Whether the given day is available for studying.
    pub fn is_active(&self, day: Weekday) -> bool {
        self.active[day.num_days_from_monday() as usize]
    }

    /// Active days in Monday-first order.
    pub fn active_days(&self) -> Vec<Weekday> {
        WEEK.iter()
            .copied()
            .filter(|d| self.is_active(*d))
            .collect()
    }

    /// Number of active days.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }
}

/// The week in Monday-first order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Whether a day falls on the weekend.
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Input container for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// User the sessions are planned for.
    pub user_id: i64,
    /// Ranked skills with focus and confidence estimates.
    pub skills: Vec<Skill>,
    /// Domain relationship records (prerequisites + associations).
    pub relationships: Vec<RelationshipRecord>,
    /// Resource catalog.
    pub catalog: Vec<CatalogResource>,
    /// Plan length in weeks (> 0).
    pub total_weeks: u32,
    /// Weekly study-hour budget (> 0).
    pub weekly_hours: f64,
    /// Days available for studying.
    pub learning_days: LearningDays,
    /// First candidate study date. Defaults to the day after today.
    pub start_date: Option<NaiveDate>,
}

impl PlanRequest {
    /// Creates a request with an every-day schedule and default start.
    pub fn new(user_id: i64, skills: Vec<Skill>, total_weeks: u32, weekly_hours: f64) -> Self {
        Self {
            user_id,
            skills,
            relationships: Vec::new(),
            catalog: Vec::new(),
            total_weeks,
            weekly_hours,
            learning_days: LearningDays::every_day(),
            start_date: None,
        }
    }

    /// Sets the relationship records.
    pub fn with_relationships(mut self, relationships: Vec<RelationshipRecord>) -> Self {
        self.relationships = relationships;
        self
    }

    /// Sets the resource catalog.
    pub fn with_catalog(mut self, catalog: Vec<CatalogResource>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the learning-day pattern.
    pub fn with_learning_days(mut self, days: LearningDays) -> Self {
        self.learning_days = days;
        self
    }

    /// Sets an explicit start date.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Total hour budget for the run (`weeks × weekly_hours`).
    pub fn total_hours(&self) -> f64 {
        f64::from(self.total_weeks) * self.weekly_hours
    }
}

/// The complete output of one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPlan {
    /// Modules actually used, compacted to contiguous 1-based indices.
    pub modules: Vec<Module>,
    /// All scheduled sessions, in calendar order per module.
    pub sessions: Vec<ScheduledSession>,
    /// Per-skill resource selections.
    pub selections: SkillSelections,
}

impl LearningPlan {
    /// Number of scheduled sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// First and last session dates, if any sessions exist.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.sessions.iter().map(|s| s.date).min()?;
        let last = self.sessions.iter().map(|s| s.date).max()?;
        Some((first, last))
    }
}
