//! Scheduled session model.
//!
//! A session is one committed unit of study: a concrete resource on a
//! concrete date between concrete clock times. Sessions are the engine's
//! sole output artifact; the caller owns persistence.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a scheduled session.
///
/// The engine always emits `Pending`; the other states belong to the
/// caller's progress tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Completed,
    Skipped,
}

/// One committed study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// Owning user.
    pub user_id: i64,
    /// 1-based module index (contiguous after compaction).
    pub module: u32,
    /// Skill key being studied.
    pub skill: String,
    /// Title of the resource worked on.
    pub resource_name: String,
    /// Link to the resource.
    pub resource_url: String,
    /// Optional preview image.
    pub thumbnail_url: Option<String>,
    /// Calendar date of the session.
    pub date: NaiveDate,
    /// Clock start time.
    pub start: NaiveTime,
    /// Clock end time (exclusive).
    pub end: NaiveTime,
    /// Lifecycle status (initially `Pending`).
    pub status: SessionStatus,
}

impl ScheduledSession {
    /// Session length in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Whether two sessions on the same date overlap in clock time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}
