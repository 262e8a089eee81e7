//! Time budgeting.
//!
//! Converts an abstract weekly hour budget into per-day allocations
//! (this module) and each day's allocation into concrete clock-time
//! learning blocks ([`blocks`]).
//!
//! All allocations are non-negative multiples of 0.5 h; arithmetic runs
//! on half-hour integer units internally so the granularity guarantee
//! holds exactly, never approximately.

pub mod blocks;

pub use blocks::{BlockPlanner, LearningBlock};

use chrono::Weekday;

use crate::models::{is_weekend, LearningDays, WEEK};

/// Hard per-day cap in hours.
pub const DAILY_CAP_HOURS: f64 = 10.0;

const DAILY_CAP_UNITS: u32 = 20;
/// Weekend days keep at least this much (3 units = 1.5 h) before the
/// shave applies.
const SHAVE_FLOOR_UNITS: u32 = 3;
/// One hour shaved off each weekend day above the floor.
const SHAVE_UNITS: u32 = 2;

/// Hours of study per weekday, Monday-first.
///
/// Every entry is a multiple of 0.5 and at most [`DAILY_CAP_HOURS`];
/// inactive days are always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyAllocation {
    units: [u32; 7],
}

impl DailyAllocation {
    /// Hours allocated to one day.
    pub fn hours(&self, day: Weekday) -> f64 {
        f64::from(self.units[day.num_days_from_monday() as usize]) / 2.0
    }

    /// Total allocated hours.
    pub fn total_hours(&self) -> f64 {
        f64::from(self.units.iter().sum::<u32>()) / 2.0
    }

    /// Days with a nonzero allocation, Monday-first.
    pub fn nonzero_days(&self) -> Vec<(Weekday, f64)> {
        WEEK.iter()
            .copied()
            .filter(|d| self.units[d.num_days_from_monday() as usize] > 0)
            .map(|d| (d, self.hours(d)))
            .collect()
    }

    fn get(&self, day: Weekday) -> u32 {
        self.units[day.num_days_from_monday() as usize]
    }

    fn add(&mut self, day: Weekday, units: u32) {
        self.units[day.num_days_from_monday() as usize] += units;
    }

    fn sub(&mut self, day: Weekday, units: u32) {
        self.units[day.num_days_from_monday() as usize] -= units;
    }
}

/// Distributes a weekly hour budget across the active days.
///
/// 1. Round-robin 0.5 h increments across active days until the budget
///    is spent (fractions below 0.5 h are dropped).
/// 2. Shave 1 h off each weekend day holding more than 1.5 h.
/// 3. Push the shaved hours onto active weekdays in 0.5 h steps, never
///    past the 10 h cap.
/// 4. Hours no weekday can take go back to the weekend.
/// 5. Clamp everything to the cap and re-spread any clamped overflow to
///    days still under it.
///
/// The output sums to the budget unless the cap makes that infeasible,
/// in which case the sum is smaller.
pub fn distribute_weekly_hours(weekly_hours: f64, days: &LearningDays) -> DailyAllocation {
    let mut allocation = DailyAllocation::default();
    let active = days.active_days();
    if active.is_empty() || weekly_hours < 0.5 {
        return allocation;
    }

    // Step 1: round-robin fill.
    let mut remaining = (weekly_hours * 2.0).floor() as u32;
    let mut i = 0usize;
    while remaining >= 1 {
        allocation.add(active[i % active.len()], 1);
        remaining -= 1;
        i += 1;
    }

    // Step 2: weekend shave.
    let mut transferable = 0u32;
    for day in [Weekday::Sat, Weekday::Sun] {
        if days.is_active(day) && allocation.get(day) > SHAVE_FLOOR_UNITS {
            allocation.sub(day, SHAVE_UNITS);
            transferable += SHAVE_UNITS;
        }
    }

    // Step 3: move shaved hours to weekdays under the cap.
    let weekdays: Vec<Weekday> = active.iter().copied().filter(|d| !is_weekend(*d)).collect();
    let mut j = 0usize;
    let mut failed = 0usize;
    while transferable >= 1 && !weekdays.is_empty() {
        let day = weekdays[j % weekdays.len()];
        if allocation.get(day) + 1 <= DAILY_CAP_UNITS {
            allocation.add(day, 1);
            transferable -= 1;
        } else {
            failed += 1;
        }
        j += 1;
        if failed >= weekdays.len() {
            break;
        }
    }

    // Step 4: whatever the weekdays refused goes back to the weekend.
    let weekend: Vec<Weekday> = active.iter().copied().filter(|d| is_weekend(*d)).collect();
    if transferable >= 1 && !weekend.is_empty() {
        let mut k = 0usize;
        while transferable >= 1 {
            allocation.add(weekend[k % weekend.len()], 1);
            transferable -= 1;
            k += 1;
        }
    }

    // Step 5: cap clamp and overflow re-spread.
    let mut overflow = 0u32;
    for day in WEEK {
        let units = allocation.get(day);
        if units > DAILY_CAP_UNITS {
            overflow += units - DAILY_CAP_UNITS;
            allocation.sub(day, units - DAILY_CAP_UNITS);
        }
    }
    if overflow > 0 {
        let mut placed_any = true;
        while overflow >= 1 && placed_any {
            placed_any = false;
            for day in &active {
                if overflow >= 1 && allocation.get(*day) + 1 <= DAILY_CAP_UNITS {
                    allocation.add(*day, 1);
                    overflow -= 1;
                    placed_any = true;
                }
            }
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LearningDays;

    fn assert_half_hour_multiples(allocation: &DailyAllocation) {
        for day in WEEK {
            let h = allocation.hours(day);
            assert!(
                ((h * 2.0) - (h * 2.0).round()).abs() < 1e-10,
                "{day} allocation {h} not a multiple of 0.5"
            );
            assert!(h <= DAILY_CAP_HOURS);
        }
    }

    #[test]
    fn test_even_spread_over_weekdays() {
        let allocation = distribute_weekly_hours(10.0, &LearningDays::weekdays());
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            assert!((allocation.hours(day) - 2.0).abs() < 1e-10);
        }
        assert!((allocation.total_hours() - 10.0).abs() < 1e-10);
        assert_half_hour_multiples(&allocation);
    }

    #[test]
    fn test_sum_preserved_every_day() {
        let allocation = distribute_weekly_hours(20.0, &LearningDays::every_day());
        assert!((allocation.total_hours() - 20.0).abs() < 1e-10);
        assert_half_hour_multiples(&allocation);
    }

    #[test]
    fn test_weekend_shave_moves_hours_to_weekdays() {
        // 21h over 7 days → 3h everywhere, then 1h moves off each
        // weekend day onto weekdays.
        let allocation = distribute_weekly_hours(21.0, &LearningDays::every_day());
        assert!((allocation.total_hours() - 21.0).abs() < 1e-10);
        assert!(allocation.hours(Weekday::Sat) < 3.0);
        assert!(allocation.hours(Weekday::Sun) < 3.0);
        let weekday_total: f64 = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .iter()
        .map(|d| allocation.hours(*d))
        .sum();
        assert!(weekday_total > 15.0);
        assert_half_hour_multiples(&allocation);
    }

    #[test]
    fn test_small_weekend_allocation_not_shaved() {
        // 1.5h on Saturday alone stays put (at or below the shave floor).
        let days = LearningDays::from_flags([false, false, false, false, false, true, false]);
        let allocation = distribute_weekly_hours(1.5, &days);
        assert!((allocation.hours(Weekday::Sat) - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_cap_binds_single_day() {
        // 12h on one active day: cap trims it to 10h; the rest has
        // nowhere to go.
        let days = LearningDays::from_flags([true, false, false, false, false, false, false]);
        let allocation = distribute_weekly_hours(12.0, &days);
        assert!((allocation.hours(Weekday::Mon) - DAILY_CAP_HOURS).abs() < 1e-10);
        assert!(allocation.total_hours() <= 12.0);
    }

    #[test]
    fn test_inactive_days_get_nothing() {
        let allocation = distribute_weekly_hours(10.0, &LearningDays::weekdays());
        assert!((allocation.hours(Weekday::Sat) - 0.0).abs() < 1e-10);
        assert!((allocation.hours(Weekday::Sun) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_and_tiny_budgets() {
        let days = LearningDays::weekdays();
        assert!((distribute_weekly_hours(0.0, &days).total_hours() - 0.0).abs() < 1e-10);
        assert!((distribute_weekly_hours(0.4, &days).total_hours() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_active_days() {
        let days = LearningDays::from_flags([false; 7]);
        let allocation = distribute_weekly_hours(10.0, &days);
        assert!((allocation.total_hours() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_fraction_below_half_hour_dropped() {
        let allocation = distribute_weekly_hours(10.3, &LearningDays::weekdays());
        assert!((allocation.total_hours() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_nonzero_days_order() {
        let allocation = distribute_weekly_hours(3.0, &LearningDays::weekdays());
        let days: Vec<Weekday> = allocation.nonzero_days().iter().map(|(d, _)| *d).collect();
        // Round-robin starts Monday; 3h over 5 days = 6 half-hours →
        // Mon gets 1h, Tue 1h... first five in order get 0.5-1h each.
        assert_eq!(days.first(), Some(&Weekday::Mon));
    }
}
