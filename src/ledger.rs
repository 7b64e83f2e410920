// 🚦 Infraction Ledger - Demerit points and the rolling suspension window
//
// Entries are appended, never overwritten or removed: two offenses on the
// same day are two entries. Suspension is re-derived after every accrual
// from the points inside the window that ends on the newest offense.

use crate::calendar;
use crate::rejection::Rejection;
use crate::validators;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_POINTS: i32 = 1;
pub const MAX_POINTS: i32 = 6;

// ============================================================================
// ACCRUAL OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualOutcome {
    Success,
    Failure,
}

impl AccrualOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccrualOutcome::Success => "Success",
            AccrualOutcome::Failure => "Failure",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == AccrualOutcome::Success
    }
}

impl std::fmt::Display for AccrualOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> From<Result<T, Rejection>> for AccrualOutcome {
    fn from(result: Result<T, Rejection>) -> Self {
        match result {
            Ok(_) => AccrualOutcome::Success,
            Err(_) => AccrualOutcome::Failure,
        }
    }
}

// ============================================================================
// SUSPENSION POLICY
// ============================================================================

/// Thresholds for the rolling-window rule.
///
/// A driver younger than `young_driver_age` on the day of the offense is held
/// to `young_threshold`, everyone else to `standard_threshold`. Suspended
/// only when the window sum is strictly greater than the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspensionPolicy {
    pub young_driver_age: i32,
    pub young_threshold: u32,
    pub standard_threshold: u32,
    pub window_years: u32,
}

impl Default for SuspensionPolicy {
    fn default() -> Self {
        SuspensionPolicy {
            young_driver_age: 21,
            young_threshold: 6,
            standard_threshold: 12,
            window_years: 2,
        }
    }
}

impl SuspensionPolicy {
    /// Threshold for a driver of `age_at_offense` whole years
    pub fn threshold_for(&self, age_at_offense: i32) -> u32 {
        if age_at_offense < self.young_driver_age {
            self.young_threshold
        } else {
            self.standard_threshold
        }
    }
}

// ============================================================================
// INFRACTION ENTRY
// ============================================================================

/// One recorded offense; immutable once appended.
/// Only `parse` builds one, so points are always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfractionEntry {
    offense_date: NaiveDate,
    points: u8,
}

impl InfractionEntry {
    /// Validate raw accrual input: date first, then the points range
    pub fn parse(offense_date: &str, points: i32) -> Result<Self, Rejection> {
        let offense_date = validators::check_date(offense_date)?;

        if !(MIN_POINTS..=MAX_POINTS).contains(&points) {
            return Err(Rejection::PointsOutOfRange(points));
        }

        Ok(InfractionEntry {
            offense_date,
            points: points as u8,
        })
    }

    pub fn offense_date(&self) -> NaiveDate {
        self.offense_date
    }

    pub fn points(&self) -> u8 {
        self.points
    }
}

// ============================================================================
// INFRACTION LEDGER
// ============================================================================

/// Serialize-only: the suspension flag is always derived, never loaded
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfractionLedger {
    entries: Vec<InfractionEntry>,
    suspended: bool,
}

impl InfractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and re-derive the suspension flag.
    ///
    /// The reference date is the new entry's own offense date, and the
    /// threshold depends on the driver's age on that date. The flag is
    /// overwritten each time, so it can clear as well as set.
    pub fn accrue(
        &mut self,
        entry: InfractionEntry,
        birth_date: NaiveDate,
        policy: &SuspensionPolicy,
    ) -> bool {
        self.entries.push(entry);

        let age_at_offense = calendar::whole_years_between(birth_date, entry.offense_date);
        let threshold = policy.threshold_for(age_at_offense);
        let total = self.points_in_window(entry.offense_date, policy.window_years);

        self.suspended = total > threshold;

        tracing::debug!(
            offense_date = %calendar::format_date(entry.offense_date),
            points = entry.points,
            age_at_offense,
            window_total = total,
            threshold,
            suspended = self.suspended,
            "infraction accrued"
        );

        self.suspended
    }

    /// Sum of points dated within `[reference - years, reference]`, both ends inclusive
    pub fn points_in_window(&self, reference: NaiveDate, years: u32) -> u32 {
        let window_start = calendar::years_before(reference, years);

        self.entries
            .iter()
            .filter(|e| e.offense_date >= window_start && e.offense_date <= reference)
            .map(|e| u32::from(e.points))
            .sum()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn entries(&self) -> &[InfractionEntry] {
        &self.entries
    }

    /// Most recently accrued entry (not necessarily the latest date)
    pub fn latest_offense(&self) -> Option<&InfractionEntry> {
        self.entries.last()
    }

    pub fn total_points(&self) -> u32 {
        self.entries.iter().map(|e| u32::from(e.points)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: &str, points: i32) -> InfractionEntry {
        InfractionEntry::parse(date, points).unwrap()
    }

    #[test]
    fn test_parse_entry_checks_date_then_points() {
        assert_eq!(
            InfractionEntry::parse("2024/01/01", 9),
            Err(Rejection::DateFormat("2024/01/01".to_string()))
        );
        assert_eq!(
            InfractionEntry::parse("01-01-2024", 0),
            Err(Rejection::PointsOutOfRange(0))
        );
        assert_eq!(
            InfractionEntry::parse("01-01-2024", 7),
            Err(Rejection::PointsOutOfRange(7))
        );
        assert_eq!(
            InfractionEntry::parse("01-01-2024", 6),
            Ok(InfractionEntry { offense_date: ymd(2024, 1, 1), points: 6 })
        );
    }

    #[test]
    fn test_threshold_by_age() {
        let policy = SuspensionPolicy::default();
        assert_eq!(policy.threshold_for(18), 6);
        assert_eq!(policy.threshold_for(20), 6);
        assert_eq!(policy.threshold_for(21), 12);
        assert_eq!(policy.threshold_for(-1), 6);
    }

    #[test]
    fn test_same_day_offenses_are_both_kept() {
        let policy = SuspensionPolicy::default();
        let born = ymd(1990, 1, 1);
        let mut ledger = InfractionLedger::new();

        ledger.accrue(entry("01-03-2024", 6), born, &policy);
        let suspended = ledger.accrue(entry("01-03-2024", 6), born, &policy);
        assert!(!suspended, "12 is not greater than 12");

        let suspended = ledger.accrue(entry("01-03-2024", 1), born, &policy);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.points_in_window(ymd(2024, 3, 1), 2), 13);
        assert!(suspended);
    }

    #[test]
    fn test_equal_to_threshold_is_not_suspended() {
        let policy = SuspensionPolicy::default();
        let mut ledger = InfractionLedger::new();
        let born = ymd(2005, 1, 1);

        ledger.accrue(entry("01-02-2024", 3), born, &policy);
        ledger.accrue(entry("01-03-2024", 3), born, &policy);
        assert!(!ledger.is_suspended());
    }

    #[test]
    fn test_window_boundaries() {
        let mut ledger = InfractionLedger::new();
        let policy = SuspensionPolicy::default();
        let born = ymd(1980, 1, 1);

        ledger.accrue(entry("31-05-2022", 1), born, &policy); // 2 years + 1 day before
        ledger.accrue(entry("01-06-2022", 2), born, &policy); // exactly 2 years before
        ledger.accrue(entry("02-06-2022", 4), born, &policy); // 2 years - 1 day before
        ledger.accrue(entry("01-06-2024", 1), born, &policy);

        assert_eq!(ledger.points_in_window(ymd(2024, 6, 1), 2), 7);
    }

    #[test]
    fn test_window_ignores_entries_after_reference() {
        let mut ledger = InfractionLedger::new();
        let policy = SuspensionPolicy::default();
        let born = ymd(1980, 1, 1);

        ledger.accrue(entry("01-06-2024", 6), born, &policy);
        ledger.accrue(entry("01-07-2024", 6), born, &policy);
        assert!(!ledger.is_suspended());

        // Older offense recorded late: its window ends on its own date
        let suspended = ledger.accrue(entry("01-01-2024", 1), born, &policy);
        assert!(!suspended);
        assert_eq!(ledger.points_in_window(ymd(2024, 1, 1), 2), 1);
    }

    #[test]
    fn test_suspension_is_not_sticky() {
        let mut ledger = InfractionLedger::new();
        let policy = SuspensionPolicy::default();
        let born = ymd(1980, 1, 1);

        ledger.accrue(entry("01-01-2020", 6), born, &policy);
        ledger.accrue(entry("02-01-2020", 6), born, &policy);
        assert!(ledger.accrue(entry("03-01-2020", 1), born, &policy));

        // Three years later the old points fall out of the window
        assert!(!ledger.accrue(entry("03-01-2023", 1), born, &policy));
        assert_eq!(ledger.total_points(), 14);
    }

    #[test]
    fn test_latest_offense_is_last_appended() {
        let mut ledger = InfractionLedger::new();
        let policy = SuspensionPolicy::default();
        let born = ymd(1980, 1, 1);

        assert!(ledger.latest_offense().is_none());
        ledger.accrue(entry("01-06-2024", 2), born, &policy);
        ledger.accrue(entry("01-01-2024", 3), born, &policy);
        assert_eq!(ledger.latest_offense().map(|e| e.points()), Some(3));
    }

    #[test]
    fn test_ledger_serializes_entries_and_flag() {
        let policy = SuspensionPolicy::default();
        let mut ledger = InfractionLedger::new();
        ledger.accrue(entry("01-03-2024", 4), ymd(1990, 1, 1), &policy);

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["suspended"], false);
        assert_eq!(json["entries"][0]["points"], 4);
        assert_eq!(json["entries"][0]["offense_date"], "2024-03-01");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(AccrualOutcome::Success.to_string(), "Success");
        assert_eq!(
            AccrualOutcome::from(Err::<(), _>(Rejection::NotRegistered)),
            AccrualOutcome::Failure
        );
        assert!(AccrualOutcome::from(Ok::<_, Rejection>(())).is_success());
    }
}
