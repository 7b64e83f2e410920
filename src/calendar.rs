// 📅 Calendar - Fixed day-month-year dates and whole-year arithmetic
// Every date in the registry travels as "dd-MM-yyyy" text and is parsed here

use chrono::{Datelike, Months, NaiveDate};

/// chrono pattern for the registry's only accepted date layout
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse "dd-MM-yyyy" strictly.
///
/// chrono alone accepts unpadded days/months and years wider than four
/// digits, so the shape is checked first: exactly ten ASCII characters,
/// dashes at index 2 and 5, digits everywhere else. chrono then rejects
/// impossible dates (32nd day, 13th month, 29-02 outside leap years).
/// Years count from 1; there is no year 0000.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

/// Render a date back into the registry layout
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole years elapsed between two dates (negative when `to` precedes `from`).
///
/// `NaiveDate::years_since` returns `None` for an offense dated before the
/// birth date; the age gates need a signed value there instead.
///
/// A year only counts once its anniversary has been reached, so someone
/// born 29-02-2004 is still 17 on 28-02-2022.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    if to < from {
        return -whole_years_between(to, from);
    }

    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Same calendar day `years` earlier; 29-02 falls back to 28-02 in common years
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

// ============================================================================
// TESTS
// ============================================================================
