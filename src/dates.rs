//! Date and rating-period arithmetic.
//!
//! All dates on an evaluation are 8-digit `YYYYMMDD` strings. Parsing is
//! strict: wrong length, non-digits, and calendar-invalid dates (20240231)
//! all yield `None`, and the callers degrade to a validation finding rather
//! than an error.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Average days per month used for rated-month arithmetic.
const DAYS_PER_MONTH: f64 = 30.44;

/// Days after the period start at which initial counseling is due.
const INITIAL_COUNSELING_DAYS: i64 = 14;

/// Generated counseling schedule for a rating period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounselingSchedule {
    /// Initial counseling date, YYYYMMDD; empty when the start date is invalid
    pub initial: String,
    /// Quarterly counseling dates, YYYYMMDD each
    pub quarterly: Vec<String>,
}

/// Parse a strict YYYYMMDD date string.
pub fn parse_yyyymmdd(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date back to YYYYMMDD.
pub fn format_yyyymmdd(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Format YYYYMMDD as e.g. "15 Jan 2024". Unparsable input is echoed back.
pub fn format_readable(s: &str) -> String {
    match parse_yyyymmdd(s) {
        Some(d) => format!("{} {} {}", d.day(), d.format("%b"), d.year()),
        None => s.to_string(),
    }
}

/// Rated months between two YYYYMMDD dates: day difference divided by 30.44,
/// rounded to the nearest whole month. Negative when `thru` precedes `from`.
/// Returns 0 if either date fails to parse.
pub fn rated_months(from_date: &str, thru_date: &str) -> i64 {
    let (from, thru) = match (parse_yyyymmdd(from_date), parse_yyyymmdd(thru_date)) {
        (Some(f), Some(t)) => (f, t),
        _ => return 0,
    };
    let days = (thru - from).num_days() as f64;
    (days / DAYS_PER_MONTH).round() as i64
}

/// Add whole months with end-of-month clamping.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}

/// Generate the counseling schedule for a rating period.
///
/// Initial counseling is due 14 days after the start date. Quarterly
/// counselings fall every 3 months for `period_months / 3` occurrences.
/// For periods shorter than 12 months the last computed quarterly date is
/// dropped so no counseling is scheduled past a shortened period. The drop
/// applies to every period under 12 months, including a 9-month period
/// whose final date would still land in range.
pub fn generate_counseling_dates(start_date: &str, period_months: i64) -> CounselingSchedule {
    let start = match parse_yyyymmdd(start_date) {
        Some(d) => d,
        None => return CounselingSchedule::default(),
    };

    let initial = format_yyyymmdd(start + Duration::days(INITIAL_COUNSELING_DAYS));

    let num_quarters = period_months.max(0) / 3;
    let mut quarterly: Vec<String> = (1..=num_quarters)
        .map(|q| format_yyyymmdd(add_months(start, (q * 3) as u32)))
        .collect();

    if !quarterly.is_empty() && period_months < 12 {
        quarterly.pop();
    }

    CounselingSchedule { initial, quarterly }
}

/// Whether `date` falls inside `[from, thru]`, comparing the raw 8-digit
/// values numerically. Unparsable input is never within the period.
pub fn is_within_period(date: &str, from_date: &str, thru_date: &str) -> bool {
    let (Ok(d), Ok(f), Ok(t)) = (
        date.parse::<u64>(),
        from_date.parse::<u64>(),
        thru_date.parse::<u64>(),
    ) else {
        return false;
    };
    d >= f && d <= t
}
