use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static SHEET_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid sheet date regex"));
static GVIZ_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Date\((\d+),(\d+),(\d+)").expect("valid gviz date regex"));
static US_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})").expect("valid datetime regex"));

/// Parses a `DD/MM/YYYY` cell. Anything else, including impossible dates, is absent.
pub fn parse_sheet_date(value: &str) -> Option<NaiveDate> {
    let captures = SHEET_DATE.captures(value.trim())?;
    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses either `Date(Y,M,D,...)` (zero-based month) or a `MM/DD/YYYY ...`
/// timestamp, keeping only the date part.
pub fn parse_sheet_datetime(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }

    if let Some(captures) = GVIZ_DATE.captures(value) {
        let year: i32 = captures[1].parse().ok()?;
        let month0: u32 = captures[2].parse().ok()?;
        let day: u32 = captures[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month0 + 1, day);
    }

    let captures = US_DATE_PREFIX.captures(value)?;
    let month: u32 = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `DD/MM`, as shown next to period headings.
pub fn format_date_short(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// Whole days `actual` landed after `planned`; early or same-day is zero.
pub fn delay_in_days(planned: Option<NaiveDate>, actual: Option<NaiveDate>) -> Option<i64> {
    let (planned, actual) = (planned?, actual?);
    if actual <= planned {
        return Some(0);
    }
    Some((actual - planned).num_days())
}
