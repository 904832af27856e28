use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use tracing::trace;

use crate::models::analytics::{DateRange, ReportPeriod};

/// Source of non-working days other than weekends.
pub trait HolidayProvider: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayProvider for HolidaySet {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Range arithmetic and working-day counting over an injected holiday calendar.
#[derive(Clone)]
pub struct CalendarService {
    holidays: Arc<dyn HolidayProvider>,
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new(Arc::new(HolidaySet::default()))
    }
}

impl CalendarService {
    pub fn new(holidays: Arc<dyn HolidayProvider>) -> Self {
        Self { holidays }
    }

    pub fn with_holidays(holidays: HolidaySet) -> Self {
        Self::new(Arc::new(holidays))
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.holidays.is_holiday(date)
    }

    /// Monday-to-Friday week `weeks_back` weeks before the week containing `reference`.
    pub fn week_range(&self, reference: NaiveDate, weeks_back: u32) -> DateRange {
        let offset_to_monday = i64::from(reference.weekday().num_days_from_monday());
        let current_monday = reference - Duration::days(offset_to_monday);
        let start = current_monday - Duration::weeks(i64::from(weeks_back));
        DateRange::new(start, start + Duration::days(4))
    }

    /// First through last day of `month` (1-based). `None` for an invalid month or year.
    pub fn month_range(&self, year: i32, month: u32) -> Option<DateRange> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        month_range_from_first(first)
    }

    pub fn year_range(&self, year: i32) -> Option<DateRange> {
        Some(DateRange::new(
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    }

    pub fn working_days(&self, range: &DateRange) -> u32 {
        let count = range.days().filter(|day| self.is_working_day(*day)).count() as u32;
        trace!(
            target: "app::calendar",
            start = %range.start_date,
            end = %range.end_date,
            count,
            "counted working days"
        );
        count
    }

    pub fn resolve_period(&self, period: ReportPeriod, as_of: NaiveDate) -> Option<DateRange> {
        match period {
            ReportPeriod::LastWeek | ReportPeriod::LastToLastWeek => {
                let weeks_back = period.weeks_back()?;
                Some(self.week_range(as_of, weeks_back))
            }
            ReportPeriod::Month { year, month } => self.month_range(year, month),
            ReportPeriod::Year { year } => self.year_range(year),
        }
    }

    /// First day of each of the `count` calendar months ending with the one containing `as_of`,
    /// oldest first.
    pub fn trailing_month_starts(&self, as_of: NaiveDate, count: u32) -> Vec<NaiveDate> {
        let Some(current) = as_of.with_day(1) else {
            return Vec::new();
        };
        (0..count)
            .rev()
            .filter_map(|back| current.checked_sub_months(Months::new(back)))
            .collect()
    }
}

fn month_range_from_first(first: NaiveDate) -> Option<DateRange> {
    let next = first.checked_add_months(Months::new(1))?;
    Some(DateRange::new(first, next.pred_opt()?))
}
