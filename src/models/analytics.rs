use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::attendance::{AttendanceRecord, AttendanceStats};
use crate::models::task::{Employee, TaskRecord};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|value| self.contains(value))
    }

    /// Every calendar day in the range, oldest first. Empty when start > end.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetric {
    pub base: usize,
    pub met: usize,
    /// Deviation from a 100% target: 0 when fully met, negative otherwise.
    pub performance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MisStats {
    pub plan_vs_actual: KpiMetric,
    pub on_time: KpiMetric,
    pub range: DateRange,
}

impl MisStats {
    pub fn is_on_track(&self) -> bool {
        self.plan_vs_actual.performance >= 0.0 && self.on_time.performance >= 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KpiCounts {
    pub overdue: usize,
    pub due_today: usize,
    pub pending_total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataPoint {
    pub period: String,
    pub completion_rate: u32,
    pub on_time_rate: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformanceSummary {
    pub needs_attention: Vec<Employee>,
    pub on_track: Vec<Employee>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportPeriod {
    LastWeek,
    LastToLastWeek,
    /// `month` is 1-based.
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

impl ReportPeriod {
    pub fn is_weekly(&self) -> bool {
        matches!(self, ReportPeriod::LastWeek | ReportPeriod::LastToLastWeek)
    }

    pub fn weeks_back(&self) -> Option<u32> {
        match self {
            ReportPeriod::LastWeek => Some(1),
            ReportPeriod::LastToLastWeek => Some(2),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReportPeriod::LastWeek => "Last Week".to_string(),
            ReportPeriod::LastToLastWeek => "Last to Last Week".to_string(),
            ReportPeriod::Month { year, month } => match month_name(*month) {
                Some(name) => format!("{name} {year}"),
                None => format!("{month}/{year}"),
            },
            ReportPeriod::Year { year } => format!("Full Year {year}"),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ReportPeriod::Year { year } => format!("for {year}"),
            other => format!("for {}", other.label()),
        }
    }

    /// Stable key used by selectors: `last-week`, `last-to-last-week`, `2025-03`, `2025`.
    pub fn key(&self) -> String {
        match self {
            ReportPeriod::LastWeek => "last-week".to_string(),
            ReportPeriod::LastToLastWeek => "last-to-last-week".to_string(),
            ReportPeriod::Month { year, month } => format!("{year}-{month:02}"),
            ReportPeriod::Year { year } => year.to_string(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "last-week" => Some(ReportPeriod::LastWeek),
            "last-to-last-week" => Some(ReportPeriod::LastToLastWeek),
            other => match other.split_once('-') {
                Some((year, month)) => {
                    let year = year.parse().ok()?;
                    let month: u32 = month.parse().ok()?;
                    month_name(month)?;
                    Some(ReportPeriod::Month { year, month })
                }
                None => other.parse().ok().map(|year| ReportPeriod::Year { year }),
            },
        }
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodOption {
    pub period: ReportPeriod,
    pub key: String,
    pub label: String,
}

impl From<ReportPeriod> for PeriodOption {
    fn from(period: ReportPeriod) -> Self {
        Self {
            key: period.key(),
            label: period.label(),
            period,
        }
    }
}

/// Full snapshot of both feeds for one refresh cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub employee: Option<Employee>,
    pub period: ReportPeriod,
    pub title: String,
    pub range: Option<DateRange>,
    pub mis: Option<MisStats>,
    pub attendance: Option<AttendanceStats>,
    #[serde(default)]
    pub history: Vec<HistoricalDataPoint>,
    #[serde(default)]
    pub work_not_done: Vec<TaskRecord>,
    #[serde(default)]
    pub work_not_done_on_time: Vec<TaskRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDashboard {
    pub employee: Option<Employee>,
    pub range: DateRange,
    pub mis: Option<MisStats>,
    pub counts: KpiCounts,
    pub attendance: Option<AttendanceStats>,
    #[serde(default)]
    pub work_not_done: Vec<TaskRecord>,
    #[serde(default)]
    pub work_not_done_on_time: Vec<TaskRecord>,
}
