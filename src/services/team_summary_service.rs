use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::analytics::TeamPerformanceSummary;
use crate::models::task::{Employee, TaskRecord};
use crate::services::calendar_service::CalendarService;
use crate::services::kpi_service::compute_mis_stats;

pub struct TeamSummaryService {
    calendar: Arc<CalendarService>,
}

impl TeamSummaryService {
    pub fn new(calendar: Arc<CalendarService>) -> Self {
        Self { calendar }
    }

    /// Buckets every employee with planned work last week by whether both KPIs were met.
    /// Employees with nothing planned appear in neither list. Directory order is preserved.
    pub fn summarize(
        &self,
        tasks: &[TaskRecord],
        directory: &[Employee],
        as_of: NaiveDate,
    ) -> TeamPerformanceSummary {
        let last_week = self.calendar.week_range(as_of, 1);
        let mut summary = TeamPerformanceSummary::default();

        for employee in directory {
            let Some(stats) = compute_mis_stats(tasks, Some(&employee.email), last_week) else {
                continue;
            };
            if stats.plan_vs_actual.base == 0 {
                continue;
            }

            if stats.is_on_track() {
                summary.on_track.push(employee.clone());
            } else {
                summary.needs_attention.push(employee.clone());
            }
        }

        debug!(
            target: "app::team",
            start = %last_week.start_date,
            needs_attention = summary.needs_attention.len(),
            on_track = summary.on_track.len(),
            "classified team"
        );
        summary
    }
}
