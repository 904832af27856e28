use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::analytics::HistoricalDataPoint;
use crate::models::task::TaskRecord;
use crate::services::calendar_service::CalendarService;
use crate::services::kpi_service::{planned_in_range, present_email};
use crate::utils::rounding::percentage;

pub const HISTORY_MONTHS: u32 = 12;

pub struct HistoryService {
    calendar: Arc<CalendarService>,
}

impl HistoryService {
    pub fn new(calendar: Arc<CalendarService>) -> Self {
        Self { calendar }
    }

    /// Monthly completion and on-time rates for the trailing twelve months, oldest first.
    ///
    /// Empty when the employee owns no tasks at all.
    pub fn historical_performance(
        &self,
        tasks: &[TaskRecord],
        email: Option<&str>,
        as_of: NaiveDate,
    ) -> Vec<HistoricalDataPoint> {
        let Some(email) = present_email(email) else {
            return Vec::new();
        };
        if !tasks.iter().any(|task| task.belongs_to(email)) {
            return Vec::new();
        }

        let points: Vec<HistoricalDataPoint> = self
            .calendar
            .trailing_month_starts(as_of, HISTORY_MONTHS)
            .into_iter()
            .filter_map(|first| {
                let range = self.calendar.month_range(first.year(), first.month())?;
                let mut planned = 0usize;
                let mut completed = 0usize;
                let mut on_time = 0usize;
                for task in planned_in_range(tasks, email, &range) {
                    planned += 1;
                    if task.is_done() {
                        completed += 1;
                        if task.is_on_time() {
                            on_time += 1;
                        }
                    }
                }

                Some(HistoricalDataPoint {
                    period: first.format("%b '%y").to_string(),
                    completion_rate: percentage(completed as f64, planned as f64),
                    // Denominator is completed work, not planned work.
                    on_time_rate: percentage(on_time as f64, completed as f64),
                })
            })
            .collect();

        debug!(target: "app::history", email, points = points.len(), "built history");
        points
    }
}
