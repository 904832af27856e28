use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::analytics::{
    EmployeeReport, FeedSnapshot, PersonalDashboard, ReportPeriod, TeamPerformanceSummary,
};
use crate::services::attendance_service::AttendanceService;
use crate::services::calendar_service::CalendarService;
use crate::services::directory_service::{build_directory, find_by_email};
use crate::services::history_service::HistoryService;
use crate::services::kpi_service::{
    compute_mis_stats, kpi_counts, pending_tasks, present_email, work_not_done,
    work_not_done_on_time,
};
use crate::services::team_summary_service::TeamSummaryService;

/// Entry point for one refresh cycle: every method is a pure function of the
/// snapshot, the requested employee/period and the explicit `as_of` date.
pub struct AnalyticsService {
    calendar: Arc<CalendarService>,
    attendance: AttendanceService,
    history: HistoryService,
    team: TeamSummaryService,
}

impl AnalyticsService {
    pub fn new(calendar: Arc<CalendarService>) -> Self {
        Self {
            attendance: AttendanceService::new(Arc::clone(&calendar)),
            history: HistoryService::new(Arc::clone(&calendar)),
            team: TeamSummaryService::new(Arc::clone(&calendar)),
            calendar,
        }
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    /// Scorecard, attendance (weekly periods only), trend and breakdowns for one employee.
    pub fn employee_report(
        &self,
        snapshot: &FeedSnapshot,
        email: Option<&str>,
        period: ReportPeriod,
        as_of: NaiveDate,
    ) -> EmployeeReport {
        let email = present_email(email);
        let directory = build_directory(&snapshot.tasks);
        let employee = email.and_then(|value| find_by_email(&directory, value).cloned());
        let range = self.calendar.resolve_period(period, as_of);

        let mut report = EmployeeReport {
            employee,
            period,
            title: period.title(),
            range,
            mis: None,
            attendance: None,
            history: self
                .history
                .historical_performance(&snapshot.tasks, email, as_of),
            work_not_done: Vec::new(),
            work_not_done_on_time: Vec::new(),
        };

        if let (Some(email), Some(range)) = (email, range) {
            report.mis = compute_mis_stats(&snapshot.tasks, Some(email), range);
            report.work_not_done = work_not_done(&snapshot.tasks, Some(email), range);
            report.work_not_done_on_time =
                work_not_done_on_time(&snapshot.tasks, Some(email), range);
            if period.is_weekly() {
                report.attendance = self.attendance.compute_attendance(
                    &snapshot.attendance,
                    Some(email),
                    &directory,
                    range,
                );
            }
        }

        debug!(
            target: "app::analytics",
            period = %period.key(),
            has_employee = report.employee.is_some(),
            "built employee report"
        );
        report
    }

    /// Last-week view for the signed-in employee, with open-task counts as of `as_of`.
    pub fn dashboard(
        &self,
        snapshot: &FeedSnapshot,
        email: Option<&str>,
        as_of: NaiveDate,
    ) -> PersonalDashboard {
        let email = present_email(email);
        let range = self.calendar.week_range(as_of, 1);
        let directory = build_directory(&snapshot.tasks);
        let employee = email.and_then(|value| find_by_email(&directory, value).cloned());
        let pending = pending_tasks(&snapshot.tasks);

        let attendance = email.and_then(|value| {
            self.attendance
                .compute_attendance(&snapshot.attendance, Some(value), &directory, range)
                .or_else(|| {
                    employee
                        .as_ref()
                        .map(|_| self.attendance.stats_for(0.0, range))
                })
        });

        PersonalDashboard {
            range,
            mis: compute_mis_stats(&snapshot.tasks, email, range),
            counts: kpi_counts(&pending, email, as_of),
            attendance,
            work_not_done: work_not_done(&snapshot.tasks, email, range),
            work_not_done_on_time: work_not_done_on_time(&snapshot.tasks, email, range),
            employee,
        }
    }

    pub fn team_summary(&self, snapshot: &FeedSnapshot, as_of: NaiveDate) -> TeamPerformanceSummary {
        let directory = build_directory(&snapshot.tasks);
        self.team.summarize(&snapshot.tasks, &directory, as_of)
    }
}
