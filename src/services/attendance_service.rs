use std::sync::Arc;

use tracing::debug;

use crate::models::analytics::DateRange;
use crate::models::attendance::{AttendanceRecord, AttendanceStats};
use crate::models::task::Employee;
use crate::services::calendar_service::CalendarService;
use crate::services::kpi_service::present_email;
use crate::services::name_reconciler::find_best_match;
use crate::utils::rounding::{percentage, round_to};

pub struct AttendanceService {
    calendar: Arc<CalendarService>,
}

impl AttendanceService {
    pub fn new(calendar: Arc<CalendarService>) -> Self {
        Self { calendar }
    }

    /// Attendance for `email` over `range`.
    ///
    /// Each sheet row is reconciled to the directory by name; the first row
    /// resolving to the target employee supplies `present_days`. An employee
    /// with no matching row is reported as present for zero days.
    pub fn compute_attendance(
        &self,
        records: &[AttendanceRecord],
        email: Option<&str>,
        directory: &[Employee],
        range: DateRange,
    ) -> Option<AttendanceStats> {
        let email = present_email(email)?;
        if directory.is_empty() || records.is_empty() {
            return None;
        }

        let target = directory.iter().find(|employee| employee.has_email(email))?;

        let matched = records.iter().find(|record| {
            find_best_match(&record.employee_name, directory)
                .is_some_and(|resolved| resolved.has_email(&target.email))
        });

        let present_days = matched.map(|record| record.present_days).unwrap_or(0.0);
        if matched.is_none() {
            debug!(
                target: "app::attendance",
                email,
                "no attendance row reconciled to employee"
            );
        }

        Some(self.stats_for(present_days, range))
    }

    /// Stats for a known headcount, used directly when an employee has no sheet row.
    pub fn stats_for(&self, present_days: f64, range: DateRange) -> AttendanceStats {
        let total_working_days = self.calendar.working_days(&range);
        AttendanceStats {
            total_working_days,
            present_days: round_to(present_days, 1),
            attendance_percentage: percentage(present_days, f64::from(total_working_days)),
            range,
        }
    }
}
