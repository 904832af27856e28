use std::sync::Arc;

use chrono::NaiveDate;
use misboard_lib::models::analytics::{DateRange, FeedSnapshot, ReportPeriod};
use misboard_lib::models::attendance::AttendanceRecord;
use misboard_lib::models::task::{Employee, TaskRecord};
use misboard_lib::services::analytics_service::AnalyticsService;
use misboard_lib::services::attendance_service::AttendanceService;
use misboard_lib::services::calendar_service::CalendarService;
use misboard_lib::services::settings_service::SettingsService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn task(email: &str, name: &str) -> TaskRecord {
    TaskRecord {
        task_id: format!("{email}-1"),
        description: "Stock audit".to_string(),
        step_code: String::new(),
        system_type: String::new(),
        status: String::new(),
        form_link: String::new(),
        employee_name: name.to_string(),
        employee_email: email.to_string(),
        planned_date: Some(date(2025, 3, 4)),
        actual_date: None,
        avatar_url: None,
    }
}

#[test]
fn free_text_name_reconciles_to_directory_entry() {
    let service = AttendanceService::new(Arc::new(CalendarService::default()));
    let directory = vec![Employee::new("sahil@x.com", "Sahil Kumar")];
    let records = vec![AttendanceRecord::new("sahil kumar", 4.0)];
    let week = DateRange::new(date(2025, 3, 3), date(2025, 3, 7));

    let stats = service
        .compute_attendance(&records, Some("sahil@x.com"), &directory, week)
        .expect("attendance");

    assert_eq!(stats.total_working_days, 5);
    assert_eq!(stats.present_days, 4.0);
    assert_eq!(stats.attendance_percentage, 80);
}

#[test]
fn weekly_report_uses_bundled_holidays_for_denominator() {
    let settings = SettingsService::bundled().expect("bundled settings");
    let service = AnalyticsService::new(Arc::new(settings.calendar()));

    let snapshot = FeedSnapshot {
        tasks: vec![
            task("sahil@x.com", "Sahil Kumar"),
            task("sharma@x.com", "Sahil Sharma"),
            task("priya@x.com", "Priya N"),
        ],
        attendance: vec![
            AttendanceRecord::new("Sahil", 5.0),
            AttendanceRecord::new("priya", 3.0),
            AttendanceRecord::new("Sahil Sharma", 2.5),
        ],
    };

    // Last week relative to 2025-03-19 is 03-10..03-14; Holi (03-14) is a holiday.
    let as_of = date(2025, 3, 19);
    let priya = service.employee_report(&snapshot, Some("priya@x.com"), ReportPeriod::LastWeek, as_of);
    let attendance = priya.attendance.expect("attendance");
    assert_eq!(attendance.total_working_days, 4);
    assert_eq!(attendance.present_days, 3.0);
    assert_eq!(attendance.attendance_percentage, 75);

    let sharma = service.employee_report(&snapshot, Some("sharma@x.com"), ReportPeriod::LastWeek, as_of);
    let attendance = sharma.attendance.expect("attendance");
    assert_eq!(attendance.present_days, 2.5);
    assert_eq!(attendance.attendance_percentage, 63);

    // "Sahil" is ambiguous, so Sahil Kumar has no reconciled row.
    let kumar = service.employee_report(&snapshot, Some("sahil@x.com"), ReportPeriod::LastWeek, as_of);
    let attendance = kumar.attendance.expect("attendance");
    assert_eq!(attendance.present_days, 0.0);
    assert_eq!(attendance.attendance_percentage, 0);
}

#[test]
fn unknown_employee_gets_no_attendance() {
    let service = AnalyticsService::new(Arc::new(CalendarService::default()));
    let snapshot = FeedSnapshot {
        tasks: vec![task("priya@x.com", "Priya N")],
        attendance: vec![AttendanceRecord::new("Priya N", 5.0)],
    };
    let dashboard = service.dashboard(&snapshot, Some("ghost@x.com"), date(2025, 3, 19));
    assert!(dashboard.attendance.is_none());
    assert!(dashboard.employee.is_none());
}
