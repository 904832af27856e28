use std::sync::Arc;

use chrono::NaiveDate;
use misboard_lib::models::analytics::{FeedSnapshot, KpiMetric, ReportPeriod};
use misboard_lib::models::attendance::AttendanceRecord;
use misboard_lib::models::task::TaskRecord;
use misboard_lib::services::analytics_service::AnalyticsService;
use misboard_lib::services::attendance_service::AttendanceService;
use misboard_lib::services::calendar_service::{CalendarService, HolidaySet};
use misboard_lib::services::directory_service::build_directory;
use misboard_lib::services::history_service::HistoryService;
use misboard_lib::services::kpi_service::{compute_mis_stats, work_not_done, work_not_done_on_time};
use misboard_lib::services::team_summary_service::TeamSummaryService;

const EMAIL: &str = "sahil@bonhoeffer.test";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn task(id: &str, planned: Option<NaiveDate>, actual: Option<NaiveDate>) -> TaskRecord {
    TaskRecord {
        task_id: id.to_string(),
        description: format!("Checklist item {id}"),
        step_code: "CL".to_string(),
        system_type: "Checklist".to_string(),
        status: "Pending".to_string(),
        form_link: format!("https://forms.test/{id}"),
        employee_name: "Sahil Kumar".to_string(),
        employee_email: EMAIL.to_string(),
        planned_date: planned,
        actual_date: actual,
        avatar_url: Some("https://img.test/sahil.png".to_string()),
    }
}

fn snapshot() -> FeedSnapshot {
    FeedSnapshot {
        tasks: vec![
            // Last week relative to 2025-03-12 is Mon 03-03 .. Fri 03-07.
            task("A", Some(date(2025, 3, 3)), Some(date(2025, 3, 3))),
            task("B", Some(date(2025, 3, 5)), Some(date(2025, 3, 4))),
            task("C", Some(date(2025, 3, 4)), Some(date(2025, 3, 10))),
            task("D", Some(date(2025, 3, 7)), None),
            // Saturday of last week falls outside the Monday-Friday range.
            task("E", Some(date(2025, 3, 8)), None),
            task("F", None, None),
            task("G", Some(date(2025, 2, 26)), None),
        ],
        attendance: Vec::new(),
    }
}

#[test]
fn last_week_scorecard_matches_hand_computed_values() {
    let service = AnalyticsService::new(Arc::new(CalendarService::default()));
    let as_of = date(2025, 3, 12);
    let snapshot = snapshot();

    let dashboard = service.dashboard(&snapshot, Some(EMAIL), as_of);
    let mis = dashboard.mis.expect("mis stats");

    assert_eq!(
        mis.plan_vs_actual,
        KpiMetric {
            base: 4,
            met: 3,
            performance: -25.0
        }
    );
    assert_eq!(
        mis.on_time,
        KpiMetric {
            base: 3,
            met: 2,
            performance: -33.33
        }
    );

    let not_done: Vec<&str> = dashboard
        .work_not_done
        .iter()
        .map(|t| t.task_id.as_str())
        .collect();
    assert_eq!(not_done, vec!["D"]);

    let late: Vec<&str> = dashboard
        .work_not_done_on_time
        .iter()
        .map(|t| t.task_id.as_str())
        .collect();
    assert_eq!(late, vec!["C"]);

    // D (03-07), E (03-08), G (02-26) overdue; F undated counts as pending only.
    assert_eq!(dashboard.counts.overdue, 3);
    assert_eq!(dashboard.counts.due_today, 0);
    assert_eq!(dashboard.counts.pending_total, 4);
}

#[test]
fn last_to_last_week_report_uses_previous_monday_to_friday() {
    let service = AnalyticsService::new(Arc::new(CalendarService::default()));
    let report = service.employee_report(
        &snapshot(),
        Some(EMAIL),
        ReportPeriod::LastToLastWeek,
        date(2025, 3, 12),
    );

    let range = report.range.expect("range");
    assert_eq!(range.start_date, date(2025, 2, 24));
    assert_eq!(range.end_date, date(2025, 2, 28));

    let mis = report.mis.expect("mis");
    assert_eq!(mis.plan_vs_actual.base, 1);
    assert_eq!(mis.plan_vs_actual.performance, -100.0);
    assert_eq!(mis.on_time.base, 0);
    assert_eq!(mis.on_time.performance, 0.0);
    assert_eq!(report.title, "for Last to Last Week");
    assert_eq!(report.employee.expect("employee").name, "Sahil Kumar");
}

#[test]
fn yearly_report_and_history_cover_the_same_tasks() {
    let calendar = CalendarService::with_holidays(HolidaySet::default());
    let service = AnalyticsService::new(Arc::new(calendar));
    let report = service.employee_report(
        &snapshot(),
        Some(EMAIL),
        ReportPeriod::Year { year: 2025 },
        date(2025, 3, 12),
    );

    let mis = report.mis.expect("mis");
    assert_eq!(mis.plan_vs_actual.base, 6);
    assert_eq!(mis.plan_vs_actual.met, 3);
    assert_eq!(mis.plan_vs_actual.performance, -50.0);

    let march = report.history.last().expect("march point");
    assert_eq!(march.period, "Mar '25");
    assert_eq!(march.completion_rate, 60);
    assert_eq!(march.on_time_rate, 67);

    let february = &report.history[10];
    assert_eq!(february.period, "Feb '25");
    assert_eq!(february.completion_rate, 0);
    assert_eq!(february.on_time_rate, 0);
}

#[test]
fn repeated_invocations_are_identical() {
    let tasks = snapshot().tasks;
    let as_of = date(2025, 3, 12);
    let calendar = Arc::new(CalendarService::default());
    let range = calendar.week_range(as_of, 1);

    let first = compute_mis_stats(&tasks, Some(EMAIL), range);
    let second = compute_mis_stats(&tasks, Some(EMAIL), range);
    assert_eq!(first, second);
    let (a, b) = (first.expect("stats"), second.expect("stats"));
    assert_eq!(
        a.on_time.performance.to_bits(),
        b.on_time.performance.to_bits()
    );

    assert_eq!(
        work_not_done(&tasks, Some(EMAIL), range),
        work_not_done(&tasks, Some(EMAIL), range)
    );
    assert_eq!(
        work_not_done_on_time(&tasks, Some(EMAIL), range),
        work_not_done_on_time(&tasks, Some(EMAIL), range)
    );

    let directory = build_directory(&tasks);
    let records = vec![AttendanceRecord::new("sahil", 4.0)];
    let attendance = AttendanceService::new(Arc::clone(&calendar));
    let first = attendance.compute_attendance(&records, Some(EMAIL), &directory, range);
    assert!(first.is_some());
    assert_eq!(
        first,
        attendance.compute_attendance(&records, Some(EMAIL), &directory, range)
    );

    let history = HistoryService::new(Arc::clone(&calendar));
    let trend = history.historical_performance(&tasks, Some(EMAIL), as_of);
    assert_eq!(trend.len(), 12);
    assert_eq!(
        trend,
        history.historical_performance(&tasks, Some(EMAIL), as_of)
    );

    let team = TeamSummaryService::new(calendar);
    let summary = team.summarize(&tasks, &directory, as_of);
    assert_eq!(summary.needs_attention.len(), 1);
    assert_eq!(summary, team.summarize(&tasks, &directory, as_of));
}
