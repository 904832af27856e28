use chrono::NaiveDate;
use misboard_lib::error::AppError;
use misboard_lib::services::directory_service::build_directory;
use misboard_lib::services::feed_parser::{decode_attendance_feed, decode_task_feed};

const TASK_FEED: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"ok","sig":"1","table":{"cols":[],"rows":[
{"c":[null,{"v":"Task Id"},{"v":"Task"},{"v":"Step"},{"v":"Planned"},{"v":"Actual"},null,{"v":"Link"},null,{"v":"System"},null,null,null,{"v":"Status"},{"v":"Name"},{"v":"Email"},{"v":"Image"}]},
{"c":[null,{"v":"T-1"},{"v":"Dispatch report"},{"v":"S1"},{"v":45719,"f":"03/03/2025"},{"v":45719,"f":"03/03/2025"},null,{"v":"https://forms.test/1"},null,{"v":"Checklist"},null,null,null,{"v":"Done"},{"v":"Priya N"},{"v":"priya@x.com"},{"v":"https://img.test/p.png"}]},
{"c":[null,{"v":"T-2"},{"v":"Stock audit"},{"v":"S2"},{"v":"05/03/2025"},{"v":""},null,null,null,{"v":"Delegation"},null,null,null,{"v":"Pending"},{"v":"Amit"},{"v":"amit@x.com"},null]},
{"c":[null,{"v":"T-3"},{"v":"Bad date"},null,{"v":"2025-03-05"},null]},
{"c":[null,{"v":""},{"v":""}]},
null
]}});"#;

const ATTENDANCE_FEED: &str = r#"google.visualization.Query.setResponse({"status":"ok","table":{"rows":[
{"c":[{"v":4,"f":"4"},{"v":"priya"}]},
{"c":[{"v":3.5},{"v":"Amit Kumar"}]},
{"c":[{"v":"n/a"},{"v":"Nobody"}]},
{"c":[{"v":2},{"v":""}]},
{"c":[null,{"v":"Missing Count"}]}
]}});"#;

#[test]
fn task_feed_maps_columns_and_drops_blank_rows() {
    let tasks = decode_task_feed(TASK_FEED).expect("decode tasks");
    assert_eq!(tasks.len(), 3);

    let first = &tasks[0];
    assert_eq!(first.task_id, "T-1");
    assert_eq!(first.description, "Dispatch report");
    assert_eq!(first.step_code, "S1");
    assert_eq!(first.planned_date, NaiveDate::from_ymd_opt(2025, 3, 3));
    assert_eq!(first.actual_date, NaiveDate::from_ymd_opt(2025, 3, 3));
    assert_eq!(first.form_link, "https://forms.test/1");
    assert_eq!(first.system_type, "Checklist");
    assert_eq!(first.status, "Done");
    assert_eq!(first.employee_name, "Priya N");
    assert_eq!(first.employee_email, "priya@x.com");
    assert_eq!(first.avatar_url.as_deref(), Some("https://img.test/p.png"));

    let second = &tasks[1];
    assert_eq!(second.planned_date, NaiveDate::from_ymd_opt(2025, 3, 5));
    assert_eq!(second.actual_date, None);
    assert_eq!(second.avatar_url, None);

    let third = &tasks[2];
    assert_eq!(third.planned_date, None);
    assert_eq!(third.employee_email, "");

    let directory = build_directory(&tasks);
    let names: Vec<&str> = directory.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Amit", "Priya N"]);
}

#[test]
fn attendance_feed_keeps_only_named_numeric_rows() {
    let records = decode_attendance_feed(ATTENDANCE_FEED).expect("decode attendance");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].employee_name, "priya");
    assert_eq!(records[0].present_days, 4.0);
    assert_eq!(records[1].employee_name, "Amit Kumar");
    assert_eq!(records[1].present_days, 3.5);
}

#[test]
fn error_status_is_rejected() {
    let err = decode_task_feed(r#"cb({"status":"error","errors":[]});"#).expect_err("should fail");
    assert!(matches!(err, AppError::Feed { .. }));
}
