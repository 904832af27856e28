use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::task::TaskRecord;
use crate::utils::date::parse_sheet_date;

const TASK_FEED: &str = "tasks";
const ATTENDANCE_FEED: &str = "attendance";

// Column positions in the master task sheet (B, C, D, E, F, H, J, N, O, P, Q).
const COL_TASK_ID: usize = 1;
const COL_DESCRIPTION: usize = 2;
const COL_STEP_CODE: usize = 3;
const COL_PLANNED: usize = 4;
const COL_ACTUAL: usize = 5;
const COL_FORM_LINK: usize = 7;
const COL_SYSTEM_TYPE: usize = 9;
const COL_STATUS: usize = 13;
const COL_EMPLOYEE_NAME: usize = 14;
const COL_EMPLOYEE_EMAIL: usize = 15;
const COL_AVATAR: usize = 16;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid number regex")
});

#[derive(Debug, Deserialize)]
struct SheetResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    table: Option<SheetTable>,
}

#[derive(Debug, Default, Deserialize)]
struct SheetTable {
    #[serde(default)]
    rows: Vec<Option<SheetRow>>,
}

#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(default)]
    c: Option<Vec<Option<SheetCell>>>,
}

#[derive(Debug, Deserialize)]
struct SheetCell {
    #[serde(default)]
    v: Option<JsonValue>,
    #[serde(default)]
    f: Option<String>,
}

impl SheetCell {
    /// Formatted text when present, otherwise the raw value rendered as text.
    fn text(&self) -> String {
        if let Some(formatted) = self.f.as_deref().filter(|value| !value.is_empty()) {
            return formatted.to_string();
        }
        match &self.v {
            Some(JsonValue::String(value)) => value.clone(),
            Some(JsonValue::Number(number)) => render_number(number),
            Some(JsonValue::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

fn render_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        _ => number.to_string(),
    }
}

fn cell_text(cells: &[Option<SheetCell>], index: usize) -> String {
    cells
        .get(index)
        .and_then(Option::as_ref)
        .map(SheetCell::text)
        .unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Lenient numeric prefix parse: `"4.5 days"` is 4.5, `"absent"` is nothing.
fn parse_leading_number(value: &str) -> Option<f64> {
    let captures = LEADING_NUMBER.captures(value)?;
    captures[1].parse().ok().filter(|parsed: &f64| parsed.is_finite())
}

/// Strips the JSONP callback around a visualization-query response and
/// returns its table once the status is `ok`.
fn decode_envelope(feed: &'static str, text: &str) -> AppResult<SheetTable> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(AppError::feed(feed, "response contains no JSON object"));
    };
    if end < start {
        return Err(AppError::feed(feed, "response contains no JSON object"));
    }

    let response: SheetResponse = serde_json::from_str(&text[start..=end])?;
    if response.status != "ok" {
        return Err(AppError::feed(
            feed,
            format!("sheet returned status {:?}", response.status),
        ));
    }
    Ok(response.table.unwrap_or_default())
}

pub fn decode_task_feed(text: &str) -> AppResult<Vec<TaskRecord>> {
    let table = decode_envelope(TASK_FEED, text)?;

    let tasks: Vec<TaskRecord> = table
        .rows
        .into_iter()
        .skip(1)
        .filter_map(|row| row.and_then(|row| row.c))
        .map(|cells| TaskRecord {
            task_id: cell_text(&cells, COL_TASK_ID),
            description: cell_text(&cells, COL_DESCRIPTION),
            step_code: cell_text(&cells, COL_STEP_CODE),
            planned_date: parse_sheet_date(&cell_text(&cells, COL_PLANNED)),
            actual_date: parse_sheet_date(&cell_text(&cells, COL_ACTUAL)),
            form_link: cell_text(&cells, COL_FORM_LINK),
            system_type: cell_text(&cells, COL_SYSTEM_TYPE),
            status: cell_text(&cells, COL_STATUS),
            employee_name: cell_text(&cells, COL_EMPLOYEE_NAME),
            employee_email: cell_text(&cells, COL_EMPLOYEE_EMAIL),
            avatar_url: non_empty(cell_text(&cells, COL_AVATAR)),
        })
        .filter(|task| !task.task_id.is_empty() || !task.description.is_empty())
        .collect();

    debug!(target: "app::feed", feed = TASK_FEED, rows = tasks.len(), "decoded feed");
    Ok(tasks)
}

pub fn decode_attendance_feed(text: &str) -> AppResult<Vec<AttendanceRecord>> {
    let table = decode_envelope(ATTENDANCE_FEED, text)?;

    let records: Vec<AttendanceRecord> = table
        .rows
        .into_iter()
        .filter_map(|row| row.and_then(|row| row.c))
        .filter_map(|cells| {
            let count = cells.first()?.as_ref()?.text();
            let name = cells.get(1)?.as_ref()?.text();
            if name.is_empty() || count.is_empty() {
                return None;
            }
            let present_days = parse_leading_number(&count)?;
            Some(AttendanceRecord {
                employee_name: name,
                present_days,
            })
        })
        .collect();

    debug!(target: "app::feed", feed = ATTENDANCE_FEED, rows = records.len(), "decoded feed");
    Ok(records)
}
