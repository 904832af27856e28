use serde::{Deserialize, Serialize};

use crate::models::analytics::DateRange;

/// One row of the weekly attendance sheet. `employee_name` is free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub employee_name: String,
    pub present_days: f64,
}

impl AttendanceRecord {
    pub fn new(employee_name: impl Into<String>, present_days: f64) -> Self {
        Self {
            employee_name: employee_name.into(),
            present_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_working_days: u32,
    /// Rounded to one decimal place.
    pub present_days: f64,
    pub attendance_percentage: u32,
    pub range: DateRange,
}
