use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::delay_in_days;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_id: String,
    pub description: String,
    pub step_code: String,
    pub system_type: String,
    pub status: String,
    pub form_link: String,
    pub employee_name: String,
    pub employee_email: String,
    #[serde(default)]
    pub planned_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl TaskRecord {
    pub fn belongs_to(&self, email: &str) -> bool {
        self.employee_email == email
    }

    pub fn is_done(&self) -> bool {
        self.actual_date.is_some()
    }

    /// Completed no later than planned. Undated or unfinished tasks are never on time.
    pub fn is_on_time(&self) -> bool {
        matches!(
            (self.planned_date, self.actual_date),
            (Some(planned), Some(actual)) if actual <= planned
        )
    }

    pub fn is_late(&self) -> bool {
        matches!(
            (self.planned_date, self.actual_date),
            (Some(planned), Some(actual)) if actual > planned
        )
    }

    pub fn delay_in_days(&self) -> Option<i64> {
        delay_in_days(self.planned_date, self.actual_date)
    }
}

/// Canonical identity, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl Employee {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            avatar_url: String::new(),
        }
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
