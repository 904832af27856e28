use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::models::analytics::{PeriodOption, ReportPeriod};
use crate::models::task::{Employee, TaskRecord};

/// Distinct employees seen in the task feed, keyed by email.
///
/// The first row for an email supplies the name and avatar. Rows lacking an
/// email or a name are ignored. Sorted by name, ignoring case.
pub fn build_directory(tasks: &[TaskRecord]) -> Vec<Employee> {
    let mut seen = HashSet::new();
    let mut directory: Vec<Employee> = tasks
        .iter()
        .filter(|task| !task.employee_email.is_empty() && !task.employee_name.is_empty())
        .filter(|task| seen.insert(task.employee_email.as_str()))
        .map(|task| Employee {
            email: task.employee_email.clone(),
            name: task.employee_name.clone(),
            avatar_url: task.avatar_url.clone().unwrap_or_default(),
        })
        .collect();
    directory.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    directory
}

pub fn find_by_email<'a>(directory: &'a [Employee], email: &str) -> Option<&'a Employee> {
    directory.iter().find(|employee| employee.has_email(email))
}

/// Selectable reporting periods: the two recent weeks, then each year with
/// planned work (plus the current year), newest first, each followed by its
/// months from December back to January.
pub fn period_options(tasks: &[TaskRecord], as_of: NaiveDate) -> Vec<PeriodOption> {
    let mut years: BTreeSet<i32> = tasks
        .iter()
        .filter_map(|task| task.planned_date.map(|date| date.year()))
        .collect();
    years.insert(as_of.year());

    let mut options: Vec<PeriodOption> = vec![
        ReportPeriod::LastWeek.into(),
        ReportPeriod::LastToLastWeek.into(),
    ];
    for year in years.into_iter().rev() {
        options.push(ReportPeriod::Year { year }.into());
        options.extend(
            (1..=12)
                .rev()
                .map(|month| PeriodOption::from(ReportPeriod::Month { year, month })),
        );
    }
    options
}
