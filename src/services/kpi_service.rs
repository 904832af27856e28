use chrono::NaiveDate;
use tracing::debug;

use crate::models::analytics::{DateRange, KpiCounts, KpiMetric, MisStats};
use crate::models::task::TaskRecord;
use crate::utils::rounding::round2;

/// Treats an empty email the same as a missing one.
pub(crate) fn present_email(email: Option<&str>) -> Option<&str> {
    email.filter(|value| !value.is_empty())
}

/// Tasks owned by `email` whose planned date falls inside `range`.
pub(crate) fn planned_in_range<'a>(
    tasks: &'a [TaskRecord],
    email: &'a str,
    range: &'a DateRange,
) -> impl Iterator<Item = &'a TaskRecord> + 'a {
    tasks
        .iter()
        .filter(move |task| task.belongs_to(email) && range.contains_opt(task.planned_date))
}

/// `met / base` as a signed deviation from a 100% target, 0 when `base` is 0.
pub fn deviation_performance(met: usize, base: usize) -> f64 {
    if base == 0 {
        return 0.0;
    }
    round2(met as f64 / base as f64 * 100.0 - 100.0)
}

/// Plan-vs-actual and on-time scorecards for one employee over `range`.
///
/// The on-time metric is measured against completed tasks, so an employee
/// who finished two of four tasks, both on time, scores 0 on that axis.
pub fn compute_mis_stats(
    tasks: &[TaskRecord],
    email: Option<&str>,
    range: DateRange,
) -> Option<MisStats> {
    let email = present_email(email)?;

    let mut base = 0usize;
    let mut completed = 0usize;
    let mut on_time = 0usize;
    for task in planned_in_range(tasks, email, &range) {
        base += 1;
        if task.is_done() {
            completed += 1;
            if task.is_on_time() {
                on_time += 1;
            }
        }
    }

    debug!(
        target: "app::kpi",
        email,
        start = %range.start_date,
        end = %range.end_date,
        base,
        completed,
        on_time,
        "computed mis stats"
    );

    Some(MisStats {
        plan_vs_actual: KpiMetric {
            base,
            met: completed,
            performance: deviation_performance(completed, base),
        },
        on_time: KpiMetric {
            base: completed,
            met: on_time,
            performance: deviation_performance(on_time, completed),
        },
        range,
    })
}

fn sorted_by_planned_date(mut tasks: Vec<TaskRecord>) -> Vec<TaskRecord> {
    tasks.sort_by_key(|task| task.planned_date);
    tasks
}

/// Planned inside `range` and still without a completion date.
pub fn work_not_done(
    tasks: &[TaskRecord],
    email: Option<&str>,
    range: DateRange,
) -> Vec<TaskRecord> {
    let Some(email) = present_email(email) else {
        return Vec::new();
    };
    sorted_by_planned_date(
        planned_in_range(tasks, email, &range)
            .filter(|task| !task.is_done())
            .cloned()
            .collect(),
    )
}

/// Planned inside `range` and completed strictly after the planned date.
/// Unfinished tasks are reported by [`work_not_done`] only.
pub fn work_not_done_on_time(
    tasks: &[TaskRecord],
    email: Option<&str>,
    range: DateRange,
) -> Vec<TaskRecord> {
    let Some(email) = present_email(email) else {
        return Vec::new();
    };
    sorted_by_planned_date(
        planned_in_range(tasks, email, &range)
            .filter(|task| task.is_late())
            .cloned()
            .collect(),
    )
}

pub fn pending_tasks(tasks: &[TaskRecord]) -> Vec<TaskRecord> {
    tasks.iter().filter(|task| !task.is_done()).cloned().collect()
}

/// Overdue, due-today and pending totals for `email` as of `as_of`.
///
/// Undated tasks count toward `pending_total` only.
pub fn kpi_counts(tasks: &[TaskRecord], email: Option<&str>, as_of: NaiveDate) -> KpiCounts {
    let Some(email) = present_email(email) else {
        return KpiCounts::default();
    };

    tasks
        .iter()
        .filter(|task| task.belongs_to(email) && !task.is_done())
        .fold(KpiCounts::default(), |mut counts, task| {
            match task.planned_date {
                None => counts.pending_total += 1,
                Some(planned) => {
                    if planned <= as_of {
                        counts.pending_total += 1;
                    }
                    if planned < as_of {
                        counts.overdue += 1;
                    } else if planned == as_of {
                        counts.due_today += 1;
                    }
                }
            }
            counts
        })
}
