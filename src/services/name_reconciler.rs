use tracing::debug;

use crate::models::task::Employee;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Resolves a free-text attendance name to a directory employee.
///
/// An exact, case-insensitive match always wins. Otherwise the query is
/// accepted only when it is a substring of exactly one directory name, so
/// "Sahil" never resolves while both "Sahil Kumar" and "Sahil Sharma" exist.
pub fn find_best_match<'a>(name: &str, directory: &'a [Employee]) -> Option<&'a Employee> {
    let query = normalize(name);
    if query.is_empty() || directory.is_empty() {
        return None;
    }

    if let Some(exact) = directory
        .iter()
        .find(|employee| normalize(&employee.name) == query)
    {
        return Some(exact);
    }

    let mut partial = directory
        .iter()
        .filter(|employee| normalize(&employee.name).contains(&query));

    match (partial.next(), partial.next()) {
        (Some(only), None) => Some(only),
        (Some(_), Some(_)) => {
            debug!(target: "app::attendance", name, "ambiguous partial name match");
            None
        }
        _ => None,
    }
}
