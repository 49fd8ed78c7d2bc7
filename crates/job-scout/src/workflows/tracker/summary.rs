use serde::Serialize;

use super::TrackedApplication;
use crate::workflows::intake::parse_currency;

/// Headline numbers for the tracked opportunities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackerSummary {
    pub total: usize,
    pub applied: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_salary: Option<u64>,
    pub remote: usize,
}

impl TrackerSummary {
    /// The average covers only rows whose salary cell parses; blank or
    /// free-text salaries count toward `total` but not toward the average.
    pub fn from_rows(rows: &[TrackedApplication]) -> Self {
        let applied = rows
            .iter()
            .filter(|row| !row.applied_date.trim().is_empty())
            .count();
        let remote = rows
            .iter()
            .filter(|row| row.location.to_lowercase().contains("remote"))
            .count();

        let salaries: Vec<u64> = rows
            .iter()
            .filter_map(|row| parse_currency(&row.salary))
            .collect();
        let average_salary = if salaries.is_empty() {
            None
        } else {
            Some(salaries.iter().sum::<u64>() / salaries.len() as u64)
        };

        Self {
            total: rows.len(),
            applied,
            average_salary,
            remote,
        }
    }
}
