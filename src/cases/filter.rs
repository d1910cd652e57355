//! Case filtering.

use std::fmt;
use std::str::FromStr;

use crate::models::{Case, CaseStatus};

/// Status selector of the case list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CaseStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: CaseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// True when `case` passes both the status and the title search predicate.
///
/// An empty search term matches everything; otherwise the title must contain
/// the term, compared case-insensitively.
pub fn case_matches(case: &Case, filter: StatusFilter, search_term: &str) -> bool {
    if !filter.matches(case.status) {
        return false;
    }
    if search_term.is_empty() {
        return true;
    }
    case.title.to_lowercase().contains(&search_term.to_lowercase())
}

/// Indices of the matching cases, in input order.
pub fn filter_case_indices(cases: &[Case], filter: StatusFilter, search_term: &str) -> Vec<usize> {
    cases
        .iter()
        .enumerate()
        .filter(|(_, case)| case_matches(case, filter, search_term))
        .map(|(i, _)| i)
        .collect()
}

/// The matching cases, in input order.
pub fn filter_cases<'a>(cases: &'a [Case], filter: StatusFilter, search_term: &str) -> Vec<&'a Case> {
    cases
        .iter()
        .filter(|case| case_matches(case, filter, search_term))
        .collect()
}
