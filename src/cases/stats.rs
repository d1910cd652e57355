//! Dashboard counters.

use serde::Serialize;

use crate::models::{Case, CaseStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStats {
    pub total_cases: usize,
    pub open_cases: usize,
    pub in_progress_cases: usize,
    pub closed_cases: usize,
    pub total_users: usize,
}

impl CaseStats {
    pub fn from_cases(cases: &[Case], total_users: usize) -> Self {
        let mut stats = Self {
            total_users,
            ..Self::default()
        };
        for case in cases {
            stats.total_cases += 1;
            match case.status {
                CaseStatus::Open => stats.open_cases += 1,
                CaseStatus::InProgress => stats.in_progress_cases += 1,
                CaseStatus::Closed => stats.closed_cases += 1,
            }
        }
        stats
    }

    pub fn count_for(&self, status: CaseStatus) -> usize {
        match status {
            CaseStatus::Open => self.open_cases,
            CaseStatus::InProgress => self.in_progress_cases,
            CaseStatus::Closed => self.closed_cases,
        }
    }

    /// Bar chart series: one `(label, count)` per status.
    pub fn chart_series(&self) -> Vec<(&'static str, usize)> {
        CaseStatus::ALL
            .iter()
            .map(|s| (s.label(), self.count_for(*s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_status() {
        let cases = vec![
            Case::new("1", "a", CaseStatus::Open),
            Case::new("2", "b", CaseStatus::Open),
            Case::new("3", "c", CaseStatus::InProgress),
            Case::new("4", "d", CaseStatus::Closed),
        ];
        let stats = CaseStats::from_cases(&cases, 25);
        assert_eq!(stats.total_cases, 4);
        assert_eq!(stats.open_cases, 2);
        assert_eq!(stats.total_users, 25);
        assert_eq!(
            stats.chart_series(),
            vec![("Open", 2), ("In Progress", 1), ("Closed", 1)]
        );
    }

    #[test]
    fn test_empty() {
        let stats = CaseStats::from_cases(&[], 0);
        assert_eq!(stats, CaseStats::default());
    }
}
