//! Search backends.

use std::sync::Arc;

use serde::Serialize;

use crate::api::CaseApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Case,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub subtitle: String,
}

impl SearchResult {
    pub fn new(id: &str, kind: ResultKind, title: &str, subtitle: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    /// Route the result links to.
    pub fn link(&self) -> String {
        match self.kind {
            ResultKind::Case => format!("/cases/{}", self.id),
            ResultKind::User => format!("/users/{}", self.id),
        }
    }

    /// Case-insensitive substring match on title or subtitle.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.subtitle.to_lowercase().contains(&term)
    }
}

pub trait SearchBackend: Send + Sync {
    fn search(&self, term: &str) -> Vec<SearchResult>;
}

/// Fixed in-memory result set.
#[derive(Debug, Clone)]
pub struct StaticSearchBackend {
    entries: Vec<SearchResult>,
}

impl StaticSearchBackend {
    pub fn new(entries: Vec<SearchResult>) -> Self {
        Self { entries }
    }
}

impl Default for StaticSearchBackend {
    fn default() -> Self {
        Self::new(vec![
            SearchResult::new("1", ResultKind::Case, "Server Outage", "Open"),
            SearchResult::new("2", ResultKind::Case, "Network Issues", "In Progress"),
            SearchResult::new("3", ResultKind::User, "John Doe", "Staff"),
            SearchResult::new("4", ResultKind::User, "Jane Smith", "Manager"),
        ])
    }
}

impl SearchBackend for StaticSearchBackend {
    fn search(&self, term: &str) -> Vec<SearchResult> {
        self.entries.iter().filter(|r| r.matches(term)).cloned().collect()
    }
}

/// Searches the live case list; the status label is the subtitle.
pub struct CaseApiSearchBackend {
    api: Arc<dyn CaseApi>,
}

impl CaseApiSearchBackend {
    pub fn new(api: Arc<dyn CaseApi>) -> Self {
        Self { api }
    }
}

impl SearchBackend for CaseApiSearchBackend {
    fn search(&self, term: &str) -> Vec<SearchResult> {
        match self.api.list_cases() {
            Ok(cases) => cases
                .iter()
                .map(|c| SearchResult::new(&c.id, ResultKind::Case, &c.title, c.status.label()))
                .filter(|r| r.matches(term))
                .collect(),
            Err(e) => {
                log::error!("SEARCH_BACKEND_FAILED term={:?} error={}", term, e);
                Vec::new()
            }
        }
    }
}
