//! Case list state.
//!
//! Holds the unfiltered cases as fetched from the API and keeps a derived
//! view (matching indices) that is recomputed whenever the cases, the
//! status filter or the search term change. Any such change returns the
//! list to page 1.

use std::collections::HashMap;

use thiserror::Error;

use crate::api::{ApiError, CaseApi};
use crate::config::ClientConfig;
use crate::logging::structured::LogContext;
use crate::models::{Case, NewCase};
use crate::notifications::{NotificationSink, Severity};
use crate::validation::form::{validate_new_case, ValidationError};
use crate::validation::sanitizer::screen_fields;

use super::filter::{filter_case_indices, StatusFilter};
use super::pagination::{page_range, total_pages, PageSummary};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseStoreError {
    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct CaseStore {
    cases: Vec<Case>,
    status_filter: StatusFilter,
    search_term: String,
    current_page: usize,
    page_size: usize,
    filtered: Vec<usize>,
    log_ctx: LogContext,
}

impl CaseStore {
    /// A zero `page_size` is treated as 1.
    pub fn new(page_size: usize, log_ctx: LogContext) -> Self {
        Self {
            cases: Vec::new(),
            status_filter: StatusFilter::All,
            search_term: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            filtered: Vec::new(),
            log_ctx,
        }
    }

    pub fn from_config(config: &ClientConfig, log_ctx: LogContext) -> Self {
        Self::new(config.page_size, log_ctx)
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn set_cases(&mut self, cases: Vec<Case>) {
        self.cases = cases;
        self.recompute();
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.recompute();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute();
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Matching cases in input order.
    pub fn filtered_cases(&self) -> Vec<&Case> {
        self.filtered.iter().map(|&i| &self.cases[i]).collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// The slice of matching cases on the current page.
    pub fn current_cases(&self) -> Vec<&Case> {
        let range = page_range(self.current_page, self.page_size, self.filtered.len());
        self.filtered[range].iter().map(|&i| &self.cases[i]).collect()
    }

    /// Jump to a 1-based page. Page 1 is always reachable, even when empty.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), CaseStoreError> {
        let total = self.total_pages();
        if page == 0 || (page > total && page != 1) {
            return Err(CaseStoreError::PageOutOfRange {
                page,
                total_pages: total,
            });
        }
        self.current_page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), CaseStoreError> {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> Result<(), CaseStoreError> {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Whether the previous-page control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the next-page control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn page_summary(&self) -> PageSummary {
        PageSummary::new(self.current_page, self.page_size, self.filtered.len())
    }

    /// Prepend a case returned by the create call.
    ///
    /// No dedup: if the API hands back an id that is already held, both
    /// records stay in the list. Use [`duplicate_ids`](Self::duplicate_ids)
    /// to detect that.
    pub fn insert_created(&mut self, case: Case) {
        if self.cases.iter().any(|c| c.id == case.id) {
            log::warn!(
                "{} CASE_DUPLICATE_ID id={} held={}",
                self.log_ctx,
                case.id,
                self.cases.len()
            );
        }
        self.cases.insert(0, case);
        self.recompute();
    }

    /// Ids that occur more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for case in &self.cases {
            let count = counts.entry(case.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(case.id.clone());
            }
        }
        order
    }

    /// Replace the held cases with `GET /cases`.
    pub fn fetch(&mut self, api: &dyn CaseApi, sink: &dyn NotificationSink) -> Result<usize, CaseStoreError> {
        match api.list_cases() {
            Ok(cases) => {
                log::info!("{} CASES_FETCHED count={}", self.log_ctx, cases.len());
                self.set_cases(cases);
                Ok(self.cases.len())
            }
            Err(e) => {
                log::error!("{} CASES_FETCH_FAILED error={}", self.log_ctx, e);
                sink.notify("Error fetching cases", Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Validate, `POST /cases`, and prepend the created record.
    pub fn create(
        &mut self,
        api: &dyn CaseApi,
        sink: &dyn NotificationSink,
        new_case: &NewCase,
    ) -> Result<Case, CaseStoreError> {
        validate_new_case(new_case)?;
        screen_fields(
            &[("title", &new_case.title), ("description", &new_case.description)],
            &self.log_ctx,
        );

        match api.create_case(new_case) {
            Ok(case) => {
                log::info!("{} CASE_CREATED id={}", self.log_ctx, case.id);
                self.insert_created(case.clone());
                Ok(case)
            }
            Err(e) => {
                log::error!("{} CASE_CREATE_FAILED error={}", self.log_ctx, e);
                sink.notify("Error creating case", Severity::Error);
                Err(e.into())
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_case_indices(&self.cases, self.status_filter, &self.search_term);
        self.current_page = 1;
        log::debug!(
            "{} CASE_VIEW_RECOMPUTED filter={} search={:?} matched={} total={}",
            self.log_ctx,
            self.status_filter,
            self.search_term,
            self.filtered.len(),
            self.cases.len()
        );
    }
}
