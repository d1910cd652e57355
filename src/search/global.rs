//! Debounced global search.
//!
//! Every keystroke cancels the pending lookup timer and schedules a new one.
//! Only when the delay passes without further input does a lookup run.
//! Each executed lookup carries a generation; results are applied only if
//! no newer lookup was issued since and the term is unchanged, so a slow
//! response for an earlier term never overwrites a later one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::ClientConfig;
use crate::logging::structured::LogContext;

use super::backend::{SearchBackend, SearchResult};
use super::scheduler::{Scheduler, TimerHandle};

/// Identifies one executed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupToken {
    generation: u64,
    term: String,
}

impl LookupToken {
    pub fn term(&self) -> &str {
        &self.term
    }
}

#[derive(Debug, Default)]
struct SearchState {
    term: String,
    results: Vec<SearchResult>,
    searching: bool,
    issued: u64,
    pending: Option<TimerHandle>,
    shut_down: bool,
}

struct Shared {
    state: Mutex<SearchState>,
    backend: Arc<dyn SearchBackend>,
    log_ctx: LogContext,
}

impl Shared {
    fn begin_lookup(&self, term: &str) -> Option<LookupToken> {
        let mut state = self.state.lock();
        if state.shut_down || state.term != term {
            return None;
        }
        state.issued += 1;
        state.searching = true;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
        Some(LookupToken {
            generation: state.issued,
            term: term.to_string(),
        })
    }

    fn complete_lookup(&self, token: &LookupToken, results: Vec<SearchResult>) -> bool {
        let mut state = self.state.lock();
        if state.shut_down || token.generation != state.issued || token.term != state.term {
            log::debug!(
                "{} SEARCH_STALE_DISCARDED term={:?} generation={} latest={}",
                self.log_ctx,
                token.term,
                token.generation,
                state.issued
            );
            return false;
        }
        log::debug!(
            "{} SEARCH_COMPLETE term={:?} results={}",
            self.log_ctx,
            token.term,
            results.len()
        );
        state.results = results;
        state.searching = false;
        true
    }

    fn run_lookup(&self, term: &str) {
        if let Some(token) = self.begin_lookup(term) {
            let results = self.backend.search(term);
            self.complete_lookup(&token, results);
        }
    }
}

/// State of the navbar search box.
pub struct GlobalSearch {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
    delay: Duration,
}

impl GlobalSearch {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        backend: Arc<dyn SearchBackend>,
        delay: Duration,
        log_ctx: LogContext,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SearchState::default()),
                backend,
                log_ctx,
            }),
            scheduler,
            delay,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        scheduler: Arc<dyn Scheduler>,
        backend: Arc<dyn SearchBackend>,
        log_ctx: LogContext,
    ) -> Self {
        Self::new(scheduler, backend, config.search_debounce(), log_ctx)
    }

    /// Handle a keystroke.
    ///
    /// An empty term clears results at once; anything else (re)starts the
    /// debounce timer.
    pub fn set_search_term(&self, term: &str) {
        {
            let mut state = self.shared.state.lock();
            if state.shut_down {
                return;
            }
            if let Some(pending) = state.pending.take() {
                pending.cancel();
            }
            state.term = term.to_string();

            if term.is_empty() {
                // Invalidate any lookup already in flight.
                state.issued += 1;
                state.results.clear();
                state.searching = false;
                return;
            }
        }

        let shared = Arc::clone(&self.shared);
        let owned = term.to_string();
        let handle = self
            .scheduler
            .schedule(self.delay, Box::new(move || shared.run_lookup(&owned)));

        log::debug!(
            "{} SEARCH_SCHEDULED term={:?} delay_ms={}",
            self.shared.log_ctx,
            term,
            self.delay.as_millis()
        );

        let mut state = self.shared.state.lock();
        if state.term == term && !state.shut_down {
            state.pending = Some(handle);
        } else {
            handle.cancel();
        }
    }

    /// Claim a lookup for `term` when driving an external asynchronous
    /// backend. Returns `None` if the term is no longer current.
    pub fn begin_lookup(&self, term: &str) -> Option<LookupToken> {
        self.shared.begin_lookup(term)
    }

    /// Deliver results for `token`. Returns false when they were stale.
    pub fn complete_lookup(&self, token: &LookupToken, results: Vec<SearchResult>) -> bool {
        self.shared.complete_lookup(token, results)
    }

    /// Cancel the pending timer and ignore anything still in flight.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.lock();
        state.shut_down = true;
        state.searching = false;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
        log::debug!("{} SEARCH_SHUTDOWN", self.shared.log_ctx);
    }

    pub fn search_term(&self) -> String {
        self.shared.state.lock().term.clone()
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.shared.state.lock().results.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.shared.state.lock().searching
    }

    /// The dropdown is shown whenever a term is typed.
    pub fn dropdown_visible(&self) -> bool {
        !self.shared.state.lock().term.is_empty()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.shared
            .state
            .lock()
            .pending
            .as_ref()
            .map(|h| !h.is_cancelled())
            .unwrap_or(false)
    }
}

impl Drop for GlobalSearch {
    fn drop(&mut self) {
        self.shutdown();
    }
}
