//! Incident Core - state logic for the Incident Manager
//!
//! UI-independent models and state machines behind the incident manager
//! screens. Views render from these types; every network call goes through
//! the `CaseApi` trait and every toast through a `NotificationSink`.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `cases` - Case list filtering, pagination and dashboard counters
//! - `floor_plan` - Floor plan annotation and the case detail view
//! - `notifications` - Notification list with subscriptions
//! - `search` - Debounced global search
//! - `users` - Auth state, navigation gating and the user directory
//! - `api` - REST collaborator (HTTP and in-memory)
//! - `validation` - Form checks and input screening
//! - `logging` - Structured logging with session context
//!
//! A small PyO3 surface is available behind the `python` feature.

pub mod api;
pub mod cases;
pub mod config;
pub mod error;
pub mod floor_plan;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod search;
pub mod users;
pub mod validation;

pub use error::{Error, Result};

/// Initialize the process-wide logger. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::{PyDict, PyList};

    use crate::cases::{filter_case_indices, page_range, total_pages, CaseStats, PageSummary, StatusFilter};
    use crate::floor_plan::{map_click as map_click_inner, ImageRect, PointerEvent};
    use crate::models::Case;

    fn parse_cases(cases_json: &str) -> PyResult<Vec<Case>> {
        serde_json::from_str(cases_json)
            .map_err(|e| PyValueError::new_err(format!("invalid cases JSON: {}", e)))
    }

    /// Filter and paginate a JSON array of cases.
    ///
    /// # Returns
    /// Dict with `ids` (current page), `filtered_count`, `total_pages`
    /// and `summary`.
    #[pyfunction]
    #[pyo3(signature = (cases_json, status="all".to_string(), search_term="".to_string(), page=1, page_size=10))]
    fn filter_cases(
        py: Python<'_>,
        cases_json: String,
        status: String,
        search_term: String,
        page: usize,
        page_size: usize,
    ) -> PyResult<Py<PyAny>> {
        crate::init_logger();

        let filter: StatusFilter = status.parse().map_err(PyValueError::new_err)?;
        let cases = parse_cases(&cases_json)?;
        let indices = filter_case_indices(&cases, filter, &search_term);

        let ids = PyList::empty(py);
        for &i in &indices[page_range(page, page_size, indices.len())] {
            ids.append(&cases[i].id)?;
        }

        let result = PyDict::new(py);
        result.set_item("ids", ids)?;
        result.set_item("filtered_count", indices.len())?;
        result.set_item("total_pages", total_pages(indices.len(), page_size))?;
        result.set_item(
            "summary",
            PageSummary::new(page, page_size, indices.len()).describe(),
        )?;

        log::info!(
            "PY_FILTER_CASES status={} cases={} matched={}",
            filter,
            cases.len(),
            indices.len()
        );
        Ok(result.into())
    }

    /// Map a click inside an image rect to normalized `(x, y)`.
    #[pyfunction]
    fn map_click(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        client_x: f64,
        client_y: f64,
    ) -> PyResult<(f64, f64)> {
        let rect = ImageRect { left, top, width, height };
        let location = map_click_inner(&rect, &PointerEvent { client_x, client_y })
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((location.x, location.y))
    }

    /// Dashboard counters for a JSON array of cases.
    #[pyfunction]
    #[pyo3(signature = (cases_json, total_users=0))]
    fn case_stats(py: Python<'_>, cases_json: String, total_users: usize) -> PyResult<Py<PyAny>> {
        let stats = CaseStats::from_cases(&parse_cases(&cases_json)?, total_users);

        let result = PyDict::new(py);
        result.set_item("total_cases", stats.total_cases)?;
        result.set_item("open_cases", stats.open_cases)?;
        result.set_item("in_progress_cases", stats.in_progress_cases)?;
        result.set_item("closed_cases", stats.closed_cases)?;
        result.set_item("total_users", stats.total_users)?;
        Ok(result.into())
    }

    /// Python module definition
    #[pymodule]
    fn incident_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(filter_cases, m)?)?;
        m.add_function(wrap_pyfunction!(map_click, m)?)?;
        m.add_function(wrap_pyfunction!(case_stats, m)?)?;
        Ok(())
    }
}
