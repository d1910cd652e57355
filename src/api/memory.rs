//! In-process case API backend.
//!
//! Holds cases and floor plans in memory and answers the same calls as the
//! HTTP client. Failures can be injected per call to exercise the error
//! paths of the views.

use parking_lot::Mutex;

use crate::models::{Case, CaseStatus, CaseUpdateRequest, FloorPlan, NewCase};

use super::client::CaseApi;
use super::error::ApiError;

#[derive(Debug, Default)]
struct MemoryState {
    cases: Vec<Case>,
    floor_plans: Vec<FloorPlan>,
    next_id: u64,
    pending_failure: Option<ApiError>,
    calls: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryCaseApi {
    state: Mutex<MemoryState>,
}

impl InMemoryCaseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(cases: Vec<Case>, floor_plans: Vec<FloorPlan>) -> Self {
        let api = Self::new();
        {
            let mut state = api.state.lock();
            state.cases = cases;
            state.floor_plans = floor_plans;
        }
        api
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.state.lock().pending_failure = Some(error);
    }

    /// Calls received so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn stored_case(&self, id: &str) -> Option<Case> {
        self.state.lock().cases.iter().find(|c| c.id == id).cloned()
    }

    fn begin(&self, call: String) -> Result<parking_lot::MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.state.lock();
        state.calls.push(call);
        match state.pending_failure.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

impl CaseApi for InMemoryCaseApi {
    fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        let state = self.begin("GET /cases".to_string())?;
        Ok(state.cases.clone())
    }

    fn get_case(&self, id: &str) -> Result<Case, ApiError> {
        let state = self.begin(format!("GET /cases/{}", id))?;
        state
            .cases
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn create_case(&self, new_case: &NewCase) -> Result<Case, ApiError> {
        let mut state = self.begin("POST /cases".to_string())?;
        state.next_id += 1;
        let mut case = Case::new(
            &format!("case-{}", state.next_id),
            &new_case.title,
            CaseStatus::Open,
        );
        case.description = new_case.description.clone();
        state.cases.insert(0, case.clone());
        Ok(case)
    }

    fn update_case(&self, id: &str, update: &CaseUpdateRequest) -> Result<Case, ApiError> {
        let mut state = self.begin(format!("PUT /cases/{}", id))?;
        let case = state
            .cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        if let Some(plan) = &update.floor_plan_id {
            case.floor_plan_id = Some(plan.clone());
        }
        if let Some(location) = update.incident_location {
            case.incident_location = Some(location);
        }
        if let Some(status) = update.status {
            case.status = status;
        }
        if let Some(updates) = &update.updates {
            case.updates = updates.clone();
        }
        Ok(case.clone())
    }

    fn list_floor_plans(&self) -> Result<Vec<FloorPlan>, ApiError> {
        let state = self.begin("GET /floor-plans".to_string())?;
        Ok(state.floor_plans.clone())
    }
}
