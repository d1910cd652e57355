//! Case detail view state.
//!
//! Owns the fetched case, the floor-plan catalogue and the annotator for one
//! case page. Every load is stamped with a generation token; responses that
//! arrive for an older generation, or after the view was torn down, are
//! dropped instead of being applied to state nobody is looking at.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::api::{ApiError, CaseApi};
use crate::logging::structured::LogContext;
use crate::models::{Case, CaseStatus, CaseUpdate, CaseUpdateRequest, FloorPlan};
use crate::notifications::{NotificationSink, Severity};
use crate::validation::form::{validate_update_text, ValidationError};
use crate::validation::sanitizer::screen_text;

use super::annotator::{FloorPlanAnnotator, FloorPlanSwitchPolicy, SaveOutcome};

pub const CASE_FETCH_FAILED_MESSAGE: &str = "Error fetching case details";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseDetailError {
    #[error("Case is not loaded")]
    NotLoaded,

    #[error("View has been torn down")]
    Unmounted,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Stamp handed out when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

/// Whether a response made it into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    Discarded,
}

#[derive(Debug, Clone)]
pub struct CaseDetail {
    case_id: String,
    case: Option<Case>,
    floor_plans: Vec<FloorPlan>,
    annotator: FloorPlanAnnotator,
    generation: u64,
    mounted: bool,
    log_ctx: LogContext,
}

impl CaseDetail {
    pub fn new(case_id: &str, policy: FloorPlanSwitchPolicy, log_ctx: &LogContext) -> Self {
        let log_ctx = log_ctx.with_case(case_id);
        Self {
            case_id: case_id.to_string(),
            case: None,
            floor_plans: Vec::new(),
            annotator: FloorPlanAnnotator::new(policy, log_ctx.clone()),
            generation: 0,
            mounted: true,
            log_ctx,
        }
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    pub fn floor_plans(&self) -> &[FloorPlan] {
        &self.floor_plans
    }

    pub fn annotator(&self) -> &FloorPlanAnnotator {
        &self.annotator
    }

    pub fn annotator_mut(&mut self) -> &mut FloorPlanAnnotator {
        &mut self.annotator
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start a load; any response for an earlier token becomes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken {
            generation: self.generation,
        }
    }

    /// Mark the view gone. Late responses are discarded from now on.
    pub fn teardown(&mut self) {
        log::debug!("{} CASE_VIEW_TEARDOWN generation={}", self.log_ctx, self.generation);
        self.mounted = false;
    }

    fn is_current(&self, token: RequestToken, what: &str) -> bool {
        if self.mounted && token.generation == self.generation {
            return true;
        }
        log::debug!(
            "{} RESPONSE_DISCARDED what={} token={} current={} mounted={}",
            self.log_ctx,
            what,
            token.generation,
            self.generation,
            self.mounted
        );
        false
    }

    /// Apply a `GET /cases/:id` response.
    pub fn apply_case(
        &mut self,
        token: RequestToken,
        response: Result<Case, ApiError>,
        sink: &dyn NotificationSink,
    ) -> Applied {
        if !self.is_current(token, "case") {
            return Applied::Discarded;
        }

        match response {
            Ok(case) => {
                log::info!("{} CASE_LOADED status={} updates={}", self.log_ctx, case.status, case.updates.len());
                self.annotator.seed_from_case(&case);
                self.case = Some(case);
            }
            Err(e) => {
                log::error!("{} CASE_FETCH_FAILED error={}", self.log_ctx, e);
                sink.notify(CASE_FETCH_FAILED_MESSAGE, Severity::Error);
            }
        }
        Applied::Applied
    }

    /// Apply a `GET /floor-plans` response. Failures are only logged.
    pub fn apply_floor_plans(&mut self, token: RequestToken, response: Result<Vec<FloorPlan>, ApiError>) -> Applied {
        if !self.is_current(token, "floor_plans") {
            return Applied::Discarded;
        }

        match response {
            Ok(plans) => {
                log::debug!("{} FLOOR_PLANS_LOADED count={}", self.log_ctx, plans.len());
                self.floor_plans = plans;
            }
            Err(e) => {
                log::error!("{} FLOOR_PLANS_FETCH_FAILED error={}", self.log_ctx, e);
            }
        }
        Applied::Applied
    }

    /// Fetch the case and the floor plans in one go.
    pub fn load(&mut self, api: &dyn CaseApi, sink: &dyn NotificationSink) {
        let token = self.begin_load();
        let case = api.get_case(&self.case_id);
        self.apply_case(token, case, sink);
        let plans = api.list_floor_plans();
        self.apply_floor_plans(token, plans);
    }

    fn loaded_case(&self) -> Result<&Case, CaseDetailError> {
        if !self.mounted {
            return Err(CaseDetailError::Unmounted);
        }
        self.case.as_ref().ok_or(CaseDetailError::NotLoaded)
    }

    fn put(
        &mut self,
        api: &dyn CaseApi,
        sink: &dyn NotificationSink,
        request: &CaseUpdateRequest,
        messages: (&str, &str),
    ) -> Result<Case, CaseDetailError> {
        match api.update_case(&self.case_id, request) {
            Ok(case) => {
                sink.notify(messages.0, Severity::Success);
                self.case = Some(case.clone());
                Ok(case)
            }
            Err(e) => {
                log::error!("{} CASE_UPDATE_FAILED error={}", self.log_ctx, e);
                sink.notify(messages.1, Severity::Error);
                Err(e.into())
            }
        }
    }

    pub fn change_status(
        &mut self,
        api: &dyn CaseApi,
        sink: &dyn NotificationSink,
        status: CaseStatus,
    ) -> Result<Case, CaseDetailError> {
        let from = self.loaded_case()?.status;
        log::info!("{} CASE_STATUS_CHANGE from={} to={}", self.log_ctx, from, status);
        self.put(
            api,
            sink,
            &CaseUpdateRequest::status(status),
            ("Case status updated", "Error updating case status"),
        )
    }

    /// Append an update authored by `user` and persist the full list.
    pub fn add_update(
        &mut self,
        api: &dyn CaseApi,
        sink: &dyn NotificationSink,
        user: &str,
        content: &str,
    ) -> Result<Case, CaseDetailError> {
        validate_update_text(content)?;
        let mut updates = self.loaded_case()?.updates.clone();
        screen_text("update", content, &self.log_ctx);

        updates.push(CaseUpdate {
            id: Uuid::new_v4().to_string(),
            user: user.to_string(),
            content: content.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        });

        self.put(
            api,
            sink,
            &CaseUpdateRequest::updates(updates),
            ("Update added", "Error adding update"),
        )
    }

    /// Save the annotator's pin; the held case is refreshed on success.
    pub fn save_incident_location(&mut self, api: &dyn CaseApi, sink: &dyn NotificationSink) -> SaveOutcome {
        if self.loaded_case().is_err() {
            log::debug!("{} LOCATION_SAVE_SKIPPED loaded={}", self.log_ctx, self.case.is_some());
            return SaveOutcome::Disabled;
        }
        let outcome = self.annotator.save(api, &self.case_id, sink);
        if let SaveOutcome::Saved(case) = &outcome {
            self.case = Some(case.clone());
        }
        outcome
    }
}
