//! Floor-plan annotator.
//!
//! Maps a pointer click on the rendered floor-plan image to fractional
//! image-relative coordinates and persists the pin against a case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiError, CaseApi};
use crate::logging::structured::LogContext;
use crate::models::{find_floor_plan, Case, CaseUpdateRequest, FloorPlan, IncidentLocation};
use crate::notifications::{NotificationSink, Severity};

pub const LOCATION_SAVED_MESSAGE: &str = "Incident location saved successfully";
pub const LOCATION_SAVE_FAILED_MESSAGE: &str = "Error saving incident location";

/// What happens to a placed pin when the user picks another floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorPlanSwitchPolicy {
    /// Keep the pin; its coordinates then refer to the new image.
    KeepLocation,
    /// Drop the pin so a stale position is never saved against a new plan.
    #[default]
    ClearLocation,
}

/// Bounding box of the image as rendered, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotatorError {
    #[error("Image has no area: {width}x{height}")]
    DegenerateImage { width: f64, height: f64 },

    #[error("Click maps to a non-finite coordinate")]
    NonFinite,
}

/// Normalize a click to image-relative coordinates.
///
/// No clamping: the click handler only fires on the image itself, so
/// in-bounds input yields coordinates in `[0, 1]`.
pub fn map_click(rect: &ImageRect, event: &PointerEvent) -> Result<IncidentLocation, AnnotatorError> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return Err(AnnotatorError::DegenerateImage {
            width: rect.width,
            height: rect.height,
        });
    }

    let x = (event.client_x - rect.left) / rect.width;
    let y = (event.client_y - rect.top) / rect.height;

    if !x.is_finite() || !y.is_finite() {
        return Err(AnnotatorError::NonFinite);
    }
    Ok(IncidentLocation::new(x, y))
}

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Floor plan or location unset; nothing was sent.
    Disabled,
    Saved(Case),
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct FloorPlanAnnotator {
    selected_floor_plan: Option<String>,
    incident_location: Option<IncidentLocation>,
    policy: FloorPlanSwitchPolicy,
    log_ctx: LogContext,
}

impl FloorPlanAnnotator {
    pub fn new(policy: FloorPlanSwitchPolicy, log_ctx: LogContext) -> Self {
        Self {
            selected_floor_plan: None,
            incident_location: None,
            policy,
            log_ctx,
        }
    }

    /// Load the persisted plan and pin of a freshly fetched case.
    pub fn seed_from_case(&mut self, case: &Case) {
        self.selected_floor_plan = case.floor_plan_id.clone().filter(|id| !id.is_empty());
        self.incident_location = case.incident_location;
    }

    pub fn policy(&self) -> FloorPlanSwitchPolicy {
        self.policy
    }

    pub fn selected_floor_plan(&self) -> Option<&str> {
        self.selected_floor_plan.as_deref()
    }

    pub fn incident_location(&self) -> Option<IncidentLocation> {
        self.incident_location
    }

    /// Select a floor plan; `None` or an empty id deselects.
    pub fn select_floor_plan(&mut self, id: Option<&str>) {
        let next = id.filter(|s| !s.is_empty()).map(str::to_string);
        if next == self.selected_floor_plan {
            return;
        }

        if self.policy == FloorPlanSwitchPolicy::ClearLocation && self.incident_location.is_some() {
            log::debug!(
                "{} INCIDENT_LOCATION_CLEARED from={:?} to={:?}",
                self.log_ctx,
                self.selected_floor_plan,
                next
            );
            self.incident_location = None;
        }
        self.selected_floor_plan = next;
    }

    /// Place the pin. Returns `Ok(None)` when no floor plan is shown.
    pub fn click(
        &mut self,
        rect: &ImageRect,
        event: &PointerEvent,
    ) -> Result<Option<IncidentLocation>, AnnotatorError> {
        if self.selected_floor_plan.is_none() {
            return Ok(None);
        }
        let location = map_click(rect, event)?;
        log::debug!(
            "{} INCIDENT_LOCATION_SET x={:.4} y={:.4}",
            self.log_ctx,
            location.x,
            location.y
        );
        self.incident_location = Some(location);
        Ok(Some(location))
    }

    /// Whether the save button is enabled.
    pub fn can_save(&self) -> bool {
        self.selected_floor_plan.is_some() && self.incident_location.is_some()
    }

    /// Pin offsets as percentages of the image box.
    pub fn marker_position(&self) -> Option<(f64, f64)> {
        if self.selected_floor_plan.is_none() {
            return None;
        }
        self.incident_location.map(|loc| (loc.x * 100.0, loc.y * 100.0))
    }

    pub fn selected_image_url<'a>(&self, plans: &'a [FloorPlan]) -> Option<&'a str> {
        let id = self.selected_floor_plan.as_deref()?;
        find_floor_plan(plans, id).map(|fp| fp.image_url.as_str())
    }

    /// Persist `{floorPlanId, incidentLocation}` against `case_id`.
    pub fn save(&self, api: &dyn CaseApi, case_id: &str, sink: &dyn NotificationSink) -> SaveOutcome {
        let (plan, location) = match (&self.selected_floor_plan, self.incident_location) {
            (Some(plan), Some(location)) => (plan, location),
            _ => return SaveOutcome::Disabled,
        };

        let ctx = self.log_ctx.with_case(case_id);
        let request = CaseUpdateRequest::incident_location(plan, location);

        match api.update_case(case_id, &request) {
            Ok(case) => {
                log::info!(
                    "{} INCIDENT_LOCATION_SAVED floor_plan={} x={:.4} y={:.4}",
                    ctx,
                    plan,
                    location.x,
                    location.y
                );
                sink.notify(LOCATION_SAVED_MESSAGE, Severity::Success);
                SaveOutcome::Saved(case)
            }
            Err(e) => {
                log::error!("{} INCIDENT_LOCATION_SAVE_FAILED error={}", ctx, e);
                sink.notify(LOCATION_SAVE_FAILED_MESSAGE, Severity::Error);
                SaveOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryCaseApi;
    use crate::models::CaseStatus;
    use crate::notifications::RecordingSink;

    const RECT: ImageRect = ImageRect {
        left: 100.0,
        top: 50.0,
        width: 800.0,
        height: 600.0,
    };

    fn annotator(policy: FloorPlanSwitchPolicy) -> FloorPlanAnnotator {
        FloorPlanAnnotator::new(policy, LogContext::new("test-session"))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_corners() {
        let top_left = map_click(&RECT, &PointerEvent { client_x: 100.0, client_y: 50.0 }).unwrap();
        assert!(approx(top_left.x, 0.0) && approx(top_left.y, 0.0));

        let bottom_right = map_click(&RECT, &PointerEvent { client_x: 900.0, client_y: 650.0 }).unwrap();
        assert!(approx(bottom_right.x, 1.0) && approx(bottom_right.y, 1.0));

        let center = map_click(&RECT, &PointerEvent { client_x: 500.0, client_y: 350.0 }).unwrap();
        assert!(approx(center.x, 0.5) && approx(center.y, 0.5));
    }

    #[test]
    fn test_degenerate_image() {
        let rect = ImageRect { width: 0.0, ..RECT };
        assert!(matches!(
            map_click(&rect, &PointerEvent { client_x: 1.0, client_y: 1.0 }),
            Err(AnnotatorError::DegenerateImage { .. })
        ));

        let event = PointerEvent { client_x: f64::NAN, client_y: 1.0 };
        assert_eq!(map_click(&RECT, &event), Err(AnnotatorError::NonFinite));
    }

    #[test]
    fn test_click_ignored_without_floor_plan() {
        let mut a = annotator(FloorPlanSwitchPolicy::ClearLocation);
        let placed = a.click(&RECT, &PointerEvent { client_x: 200.0, client_y: 200.0 }).unwrap();
        assert!(placed.is_none());
        assert!(a.incident_location().is_none());
    }

    #[test]
    fn test_click_overwrites_location() {
        let mut a = annotator(FloorPlanSwitchPolicy::ClearLocation);
        a.select_floor_plan(Some("fp-1"));
        a.click(&RECT, &PointerEvent { client_x: 100.0, client_y: 50.0 }).unwrap();
        a.click(&RECT, &PointerEvent { client_x: 500.0, client_y: 350.0 }).unwrap();
        assert_eq!(a.incident_location(), Some(IncidentLocation::new(0.5, 0.5)));
        assert_eq!(a.marker_position(), Some((50.0, 50.0)));
    }

    #[test]
    fn test_switch_policies() {
        let event = PointerEvent { client_x: 300.0, client_y: 200.0 };

        let mut clear = annotator(FloorPlanSwitchPolicy::ClearLocation);
        clear.select_floor_plan(Some("fp-1"));
        clear.click(&RECT, &event).unwrap();
        clear.select_floor_plan(Some("fp-1"));
        assert!(clear.incident_location().is_some());
        clear.select_floor_plan(Some("fp-2"));
        assert!(clear.incident_location().is_none());

        let mut keep = annotator(FloorPlanSwitchPolicy::KeepLocation);
        keep.select_floor_plan(Some("fp-1"));
        keep.click(&RECT, &event).unwrap();
        keep.select_floor_plan(Some("fp-2"));
        assert!(keep.incident_location().is_some());
        assert!(keep.can_save());
    }

    #[test]
    fn test_empty_selection_deselects() {
        let mut a = annotator(FloorPlanSwitchPolicy::KeepLocation);
        a.select_floor_plan(Some("fp-1"));
        a.select_floor_plan(Some(""));
        assert!(a.selected_floor_plan().is_none());
    }

    #[test]
    fn test_save_disabled_without_both() {
        let api = InMemoryCaseApi::new();
        let sink = RecordingSink::new();
        let mut a = annotator(FloorPlanSwitchPolicy::ClearLocation);

        assert!(!a.can_save());
        assert_eq!(a.save(&api, "c1", &sink), SaveOutcome::Disabled);

        a.select_floor_plan(Some("fp-1"));
        assert_eq!(a.save(&api, "c1", &sink), SaveOutcome::Disabled);

        assert!(api.calls().is_empty());
        assert!(sink.received().is_empty());
    }

    #[test]
    fn test_save_success_and_failure() {
        let api = InMemoryCaseApi::with_data(vec![Case::new("c1", "Leak", CaseStatus::Open)], vec![]);
        let sink = RecordingSink::new();
        let mut a = annotator(FloorPlanSwitchPolicy::ClearLocation);
        a.select_floor_plan(Some("fp-1"));
        a.click(&RECT, &PointerEvent { client_x: 300.0, client_y: 200.0 }).unwrap();

        match a.save(&api, "c1", &sink) {
            SaveOutcome::Saved(case) => assert_eq!(case.floor_plan_id.as_deref(), Some("fp-1")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(sink.last(), Some((LOCATION_SAVED_MESSAGE.to_string(), Severity::Success)));

        api.fail_next(ApiError::Transport("refused".to_string()));
        assert!(matches!(a.save(&api, "c1", &sink), SaveOutcome::Failed(_)));
        assert_eq!(sink.last(), Some((LOCATION_SAVE_FAILED_MESSAGE.to_string(), Severity::Error)));
    }

    #[test]
    fn test_selected_image_url() {
        let plans = vec![FloorPlan {
            id: "fp-1".to_string(),
            name: "Ground".to_string(),
            image_url: "/img/ground.png".to_string(),
        }];
        let mut a = annotator(FloorPlanSwitchPolicy::ClearLocation);
        assert!(a.selected_image_url(&plans).is_none());
        a.select_floor_plan(Some("fp-1"));
        assert_eq!(a.selected_image_url(&plans), Some("/img/ground.png"));
    }
}
