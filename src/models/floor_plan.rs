//! Floor-plan documents.

use serde::{Deserialize, Serialize};

/// A reference image against which incidents are pinned. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// Find a floor plan by id.
pub fn find_floor_plan<'a>(plans: &'a [FloorPlan], id: &str) -> Option<&'a FloorPlan> {
    plans.iter().find(|fp| fp.id == id)
}
