//! Case documents and request bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "closed")]
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Open, CaseStatus::InProgress, CaseStatus::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::InProgress => "in progress",
            CaseStatus::Closed => "closed",
        }
    }

    /// Human label used by the dashboard and status selector.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CaseStatus::Open),
            "in progress" => Ok(CaseStatus::InProgress),
            "closed" => Ok(CaseStatus::Closed),
            other => Err(format!("unknown case status: {}", other)),
        }
    }
}

/// Fractional position of an incident on a floor-plan image.
///
/// Both axes are relative to the image's rendered bounding box, so `(0, 0)`
/// is the top-left corner and `(1, 1)` the bottom-right regardless of the
/// pixel size the image was displayed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncidentLocation {
    pub x: f64,
    pub y: f64,
}

impl IncidentLocation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    pub id: String,
    pub user: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub uploaded_at: String,
    pub uploaded_by: String,
}

/// An incident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: CaseStatus,
    pub created_at: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub updates: Vec<CaseUpdate>,
    #[serde(default)]
    pub files: Vec<CaseFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_location: Option<IncidentLocation>,
}

impl Case {
    /// Minimal case, mostly useful for fixtures.
    pub fn new(id: &str, title: &str, status: CaseStatus) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status,
            created_at: chrono::Utc::now().to_rfc3339(),
            assigned_to: String::new(),
            updates: Vec::new(),
            files: Vec::new(),
            floor_plan_id: None,
            incident_location: None,
        }
    }

    /// The incident location, only when a floor plan is linked.
    pub fn located_incident(&self) -> Option<(&str, IncidentLocation)> {
        match (&self.floor_plan_id, self.incident_location) {
            (Some(plan), Some(loc)) => Some((plan.as_str(), loc)),
            _ => None,
        }
    }
}

/// Body of `POST /cases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCase {
    pub title: String,
    pub description: String,
}

/// Body of `PUT /cases/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_location: Option<IncidentLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<CaseUpdate>>,
}

impl CaseUpdateRequest {
    pub fn incident_location(floor_plan_id: &str, location: IncidentLocation) -> Self {
        Self {
            floor_plan_id: Some(floor_plan_id.to_string()),
            incident_location: Some(location),
            ..Self::default()
        }
    }

    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn updates(updates: Vec<CaseUpdate>) -> Self {
        Self {
            updates: Some(updates),
            ..Self::default()
        }
    }
}
