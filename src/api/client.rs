//! HTTP implementation of the case API.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::models::{Case, CaseUpdateRequest, FloorPlan, NewCase};

use super::error::ApiError;

/// REST endpoints consumed by the case views.
///
/// No retries and no backoff: a failed call is reported once and the caller
/// decides what the user sees.
pub trait CaseApi: Send + Sync {
    /// `GET /cases`
    fn list_cases(&self) -> Result<Vec<Case>, ApiError>;

    /// `GET /cases/:id`
    fn get_case(&self, id: &str) -> Result<Case, ApiError>;

    /// `POST /cases`
    fn create_case(&self, new_case: &NewCase) -> Result<Case, ApiError>;

    /// `PUT /cases/:id`
    fn update_case(&self, id: &str, update: &CaseUpdateRequest) -> Result<Case, ApiError>;

    /// `GET /floor-plans`
    fn list_floor_plans(&self) -> Result<Vec<FloorPlan>, ApiError>;
}

/// Blocking HTTP client for the case API.
#[derive(Debug, Clone)]
pub struct HttpCaseApi {
    base_url: Url,
    client: Client,
}

impl HttpCaseApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(trimmed.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send<T: DeserializeOwned>(&self, method: &str, request: RequestBuilder, url: &Url) -> Result<T, ApiError> {
        let path = url.path();
        log::debug!("API_REQUEST method={} path={}", method, path);

        let response = request.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::warn!(
                "API_ERROR_STATUS method={} path={} status={}",
                method,
                path,
                status.as_u16()
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes()?;
        serde_json::from_slice(&bytes).map_err(|e| {
            log::warn!("API_DECODE_FAILED method={} path={} error={}", method, path, e);
            ApiError::Decode(e.to_string())
        })
    }
}

impl CaseApi for HttpCaseApi {
    fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        let url = self.url(&["cases"])?;
        self.send("GET", self.client.get(url.clone()), &url)
    }

    fn get_case(&self, id: &str) -> Result<Case, ApiError> {
        let url = self.url(&["cases", id])?;
        self.send("GET", self.client.get(url.clone()), &url)
    }

    fn create_case(&self, new_case: &NewCase) -> Result<Case, ApiError> {
        let url = self.url(&["cases"])?;
        self.send("POST", self.client.post(url.clone()).json(new_case), &url)
    }

    fn update_case(&self, id: &str, update: &CaseUpdateRequest) -> Result<Case, ApiError> {
        let url = self.url(&["cases", id])?;
        self.send("PUT", self.client.put(url.clone()).json(update), &url)
    }

    fn list_floor_plans(&self) -> Result<Vec<FloorPlan>, ApiError> {
        let url = self.url(&["floor-plans"])?;
        self.send("GET", self.client.get(url.clone()), &url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseStatus, IncidentLocation};

    fn api_for(server: &mockito::ServerGuard) -> HttpCaseApi {
        HttpCaseApi::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpCaseApi::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000/api");
        assert_eq!(
            api.url(&["cases"]).unwrap().as_str(),
            "http://localhost:3000/api/cases"
        );
    }

    #[test]
    fn test_case_id_is_one_encoded_segment() {
        let api = HttpCaseApi::new("http://localhost:3000/api", Duration::from_secs(1)).unwrap();
        let url = api.url(&["cases", "a/b?x#y"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/cases/a%2Fb%3Fx%23y");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let root = HttpCaseApi::new("http://localhost:3000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            root.url(&["floor-plans"]).unwrap().as_str(),
            "http://localhost:3000/floor-plans"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpCaseApi::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_list_cases() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/cases")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": "c1", "title": "Server Outage", "status": "open", "createdAt": "2026-01-29T00:00:00Z"}]"#,
            )
            .create();

        let cases = api_for(&server).list_cases().unwrap();
        mock.assert();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].status, CaseStatus::Open);
    }

    #[test]
    fn test_update_case_sends_location() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/cases/c1")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "floorPlanId": "fp-1",
                "incidentLocation": {"x": 0.5, "y": 0.25}
            })))
            .with_status(200)
            .with_body(
                r#"{"id": "c1", "title": "Leak", "status": "open", "createdAt": "2026-01-29T00:00:00Z",
                    "floorPlanId": "fp-1", "incidentLocation": {"x": 0.5, "y": 0.25}}"#,
            )
            .create();

        let update = CaseUpdateRequest::incident_location("fp-1", IncidentLocation::new(0.5, 0.25));
        let case = api_for(&server).update_case("c1", &update).unwrap();
        mock.assert();
        assert_eq!(case.floor_plan_id.as_deref(), Some("fp-1"));
    }

    #[test]
    fn test_error_status_is_reported() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/floor-plans")
            .with_status(503)
            .with_body("unavailable")
            .create();

        let err = api_for(&server).list_floor_plans().unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 503,
                body: "unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_bad_body_is_decode_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/cases/c1")
            .with_status(200)
            .with_body("not json")
            .create();

        let err = api_for(&server).get_case("c1").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
