//! Directions HTTP adapter for route alternatives.
//!
//! Speaks the Google Directions JSON API: one GET per request, no retries,
//! no caching.

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::error::DirectionsError;
use crate::polyline::Polyline;
use crate::route::RouteOption;
use crate::traits::{DirectionsProvider, DirectionsRequest};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Value of the `status` field on success.
const STATUS_OK: &str = "OK";

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// Full endpoint URL; query parameters are appended.
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl DirectionsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Point the client somewhere else (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }
}

impl DirectionsProvider for DirectionsClient {
    fn route_alternatives(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<RouteOption>, DirectionsError> {
        if self.config.api_key.is_empty() {
            return Err(DirectionsError::MissingApiKey);
        }
        request.validate()?;

        let origin = request.origin.to_param();
        debug!(
            origin = %origin,
            destination = %request.destination,
            max_routes = request.max_routes,
            "requesting route alternatives"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", request.destination.as_str()),
                ("mode", "driving"),
                ("alternatives", "true"),
                ("key", self.config.api_key.as_str()),
            ])
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        parse_response(status, &body, request.max_routes)
    }
}

/// Turns a raw directions response into at most `max_routes` options.
///
/// The cap applies to the upstream list before decoding; options whose
/// geometry decodes to nothing are then dropped, so fewer may come back.
pub fn parse_response(
    status: u16,
    body: &str,
    max_routes: usize,
) -> Result<Vec<RouteOption>, DirectionsError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<DirectionsResponse>(body)
            .ok()
            .and_then(|payload| non_empty(payload.error_message))
            .unwrap_or_else(|| format!("Directions request failed ({})", status));
        warn!(status, %message, "directions request rejected");
        return Err(DirectionsError::Http { status, message });
    }

    let payload: DirectionsResponse = serde_json::from_str(body)?;

    let api_status = non_empty(payload.status).unwrap_or_else(|| "UNKNOWN".to_string());
    if api_status != STATUS_OK {
        let message = non_empty(payload.error_message)
            .unwrap_or_else(|| format!("Directions error: {}", api_status));
        warn!(status = %api_status, %message, "directions service returned an error");
        return Err(DirectionsError::Status {
            status: api_status,
            message,
        });
    }

    let mut routes = payload.routes.unwrap_or_default();
    routes.truncate(max_routes);

    let options: Vec<RouteOption> = routes
        .into_par_iter()
        .filter_map(ApiRoute::into_option)
        .collect();
    trace!(count = options.len(), "decoded route alternatives");

    Ok(options)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Option<Vec<ApiRoute>>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    overview_polyline: Option<EncodedPolyline>,
    #[serde(default)]
    legs: Option<Vec<ApiLeg>>,
}

#[derive(Debug, Deserialize)]
struct EncodedPolyline {
    #[serde(default)]
    points: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    #[serde(default)]
    text: Option<String>,
}

impl ApiRoute {
    fn into_option(self) -> Option<RouteOption> {
        let leg = self.legs.and_then(|legs| legs.into_iter().next());
        let (distance, duration) = match leg {
            Some(leg) => (text_of(leg.distance), text_of(leg.duration)),
            None => (String::new(), String::new()),
        };
        let points = self
            .overview_polyline
            .and_then(|polyline| polyline.points)
            .unwrap_or_default();
        let summary = self.summary.unwrap_or_default();

        let option = RouteOption::new(summary, distance, duration, Polyline::decode(&points));
        if option.is_none() {
            trace!("dropping route alternative with empty geometry");
        }
        option
    }
}

fn text_of(value: Option<TextValue>) -> String {
    value.and_then(|v| v.text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn route(summary: &str, points: &str) -> serde_json::Value {
        json!({
            "summary": summary,
            "overview_polyline": { "points": points },
            "legs": [{
                "distance": { "text": "12.4 km", "value": 12400 },
                "duration": { "text": "21 mins", "value": 1260 }
            }]
        })
    }

    #[test]
    fn test_ok_response_maps_first_leg() {
        let body = json!({ "status": "OK", "routes": [route("NH 66", REFERENCE)] }).to_string();
        let options = parse_response(200, &body, 3).unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].summary(), "NH 66");
        assert_eq!(options[0].distance_text(), "12.4 km");
        assert_eq!(options[0].duration_text(), "21 mins");
        assert_eq!(options[0].coordinates().len(), 3);
    }

    #[test]
    fn test_cap_preserves_order() {
        let routes: Vec<_> = (1..=5).map(|i| route(&format!("R{}", i), REFERENCE)).collect();
        let body = json!({ "status": "OK", "routes": routes }).to_string();
        let options = parse_response(200, &body, 3).unwrap();

        let summaries: Vec<_> = options.iter().map(|o| o.summary()).collect();
        assert_eq!(summaries, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_cap_applies_before_filtering() {
        // The empty route counts against the cap, so only one option survives.
        let body = json!({
            "status": "OK",
            "routes": [route("empty", ""), route("kept", REFERENCE), route("late", REFERENCE)]
        })
        .to_string();
        let options = parse_response(200, &body, 2).unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].summary(), "kept");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let body = json!({
            "status": "OK",
            "routes": [
                { "overview_polyline": { "points": REFERENCE } },
                { "summary": "no geometry", "legs": [] }
            ]
        })
        .to_string();
        let options = parse_response(200, &body, 3).unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].summary(), "");
        assert_eq!(options[0].distance_text(), "");
        assert_eq!(options[0].duration_text(), "");
    }

    #[test]
    fn test_ok_without_routes_is_empty() {
        let body = json!({ "status": "OK" }).to_string();
        assert!(parse_response(200, &body, 3).unwrap().is_empty());
    }

    #[test]
    fn test_non_ok_status_surfaces_status() {
        let body = json!({ "status": "ZERO_RESULTS", "routes": [] }).to_string();
        match parse_response(200, &body, 3) {
            Err(DirectionsError::Status { status, message }) => {
                assert_eq!(status, "ZERO_RESULTS");
                assert_eq!(message, "Directions error: ZERO_RESULTS");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_ok_status_prefers_error_message() {
        let body = json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })
        .to_string();
        let err = parse_response(200, &body, 3).unwrap_err();
        assert_eq!(err.to_string(), "The provided API key is invalid.");
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let err = parse_response(200, "{}", 3).unwrap_err();
        assert!(matches!(err, DirectionsError::Status { ref status, .. } if status == "UNKNOWN"));
    }

    #[test]
    fn test_http_error_with_message() {
        let body = json!({ "status": "OVER_QUERY_LIMIT", "error_message": "quota" }).to_string();
        match parse_response(429, &body, 3) {
            Err(DirectionsError::Http { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "quota");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[test]
    fn test_http_error_fallback_message() {
        let err = parse_response(502, "<html>Bad Gateway</html>", 3).unwrap_err();
        assert_eq!(err.to_string(), "Directions request failed (502)");
    }

    #[test]
    fn test_unparseable_success_body() {
        let err = parse_response(200, "not json", 3).unwrap_err();
        assert!(matches!(err, DirectionsError::Decode(_)));
    }

    #[test]
    fn test_missing_api_key_fails_before_request() {
        // Unroutable base URL: reaching the network would surface a transport error.
        let config = DirectionsConfig::new("").with_base_url("http://127.0.0.1:9/directions");
        let client = DirectionsClient::new(config).unwrap();
        let err = client
            .route_alternatives(&DirectionsRequest::new("Kochi", "Aluva"))
            .unwrap_err();
        assert!(matches!(err, DirectionsError::MissingApiKey));
    }
}
