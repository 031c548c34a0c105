use serde::Deserialize;

use crate::models::GeoPoint;

pub const DEFAULT_ELEVATION_URL: &str = "https://maps.googleapis.com/maps/api/elevation/json";

#[derive(Debug, Clone, Deserialize)]
pub struct ElevationResponse {
    #[serde(default)]
    pub results: Vec<ElevationResult>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevationResult {
    pub elevation: f64,
    #[serde(default)]
    pub resolution: Option<f64>,
}

impl ElevationResponse {
    /// Elevation of the first result, if any.
    pub fn first_elevation(&self) -> Option<f64> {
        self.results.first().map(|r| r.elevation)
    }
}

/// Build the lookup URL for a single coordinate.
pub fn build_elevation_url(base: &str, point: GeoPoint, api_key: &str) -> String {
    format!(
        "{}?locations={},{}&key={}",
        base, point.latitude, point.longitude, api_key
    )
}

/// Parse a raw response body; any parse failure or empty result is `None`.
pub fn parse_elevation(body: &str) -> Option<f64> {
    serde_json::from_str::<ElevationResponse>(body)
        .ok()?
        .first_elevation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_elevation_url() {
        let url = build_elevation_url(
            "https://elevation.example.com/json",
            GeoPoint::new(-34.5, -58.25),
            "secret",
        );
        assert_eq!(
            url,
            "https://elevation.example.com/json?locations=-34.5,-58.25&key=secret"
        );
    }

    #[test]
    fn test_parse_first_result() {
        let body = r#"{"results":[{"elevation":1608.6,"location":{"lat":39.7,"lng":-104.9},"resolution":4.77},{"elevation":12.0}],"status":"OK"}"#;
        assert_eq!(parse_elevation(body), Some(1608.6));
    }

    #[test]
    fn test_parse_empty_results_is_none() {
        let body = r#"{"results":[],"status":"INVALID_REQUEST","error_message":"bad"}"#;
        assert_eq!(parse_elevation(body), None);
        let resp: ElevationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.error_message.as_deref(), Some("bad"));
    }

    #[test]
    fn test_parse_missing_results_or_garbage_is_none() {
        assert_eq!(parse_elevation(r#"{"status":"REQUEST_DENIED"}"#), None);
        assert_eq!(parse_elevation("<html>"), None);
    }
}
