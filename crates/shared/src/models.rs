use serde::{Deserialize, Serialize};
#[cfg(feature = "uuid-support")]
use uuid::Uuid;

/// Minimum number of vertices a polygon needs before it can be submitted.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Potato varieties offered in the labeling form. The first entry is the default.
pub const VARIETIES: &[&str] = &[
    "Criolla",
    "Alpha",
    "Spunta",
    "Kennebec",
    "Atlantic",
    "Innovator",
    "Bintje",
    "Frital",
    "Pampeana",
    "Asterix",
];

/// Default variety selection for a fresh form.
pub fn default_variety() -> String {
    VARIETIES[0].to_string()
}

/// A WGS84 coordinate as reported by the location provider or a map click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Flat `[lat, lng]` pair used on the wire.
    pub fn to_pair(self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    pub fn from_pair(pair: [f64; 2]) -> Self {
        GeoPoint::new(pair[0], pair[1])
    }
}

/// Body of `POST /labeling`.
///
/// Ages that could not be parsed from the form travel as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingRequest {
    pub poly: Vec<[f64; 2]>,
    #[serde(rename = "variedad")]
    pub variety: String,
    #[serde(rename = "edadMin")]
    pub min_age: Option<i64>,
    #[serde(rename = "edadMax")]
    pub max_age: Option<i64>,
}

impl LabelingRequest {
    pub fn new(
        vertices: &[GeoPoint],
        variety: &str,
        min_age: Option<i64>,
        max_age: Option<i64>,
    ) -> Self {
        LabelingRequest {
            poly: vertices.iter().map(|p| p.to_pair()).collect(),
            variety: variety.to_string(),
            min_age,
            max_age,
        }
    }

    pub fn vertices(&self) -> Vec<GeoPoint> {
        self.poly.iter().copied().map(GeoPoint::from_pair).collect()
    }

    pub fn is_submittable(&self) -> bool {
        self.poly.len() >= MIN_POLYGON_VERTICES
    }
}

/// A label as persisted by the labeling service.
#[cfg(feature = "uuid-support")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLabel {
    pub id: Uuid,
    pub poly: Vec<[f64; 2]>,
    pub variety: String,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub created_at: String,
}

#[cfg(feature = "uuid-support")]
impl StoredLabel {
    pub fn from_request(request: LabelingRequest, created_at: String) -> Self {
        StoredLabel {
            id: Uuid::new_v4(),
            poly: request.poly,
            variety: request.variety,
            min_age: request.min_age,
            max_age: request.max_age,
            created_at,
        }
    }
}

/// Acknowledgment returned by `POST /labeling`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingAck {
    pub id: String,
    pub status: String,
    pub vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_wire_names() {
        let req = LabelingRequest::new(
            &[
                GeoPoint::new(10.0, 20.0),
                GeoPoint::new(10.0, 21.0),
                GeoPoint::new(11.0, 20.5),
            ],
            "Criolla",
            Some(30),
            Some(90),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "poly": [[10.0, 20.0], [10.0, 21.0], [11.0, 20.5]],
                "variedad": "Criolla",
                "edadMin": 30,
                "edadMax": 90
            })
        );
    }

    #[test]
    fn test_request_unparsed_ages_are_null() {
        let req = LabelingRequest::new(&[], "Spunta", None, Some(4));
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["edadMin"].is_null());
        assert_eq!(json["edadMax"], 4);
    }

    #[test]
    fn test_request_deserializes_from_wire() {
        let body = r#"{"poly":[[1.5,2.5],[3,4]],"variedad":"Alpha","edadMin":null,"edadMax":12}"#;
        let req: LabelingRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.poly, vec![[1.5, 2.5], [3.0, 4.0]]);
        assert_eq!(req.variety, "Alpha");
        assert_eq!(req.min_age, None);
        assert_eq!(req.max_age, Some(12));
        assert!(!req.is_submittable());
    }

    #[test]
    fn test_vertices_round_trip_preserves_order() {
        let points = vec![GeoPoint::new(-34.6, -58.4), GeoPoint::new(-34.7, -58.5)];
        let req = LabelingRequest::new(&points, "Bintje", None, None);
        assert_eq!(req.vertices(), points);
    }

    #[test]
    fn test_default_variety_is_first_in_catalog() {
        assert_eq!(default_variety(), "Criolla");
        assert!(VARIETIES.contains(&"Spunta"));
    }

    #[cfg(feature = "uuid-support")]
    #[test]
    fn test_stored_label_camel_case() {
        let req = LabelingRequest::new(&[GeoPoint::new(1.0, 2.0)], "Alpha", Some(1), None);
        let label = StoredLabel::from_request(req, "2024-01-01T00:00:00Z".to_string());
        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["variety"], "Alpha");
        assert_eq!(json["minAge"], 1);
        assert!(json["maxAge"].is_null());
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
    }
}
