use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Row id assigned by the swim API. Older rows carry numeric ids, newer ones strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwimId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SwimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwimId::Number(n) => write!(f, "{}", n),
            SwimId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SwimId {
    fn from(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(SwimId::Number)
            .unwrap_or_else(|_| SwimId::Text(raw.to_string()))
    }
}

/// One logged swim as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimRecord {
    pub id: SwimId,
    #[serde(rename = "datum")]
    pub date: String,
    #[serde(rename = "strecke", deserialize_with = "distance_from_number_or_string")]
    pub distance_meters: f64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "kommentar", default)]
    pub comment: String,
}

/// Payload posted by the add form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSwim {
    pub datum: String,
    pub strecke: f64,
    pub dolphin: String,
    pub etappe: String,
}

/// Route vertex, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

impl RoutePoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for RoutePoint {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<RoutePoint> for [f64; 2] {
    fn from(point: RoutePoint) -> Self {
        [point.lat, point.lng]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteProgress {
    pub swum: Vec<RoutePoint>,
    pub swum_vertices: usize,
    pub total_vertices: usize,
    pub route_meters: f64,
    pub swum_meters: f64,
    pub remaining_meters: f64,
    pub completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_meters: f64,
    pub swims: Vec<SwimRecord>,
    pub progress: RouteProgress,
}

fn distance_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid strecke '{}': {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swim_record_reads_api_field_names() {
        let json = serde_json::json!([
            {"id": 1, "datum": "2023-07-01", "strecke": 1500, "name": "Flipper", "kommentar": "Etappe 1"},
            {"id": "abc", "datum": "2023-07-02", "strecke": "750.5", "name": "Flipper", "kommentar": ""}
        ]);

        let swims: Vec<SwimRecord> = serde_json::from_value(json).unwrap();

        assert_eq!(swims[0].id, SwimId::Number(1));
        assert_eq!(swims[0].distance_meters, 1500.0);
        assert_eq!(swims[0].comment, "Etappe 1");
        assert_eq!(swims[1].id, SwimId::Text("abc".to_string()));
        assert_eq!(swims[1].distance_meters, 750.5);
    }

    #[test]
    fn test_route_point_is_lat_lng_pair() {
        let route: Vec<RoutePoint> = serde_json::from_str("[[54.3, 10.1], [54.4, 10.2]]").unwrap();
        assert_eq!(route[1], RoutePoint::new(54.4, 10.2));
        assert_eq!(serde_json::to_string(&route[0]).unwrap(), "[54.3,10.1]");
    }

    #[test]
    fn test_swim_id_from_cli_argument() {
        assert_eq!(SwimId::from("42"), SwimId::Number(42));
        assert_eq!(SwimId::from("x-1"), SwimId::Text("x-1".to_string()));
    }
}
