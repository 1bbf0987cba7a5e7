//! Claim to GeoJSON feature translation

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use serde_json::Value as JsonValue;

use crate::claim::ClaimRecord;
use crate::coordinates::{self, parse_degrees as as_number};

/// Payload marker that flags a claim as an emergency
pub const SOS_MARKER: &str = "#SOS";

/// Reward points per unit of trust score
pub const REWARD_UNIT: i64 = 1000;

const DEFAULT_TRUST_SCORE: i64 = 0;
const DEFAULT_REWARD_MULTIPLIER: i64 = 1;

/// Properties attached to every claim feature
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimProperties {
    pub creator: Option<String>,
    pub score: i64,
    pub is_emergency: bool,
    pub reward: i64,
}

impl ClaimProperties {
    /// Derive map properties from a raw claim
    pub fn from_claim(claim: &ClaimRecord) -> Self {
        let score = claim
            .trust_score
            .as_ref()
            .and_then(as_integer)
            .unwrap_or(DEFAULT_TRUST_SCORE);

        // The emergency check looks at the multiplier before truncation,
        // so 1.5 counts as boosted even though it rewards like 1.
        let raw_multiplier = claim.reward_multiplier.as_ref().and_then(as_number);
        let multiplier = claim
            .reward_multiplier
            .as_ref()
            .and_then(as_integer)
            .unwrap_or(DEFAULT_REWARD_MULTIPLIER);

        let payload = claim
            .payload
            .as_ref()
            .and_then(JsonValue::as_str)
            .unwrap_or_default();

        let is_emergency = payload.contains(SOS_MARKER)
            || raw_multiplier.unwrap_or(DEFAULT_REWARD_MULTIPLIER as f64) > 1.0;

        Self {
            creator: claim
                .creator
                .as_ref()
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            score,
            is_emergency,
            reward: score.saturating_mul(multiplier).saturating_mul(REWARD_UNIT),
        }
    }

    /// GeoJSON `properties` member; `creator` is always present, `null` if unknown
    fn into_object(self) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(
            "creator".to_string(),
            self.creator.map_or(JsonValue::Null, JsonValue::String),
        );
        map.insert("score".to_string(), JsonValue::from(self.score));
        map.insert("is_emergency".to_string(), JsonValue::Bool(self.is_emergency));
        map.insert("reward".to_string(), JsonValue::from(self.reward));
        map
    }
}

/// Read a JSON number or numeric string as an integer, truncating fractions
fn as_integer(value: &JsonValue) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(n) = value.as_str().and_then(|s| s.trim().parse::<i64>().ok()) {
        return Some(n);
    }
    as_number(value).map(|f| f.trunc() as i64)
}

/// Translate one claim into a GeoJSON point feature
pub fn to_feature(claim: &ClaimRecord) -> Feature {
    let position = coordinates::normalize(claim.latitude.as_ref(), claim.longitude.as_ref());
    let properties = ClaimProperties::from_claim(claim);

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::Point(position.to_geojson()))),
        id: None,
        properties: Some(properties.into_object()),
        foreign_members: None,
    }
}

/// Translate a claim list into a feature collection, keeping upstream order
pub fn to_feature_collection(claims: &[ClaimRecord]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: claims.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim(value: JsonValue) -> ClaimRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sos_claim() {
        let record = claim(json!({
            "latitude": 37566500,
            "longitude": 126978000,
            "trust_score": 50,
            "reward_multiplier": 2,
            "payload": "help #SOS"
        }));

        let feature = serde_json::to_value(to_feature(&record)).unwrap();

        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], json!([126.978, 37.5665]));
        assert_eq!(feature["properties"]["score"], 50);
        assert_eq!(feature["properties"]["is_emergency"], true);
        assert_eq!(feature["properties"]["reward"], 100000);
    }

    #[test]
    fn test_empty_claim() {
        let feature = serde_json::to_value(to_feature(&ClaimRecord::default())).unwrap();

        assert_eq!(feature["geometry"]["coordinates"], json!([126.978, 37.5665]));
        assert_eq!(feature["properties"]["creator"], JsonValue::Null);
        assert_eq!(feature["properties"]["score"], 0);
        assert_eq!(feature["properties"]["is_emergency"], false);
        assert_eq!(feature["properties"]["reward"], 0);
    }

    #[test]
    fn test_properties_object_keys() {
        let feature = to_feature(&claim(json!({"creator": "cosmos1abc", "trust_score": 4})));
        let properties = feature.properties.unwrap();

        let mut keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["creator", "is_emergency", "reward", "score"]);
        assert_eq!(properties["creator"], "cosmos1abc");
        assert_eq!(properties["score"], 4);
        assert_eq!(properties["reward"], 4000);
    }

    #[test]
    fn test_emergency_from_payload_only() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "payload": "road blocked #SOS",
            "reward_multiplier": 1
        })));
        assert!(props.is_emergency);
    }

    #[test]
    fn test_emergency_from_multiplier_only() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "payload": "all clear",
            "reward_multiplier": "3"
        })));
        assert!(props.is_emergency);

        let props = ClaimProperties::from_claim(&claim(json!({"reward_multiplier": 1.5})));
        assert!(props.is_emergency);
        assert_eq!(props.reward, 0);
    }

    #[test]
    fn test_not_emergency() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "payload": "#sos is case sensitive",
            "reward_multiplier": 1
        })));
        assert!(!props.is_emergency);

        let props = ClaimProperties::from_claim(&claim(json!({"reward_multiplier": 0})));
        assert!(!props.is_emergency);

        let props = ClaimProperties::from_claim(&claim(json!({"payload": 7})));
        assert!(!props.is_emergency);
    }

    #[test]
    fn test_reward() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "trust_score": "80",
            "reward_multiplier": "3"
        })));
        assert_eq!(props.score, 80);
        assert_eq!(props.reward, 240_000);

        // Multiplier defaults to 1
        let props = ClaimProperties::from_claim(&claim(json!({"trust_score": 7})));
        assert_eq!(props.reward, 7000);

        // Fractions truncate before multiplying
        let props = ClaimProperties::from_claim(&claim(json!({
            "trust_score": 9.9,
            "reward_multiplier": "2.7"
        })));
        assert_eq!(props.score, 9);
        assert_eq!(props.reward, 18_000);
    }

    #[test]
    fn test_unparseable_score_defaults_to_zero() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "trust_score": "high",
            "reward_multiplier": 2
        })));
        assert_eq!(props.score, 0);
        assert_eq!(props.reward, 0);

        let props = ClaimProperties::from_claim(&claim(json!({"trust_score": null})));
        assert_eq!(props.score, 0);
    }

    #[test]
    fn test_reward_saturates() {
        let props = ClaimProperties::from_claim(&claim(json!({
            "trust_score": i64::MAX,
            "reward_multiplier": 2
        })));
        assert_eq!(props.reward, i64::MAX);
    }

    #[test]
    fn test_creator_passthrough() {
        let props = ClaimProperties::from_claim(&claim(json!({"creator": "cosmos1abc"})));
        assert_eq!(props.creator.as_deref(), Some("cosmos1abc"));

        let props = ClaimProperties::from_claim(&claim(json!({"creator": null})));
        assert_eq!(props.creator, None);
    }

    #[test]
    fn test_collection_preserves_order() {
        let records = vec![
            claim(json!({"creator": "a", "latitude": 1.0, "longitude": 2.0})),
            claim(json!({"creator": "b", "latitude": "not a number"})),
            claim(json!({"creator": "c", "latitude": 3000000, "longitude": 4000000})),
        ];

        let collection = serde_json::to_value(to_feature_collection(&records)).unwrap();
        let features = collection["features"].as_array().unwrap();

        assert_eq!(collection["type"], "FeatureCollection");
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["properties"]["creator"], "a");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([2.0, 1.0]));
        assert_eq!(features[1]["properties"]["creator"], "b");
        assert_eq!(features[1]["geometry"]["coordinates"], json!([126.978, 37.5665]));
        assert_eq!(features[2]["properties"]["creator"], "c");
        assert_eq!(features[2]["geometry"]["coordinates"], json!([4.0, 3.0]));
    }

    #[test]
    fn test_empty_collection() {
        let collection = serde_json::to_value(to_feature_collection(&[])).unwrap();
        assert_eq!(collection, json!({"type": "FeatureCollection", "features": []}));
    }
}
