use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Claim record as served by the node (`reality` module)
///
/// Every field is optional and kept as a raw JSON value: the node encodes
/// 64-bit integers as strings, older records store plain numbers, and some
/// fields are missing entirely. Interpretation happens in `coordinates` and
/// `feature`, never during deserialization. A field that is present but
/// `null` stays `Some(JsonValue::Null)` so it can be told apart from a
/// missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClaimRecord {
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub creator: Option<JsonValue>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<JsonValue>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<JsonValue>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<JsonValue>,

    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub reward_multiplier: Option<JsonValue>,
}

/// Response of `GET /contactical/reality/v1/claim`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub claim: Vec<ClaimRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<JsonValue>,
}

/// Response of `GET /contactical/reality/v1/claim/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimEnvelope {
    pub claim: ClaimRecord,
}

fn keep_null<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ClaimRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ClaimRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_deserialization() {
        let body = json!({
            "claim": [
                {
                    "id": "1",
                    "creator": "cosmos1abc",
                    "latitude": "37566500",
                    "longitude": "126978000",
                    "payload": "help #SOS",
                    "trust_score": "50",
                    "reward_multiplier": "2",
                    "sensor_hash": "deadbeef"
                },
                {}
            ],
            "pagination": {"next_key": null, "total": "2"}
        });

        let list: ClaimList = serde_json::from_value(body).unwrap();

        assert_eq!(list.claim.len(), 2);
        assert_eq!(list.claim[0].creator, Some(json!("cosmos1abc")));
        assert_eq!(list.claim[0].latitude, Some(json!("37566500")));
        assert_eq!(list.claim[1], ClaimRecord::default());
        assert!(list.pagination.is_some());
    }

    #[test]
    fn test_missing_claim_field_is_empty() {
        let list: ClaimList = serde_json::from_str("{}").unwrap();
        assert!(list.claim.is_empty());

        let list: ClaimList = serde_json::from_str(r#"{"claim": null}"#).unwrap();
        assert!(list.claim.is_empty());
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let record: ClaimRecord = serde_json::from_str(r#"{"latitude": null}"#).unwrap();
        assert_eq!(record.latitude, Some(JsonValue::Null));
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn test_non_object_claim_is_rejected() {
        let result: Result<ClaimList, _> = serde_json::from_str(r#"{"claim": [42]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_deserialization() {
        let envelope: ClaimEnvelope =
            serde_json::from_str(r#"{"claim": {"creator": "cosmos1xyz"}}"#).unwrap();
        assert_eq!(envelope.claim.creator, Some(json!("cosmos1xyz")));
    }
}
