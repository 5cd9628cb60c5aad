use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A single asset as returned by the delivery API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub uid: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Looks up any field by name, typed or not.
    pub fn get(&self, field: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.get(field).cloned().filter(|v| !v.is_null()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetResponse {
    Json(Value),
    Entry(Asset),
}

impl AssetResponse {
    /// Shapes a raw `{"asset": {...}}` payload.
    pub fn from_payload(mut payload: Value, to_json: bool) -> Result<Self> {
        let asset = match payload.get_mut("asset").map(Value::take) {
            Some(asset @ Value::Object(_)) => asset,
            _ => {
                return Err(Error::MalformedResponse(
                    "payload has no `asset` object".to_string(),
                ))
            }
        };

        if to_json {
            return Ok(AssetResponse::Json(asset));
        }
        Ok(AssetResponse::Entry(serde_json::from_value(asset)?))
    }

    pub fn to_value(&self) -> Result<Value> {
        match self {
            AssetResponse::Json(value) => Ok(value.clone()),
            AssetResponse::Entry(asset) => Ok(serde_json::to_value(asset)?),
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            AssetResponse::Json(value) => value.get("uid").and_then(Value::as_str),
            AssetResponse::Entry(asset) => Some(asset.uid.as_str()),
        }
    }
}

// file_size arrives as a number or a numeric string depending on API version.
fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AssetResponse;
    use crate::error::Error;

    fn payload() -> serde_json::Value {
        json!({
            "asset": {
                "uid": "blt0123",
                "title": "hero.png",
                "url": "https://images.example.com/hero.png",
                "filename": "hero.png",
                "content_type": "image/png",
                "file_size": "20480",
                "dimension": {"height": 600, "width": 800}
            }
        })
    }

    #[test]
    fn json_mode_returns_plain_asset_object() {
        let shaped = AssetResponse::from_payload(payload(), true).unwrap();
        match shaped {
            AssetResponse::Json(v) => assert_eq!(v["dimension"]["width"], 800),
            other => panic!("expected json, got {other:?}"),
        }
    }

    #[test]
    fn typed_mode_parses_known_fields() {
        let shaped = AssetResponse::from_payload(payload(), false).unwrap();
        let AssetResponse::Entry(asset) = shaped else {
            panic!("expected typed asset");
        };
        assert_eq!(asset.uid, "blt0123");
        assert_eq!(asset.file_size, Some(20480));
        assert_eq!(asset.content_type.as_deref(), Some("image/png"));
        assert_eq!(asset.get("dimension"), Some(json!({"height": 600, "width": 800})));
        assert_eq!(asset.get("locale"), None);
    }

    #[test]
    fn missing_asset_is_malformed() {
        let err = AssetResponse::from_payload(json!({"entries": []}), true).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
