//! Per-request fetch options and their merge rules.
//!
//! A [`Stack`](crate::Stack) carries default options; each `fetch` call may pass
//! overrides. Overrides win field by field, and nested objects in `extra` are
//! merged recursively instead of being replaced wholesale.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, time::Duration};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_LIMIT: u32 = 5;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
    /// Extra headers sent on top of the stack's auth headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Options the transport may understand that have no typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = Some(limit);
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = Some(ms);
        self
    }

    pub fn header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Returns `self` overlaid with `overrides`. Right-hand side wins.
    pub fn merge(&self, overrides: &FetchOptions) -> FetchOptions {
        let mut headers = self.headers.clone();
        headers.extend(
            overrides
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let extra = match merge_deep(
            Value::Object(self.extra.clone()),
            Value::Object(overrides.extra.clone()),
        ) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        FetchOptions {
            timeout_ms: overrides.timeout_ms.or(self.timeout_ms),
            retry_limit: overrides.retry_limit.or(self.retry_limit),
            retry_delay_ms: overrides.retry_delay_ms.or(self.retry_delay_ms),
            headers,
            extra,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn max_retries(&self) -> u32 {
        self.retry_limit.unwrap_or(DEFAULT_RETRY_LIMIT)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }
}

/// Recursively merges `right` into `left`. Objects merge key by key; any
/// other right-hand value replaces the left one.
pub fn merge_deep(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => merge_deep(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, right) => right,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{merge_deep, FetchOptions};

    #[test]
    fn merges_nested_objects_right_wins() {
        let merged = merge_deep(json!({"a": {"x": 1, "y": 2}}), json!({"a": {"y": 9, "z": 3}}));
        assert_eq!(merged, json!({"a": {"x": 1, "y": 9, "z": 3}}));
    }

    #[test]
    fn non_object_override_replaces() {
        let merged = merge_deep(json!({"a": {"x": 1}}), json!({"a": [1, 2]}));
        assert_eq!(merged, json!({"a": [1, 2]}));
    }

    #[test]
    fn options_keep_unspecified_defaults() {
        let defaults = FetchOptions::new()
            .timeout_ms(5_000)
            .retry_limit(2)
            .header("x-trace", "a")
            .extra("a", json!({"x": 1, "y": 2}));
        let overrides = FetchOptions::new()
            .retry_limit(0)
            .header("x-user", "b")
            .extra("a", json!({"y": 9, "z": 3}));

        let merged = defaults.merge(&overrides);
        assert_eq!(merged.timeout_ms, Some(5_000));
        assert_eq!(merged.retry_limit, Some(0));
        assert_eq!(merged.headers.len(), 2);
        assert_eq!(merged.extra["a"], json!({"x": 1, "y": 9, "z": 3}));
    }

    #[test]
    fn unknown_keys_land_in_extra() {
        let opts: FetchOptions =
            serde_json::from_value(json!({"timeoutMs": 10, "agent": {"keepAlive": true}})).unwrap();
        assert_eq!(opts.timeout_ms, Some(10));
        assert_eq!(opts.extra["agent"], json!({"keepAlive": true}));
    }
}
