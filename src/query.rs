use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Query parameters carried in the request body. Keys are unique; the last
/// write wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryParams {
    params: BTreeMap<String, Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Appends `fields` under `key` as `{"BASE": [...]}`, skipping fields
    /// already present.
    pub fn push_projection(&mut self, key: &str, fields: &[&str]) -> &mut Self {
        let entry = self
            .params
            .entry(key.to_string())
            .or_insert_with(|| json!({ "BASE": [] }));

        if !entry.get("BASE").is_some_and(Value::is_array) {
            *entry = json!({ "BASE": [] });
        }

        if let Some(Value::Array(base)) = entry.get_mut("BASE") {
            for field in fields {
                if !base.iter().any(|v| v.as_str() == Some(field)) {
                    base.push(Value::String(field.to_string()));
                }
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::QueryParams;

    #[test]
    fn last_write_wins() {
        let mut q = QueryParams::new();
        q.insert("locale", "en-us").insert("locale", "fr-fr");
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("locale"), Some(&json!("fr-fr")));
    }

    #[test]
    fn projection_appends_without_duplicates() {
        let mut q = QueryParams::new();
        q.push_projection("only", &["title", "url"]);
        q.push_projection("only", &["url", "filename"]);
        assert_eq!(
            q.get("only"),
            Some(&json!({ "BASE": ["title", "url", "filename"] }))
        );
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut q = QueryParams::new();
        q.insert("include_dimension", "true").insert("include_fallback", true);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({ "include_dimension": "true", "include_fallback": true })
        );
    }
}
