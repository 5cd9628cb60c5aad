use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::query::QueryParams;

/// The request the gateway expects: a POST whose body carries the real verb
/// in `_method` alongside the query.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub url: String,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(rename = "_method")]
    pub method: String,
    pub query: QueryParams,
}

impl RequestDescriptor {
    /// A GET carried over POST.
    pub fn tunneled_get(url: String, headers: BTreeMap<String, String>, query: QueryParams) -> Self {
        Self {
            method: Method::POST,
            headers,
            url,
            body: RequestBody {
                method: Method::GET.to_string(),
                query,
            },
        }
    }
}

/// What a [`Transport`](crate::Transport) receives for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub request: RequestDescriptor,
    /// Caller asked for the plain JSON payload instead of typed values.
    pub to_json: bool,
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;
    use std::collections::BTreeMap;

    use super::RequestDescriptor;
    use crate::query::QueryParams;

    #[test]
    fn body_carries_get_marker() {
        let mut query = QueryParams::new();
        query.insert("include_dimension", "true");
        let req = RequestDescriptor::tunneled_get(
            "https://api.example.com:443/v3/assets/abc123".into(),
            BTreeMap::new(),
            query,
        );

        assert_eq!(req.method, Method::POST);
        assert_eq!(
            serde_json::to_value(&req.body).unwrap(),
            json!({"_method": "GET", "query": {"include_dimension": "true"}})
        );
    }
}
