//! Fluent builder for asset requests.
//!
//! ```no_run
//! # async fn example(stack: stackfetch::Stack) -> stackfetch::Result<()> {
//! let _asset = stack
//!     .asset("blt19c34e5374418484")
//!     .add_param("include_dimension", "true")?
//!     .include_fallback()
//!     .to_json()
//!     .fetch(None)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Listing every asset of a stack is not served by this builder; `fetch`
//! without a uid fails with [`Error::MissingIdentifier`].

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    options::FetchOptions,
    query::QueryParams,
    request::{RequestContext, RequestDescriptor},
    response::AssetResponse,
    stack::Stack,
};

#[derive(Debug, Clone)]
pub struct Assets {
    stack: Stack,
    uid: Option<String>,
    query: QueryParams,
    to_json: bool,
}

impl Assets {
    pub fn new(stack: Stack, uid: Option<String>) -> Self {
        Self {
            stack,
            uid,
            query: QueryParams::new(),
            to_json: false,
        }
    }

    /// Return the plain JSON asset object instead of a typed [`Asset`](crate::Asset).
    #[allow(clippy::wrong_self_convention)]
    pub fn to_json(&mut self) -> &mut Self {
        self.to_json = true;
        self
    }

    /// Adds a query parameter. Both `key` and `value` must be non-empty; on
    /// error the query is left untouched.
    pub fn add_param(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        if key.is_empty() || value.is_empty() {
            warn!(key, value, "rejected asset query parameter");
            return Err(Error::invalid_parameter(key, value));
        }
        self.query.insert(key, value);
        Ok(self)
    }

    /// Serve the fallback locale's published content when the requested
    /// locale has none.
    pub fn include_fallback(&mut self) -> &mut Self {
        self.query.insert("include_fallback", true);
        self
    }

    /// Restricts the returned fields. Repeated calls accumulate.
    pub fn only(&mut self, fields: &[&str]) -> Result<&mut Self> {
        if fields.is_empty() {
            warn!("rejected empty projection");
            return Err(Error::invalid_parameter("only", ""));
        }
        if let Some(empty) = fields.iter().find(|f| f.trim().is_empty()) {
            warn!(field = empty, "rejected empty projection field");
            return Err(Error::invalid_parameter("only", empty));
        }
        self.query.push_projection("only", fields);
        Ok(self)
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn wants_json(&self) -> bool {
        self.to_json
    }

    pub fn build_request(&self) -> Result<RequestDescriptor> {
        let uid = self
            .uid
            .as_deref()
            .filter(|uid| !uid.is_empty())
            .ok_or(Error::MissingIdentifier)?;

        Ok(RequestDescriptor::tunneled_get(
            self.stack.config().asset_url(uid),
            self.stack.headers().clone(),
            self.query.clone(),
        ))
    }

    /// Fetches the asset. `overrides` are merged over the stack's default
    /// options, nested values included.
    pub async fn fetch(&self, overrides: Option<FetchOptions>) -> Result<AssetResponse> {
        let request = self.build_request()?;
        let options = match &overrides {
            Some(o) => self.stack.fetch_options().merge(o),
            None => self.stack.fetch_options().clone(),
        };

        debug!(url = %request.url, params = self.query.len(), to_json = self.to_json, "fetching asset");
        let ctx = RequestContext {
            request,
            to_json: self.to_json,
        };
        let payload = self.stack.transport().send(&ctx, &options).await?;
        AssetResponse::from_payload(payload, self.to_json)
    }
}
