use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    assets::Assets,
    config::{ConnectionConfig, StackConfig},
    error::{Error, Result},
    options::FetchOptions,
    transport::{HttpTransport, Transport},
};

/// Client for one stack. Holds the connection settings, the auth headers and
/// the default fetch options that every builder it creates reads from.
#[derive(Clone)]
pub struct Stack {
    connection: ConnectionConfig,
    headers: BTreeMap<String, String>,
    fetch_options: FetchOptions,
    transport: Arc<dyn Transport>,
}

impl Stack {
    pub fn new(config: StackConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::new()?))
    }

    pub fn with_transport(config: StackConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("api key must not be empty".to_string()));
        }
        if config.delivery_token.trim().is_empty() {
            return Err(Error::Config("delivery token must not be empty".to_string()));
        }

        let mut headers = BTreeMap::new();
        headers.insert("api_key".to_string(), config.api_key);
        headers.insert("access_token".to_string(), config.delivery_token);
        if let Some(environment) = config.environment.filter(|e| !e.is_empty()) {
            headers.insert("environment".to_string(), environment);
        }

        Ok(Self {
            connection: config.connection,
            headers,
            fetch_options: config.fetch_options,
            transport,
        })
    }

    /// Builder for all assets, or a single one when `uid` is given.
    pub fn assets(&self, uid: Option<&str>) -> Assets {
        Assets::new(self.clone(), uid.map(str::to_string))
    }

    pub fn asset(&self, uid: &str) -> Assets {
        self.assets(Some(uid))
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.connection
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn fetch_options(&self) -> &FetchOptions {
        &self.fetch_options
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.connection.host = host.into();
        self
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.connection.port = port;
        self
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) -> &mut Self {
        self.connection.protocol = protocol.into();
        self
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("connection", &self.connection)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("fetch_options", &self.fetch_options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Stack;
    use crate::{config::StackConfig, error::Error, testing::RecordingTransport};

    #[test]
    fn builds_delivery_headers() {
        let stack = Stack::with_transport(
            StackConfig::new("blt_key", "cs_token").environment("production"),
            Arc::new(RecordingTransport::default()),
        )
        .unwrap();

        let headers = stack.headers();
        assert_eq!(headers["api_key"], "blt_key");
        assert_eq!(headers["access_token"], "cs_token");
        assert_eq!(headers["environment"], "production");
    }

    #[test]
    fn environment_header_is_optional() {
        let stack = Stack::with_transport(
            StackConfig::new("blt_key", "cs_token"),
            Arc::new(RecordingTransport::default()),
        )
        .unwrap();
        assert!(!stack.headers().contains_key("environment"));
    }

    #[test]
    fn rejects_missing_credentials() {
        let err = Stack::with_transport(
            StackConfig::new("", "cs_token"),
            Arc::new(RecordingTransport::default()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn setters_update_connection() {
        let mut stack = Stack::with_transport(
            StackConfig::new("k", "t"),
            Arc::new(RecordingTransport::default()),
        )
        .unwrap();
        stack.set_host("localhost").set_port(8080).set_protocol("http");
        assert_eq!(stack.config().base_url(), "http://localhost:8080/v3");
    }
}
