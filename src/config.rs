use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    options::FetchOptions,
};

pub const DEFAULT_HOST: &str = "cdn.contentstack.io";
pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_VERSION: &str = "v3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    Us,
    Eu,
    AzureNa,
    AzureEu,
    GcpNa,
}

impl Region {
    pub fn host(&self) -> &'static str {
        match self {
            Region::Us => DEFAULT_HOST,
            Region::Eu => "eu-cdn.contentstack.com",
            Region::AzureNa => "azure-na-cdn.contentstack.com",
            Region::AzureEu => "azure-eu-cdn.contentstack.com",
            Region::GcpNa => "gcp-na-cdn.contentstack.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::AzureNa => "azure-na",
            Region::AzureEu => "azure-eu",
            Region::GcpNa => "gcp-na",
        }
    }

    pub fn parse(value: &str) -> Option<Region> {
        match value.to_lowercase().as_str() {
            "us" | "na" => Some(Region::Us),
            "eu" => Some(Region::Eu),
            "azure-na" => Some(Region::AzureNa),
            "azure-eu" => Some(Region::AzureEu),
            "gcp-na" => Some(Region::GcpNa),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointPaths {
    pub assets: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            assets: "/assets/".to_string(),
        }
    }
}

/// Where requests go. Owned by the [`Stack`](crate::Stack); builders only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub version: String,
    pub urls: EndpointPaths,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            version: DEFAULT_VERSION.to_string(),
            urls: EndpointPaths::default(),
        }
    }
}

impl ConnectionConfig {
    pub fn for_region(region: Region) -> Self {
        Self {
            host: region.host().to_string(),
            ..Default::default()
        }
    }

    /// `protocol://host:port/version`, the prefix every endpoint path is
    /// appended to.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.protocol, self.host, self.port, self.version
        )
    }

    pub fn asset_url(&self, uid: &str) -> String {
        format!("{}{}{}", self.base_url(), self.urls.assets, uid)
    }
}

/// Everything needed to build a [`Stack`](crate::Stack).
#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    pub api_key: String,
    pub delivery_token: String,
    pub environment: Option<String>,
    pub connection: ConnectionConfig,
    pub fetch_options: FetchOptions,
}

impl StackConfig {
    pub fn new(api_key: impl Into<String>, delivery_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            delivery_token: delivery_token.into(),
            ..Default::default()
        }
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }

    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoredConfig {
    pub api_key: Option<String>,
    pub delivery_token: Option<String>,
    pub environment: Option<String>,
    pub region: Option<Region>,
    pub host: Option<String>,
}

/// Values supplied on the command line; each one overrides env and file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub delivery_token: Option<String>,
    pub environment: Option<String>,
    pub region: Option<Region>,
    pub host: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("stackfetch").join("config.json"))
}

pub fn load_stored_config() -> Result<StoredConfig> {
    load_stored_config_from(&config_path()?)
}

pub fn load_stored_config_from(path: &Path) -> Result<StoredConfig> {
    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("reading {}: {e}", path.display())))?;
    let config = serde_json::from_str::<StoredConfig>(&content)?;
    Ok(config)
}

pub fn save_config(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &StoredConfig, path: &Path) -> Result<()> {
    let io_err = |e: std::io::Error| Error::Config(format!("writing {}: {e}", path.display()));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let body = serde_json::to_string_pretty(config)?;
    let mut file = fs::File::create(path).map_err(io_err)?;
    file.write_all(body.as_bytes()).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
    }

    Ok(())
}

pub fn delete_config() -> Result<bool> {
    let path = config_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .map_err(|e| Error::Config(format!("removing {}: {e}", path.display())))?;
        return Ok(true);
    }
    Ok(false)
}

/// Resolves each field from CLI flag, then `STACK_*` env var, then the stored
/// file, then the default.
pub fn resolve_stack_config(cli: ConfigOverrides, file_cfg: StoredConfig) -> Result<StackConfig> {
    let api_key = cli
        .api_key
        .or_else(|| env_var("STACK_API_KEY"))
        .or(file_cfg.api_key)
        .ok_or_else(|| {
            Error::Config(
                "missing api key. Configure via `stack config setup`, STACK_API_KEY, or --api-key"
                    .to_string(),
            )
        })?;

    let delivery_token = cli
        .delivery_token
        .or_else(|| env_var("STACK_DELIVERY_TOKEN"))
        .or(file_cfg.delivery_token)
        .ok_or_else(|| {
            Error::Config(
                "missing delivery token. Configure via `stack config setup`, STACK_DELIVERY_TOKEN, or --delivery-token"
                    .to_string(),
            )
        })?;

    let environment = cli
        .environment
        .or_else(|| env_var("STACK_ENVIRONMENT"))
        .or(file_cfg.environment);

    let region = cli
        .region
        .or_else(|| env_var("STACK_REGION").and_then(|r| Region::parse(&r)))
        .or(file_cfg.region)
        .unwrap_or_default();

    let mut connection = ConnectionConfig::for_region(region);
    if let Some(host) = cli
        .host
        .or_else(|| env_var("STACK_HOST"))
        .or(file_cfg.host)
    {
        connection.host = host;
    }

    Ok(StackConfig {
        api_key,
        delivery_token,
        environment,
        connection,
        fetch_options: FetchOptions::default(),
    })
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
