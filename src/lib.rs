//! Delivery SDK for fetching assets from a content stack.
//!
//! ```no_run
//! use stackfetch::{Stack, StackConfig};
//!
//! # async fn example() -> stackfetch::Result<()> {
//! let stack = Stack::new(StackConfig::new("api_key", "delivery_token").environment("production"))?;
//! let mut assets = stack.asset("blt19c34e5374418484");
//! assets.include_fallback().to_json();
//! let asset = assets.fetch(None).await?;
//! println!("{:?}", asset.uid());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod options;
pub mod query;
pub mod request;
pub mod response;
pub mod stack;
pub mod transport;

#[cfg(test)]
mod testing;

pub use assets::Assets;
pub use config::{ConnectionConfig, EndpointPaths, Region, StackConfig};
pub use error::{Error, Result};
pub use options::{merge_deep, FetchOptions};
pub use query::QueryParams;
pub use request::{RequestBody, RequestContext, RequestDescriptor};
pub use response::{Asset, AssetResponse};
pub use stack::Stack;
pub use transport::{HttpTransport, Transport};
