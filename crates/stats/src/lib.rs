// Coding-activity stats from WakaTime, optionally through a CORS relay

pub mod client;
pub mod error;
pub mod summary;

use async_trait::async_trait;
use serde_json::Value;

pub use client::{StatsClient, basic_authorization};
pub use error::{FetchError, Result};
pub use summary::{ActivitySummary, summarize};

/// Anything that can answer a stats endpoint with a JSON payload
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<Value>;
}
