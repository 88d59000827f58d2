//! Transport configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied to the underlying `reqwest::Client`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReqwestTransportConfig {
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Timeout applied when the request options carry no `timeout_ms`
    pub timeout_ms: Option<u64>,
    /// Honor `HTTP_PROXY`-style environment variables
    pub use_system_proxy: bool,
}

impl ReqwestTransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ReqwestTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("httpback/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: None,
            use_system_proxy: true,
        }
    }
}
