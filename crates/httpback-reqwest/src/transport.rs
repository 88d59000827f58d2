//! Transport performing real HTTP requests with reqwest.

use crate::config::ReqwestTransportConfig;
use crate::outcome::{error_args, response_args, ErrorCode};
use httpback_core::{Callback, CallbackArgs, RequestOptions, Transport, STANDARD_OPERATIONS};
use reqwest::{Method, RequestBuilder};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::debug;

/// Errors raised while constructing a [`ReqwestTransport`]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Transport sending requests with a shared `reqwest::Client`.
///
/// Every request runs on a task spawned onto the runtime the transport was built with, so
/// the callback runs on that runtime, possibly before [`Transport::invoke`] returns on a
/// multi-thread runtime. If the runtime has shut down the task is dropped and the callback
/// is never called.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    runtime: Handle,
    default_timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Transport with default settings on the current tokio runtime
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ReqwestTransportConfig::default())
    }

    /// Transport on the current tokio runtime
    pub fn with_config(config: ReqwestTransportConfig) -> Result<Self, TransportError> {
        Self::with_handle(config, Handle::try_current()?)
    }

    /// Transport spawning its requests onto `runtime`
    pub fn with_handle(
        config: ReqwestTransportConfig,
        runtime: Handle,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            runtime,
            default_timeout: config.timeout(),
        })
    }

    fn build_request(
        &self,
        operation: &str,
        options: &RequestOptions,
    ) -> Result<RequestBuilder, CallbackArgs> {
        let method = operation_method(operation).ok_or_else(|| {
            error_args(
                ErrorCode::Request,
                format!("unsupported operation: {}", operation),
            )
        })?;
        let url = options
            .url()
            .ok_or_else(|| error_args(ErrorCode::InvalidUrl, "request options carry no url"))?;
        let url = reqwest::Url::parse(url)
            .map_err(|e| error_args(ErrorCode::InvalidUrl, format!("{}: {}", url, e)))?;

        let mut request = self.client.request(method, url);
        for (name, value) in options.header_pairs() {
            request = request.header(name, value);
        }

        match options.body() {
            Some(Value::String(body)) => request = request.body(body.clone()),
            Some(body) => request = request.json(body),
            None => {}
        }

        let timeout = options
            .get("timeout_ms")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
            .or(self.default_timeout);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        Ok(request)
    }
}

impl Transport for ReqwestTransport {
    fn operations(&self) -> &[&'static str] {
        STANDARD_OPERATIONS
    }

    fn invoke(&self, operation: &str, options: RequestOptions, callback: Callback) {
        debug!(operation, url = options.url().unwrap_or_default(), "sending request");
        let request = self.build_request(operation, &options);

        self.runtime.spawn(async move {
            let args = match request {
                Ok(request) => execute(request).await,
                Err(args) => args,
            };
            callback(args);
        });
    }
}

fn operation_method(operation: &str) -> Option<Method> {
    match operation {
        "get" => Some(Method::GET),
        "head" => Some(Method::HEAD),
        "post" => Some(Method::POST),
        "put" => Some(Method::PUT),
        "patch" => Some(Method::PATCH),
        "del" => Some(Method::DELETE),
        "options" => Some(Method::OPTIONS),
        _ => None,
    }
}

async fn execute(request: RequestBuilder) -> CallbackArgs {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let code = ErrorCode::classify(&e);
            debug!(%code, error = %e, "request failed");
            return error_args(code, e.to_string());
        }
    };

    let status = response.status().as_u16();
    let mut headers = Map::new();
    for (name, value) in response.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match headers.get_mut(name.as_str()) {
            // Repeated headers are joined like a single comma-separated header
            Some(Value::String(existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            _ => {
                headers.insert(name.as_str().to_string(), Value::String(value));
            }
        }
    }

    match response.text().await {
        Ok(body) => response_args(status, headers, body),
        Err(e) => error_args(ErrorCode::Body, e.to_string()),
    }
}
