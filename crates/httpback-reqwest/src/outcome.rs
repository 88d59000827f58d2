//! Conversion of request outcomes into error-first callback arguments.

use httpback_core::CallbackArgs;
use serde_json::{json, Map, Value};
use std::fmt;

/// Error code reported as `code` in the callback's error argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Connection could not be established
    ConnectionRefused,
    /// Request did not complete in time
    TimedOut,
    /// Options carry no usable URL
    InvalidUrl,
    /// Response body could not be read
    Body,
    /// Any other request failure
    Request,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConnectionRefused => "ECONNREFUSED",
            ErrorCode::TimedOut => "ETIMEDOUT",
            ErrorCode::InvalidUrl => "EINVALIDURL",
            ErrorCode::Body => "EBODY",
            ErrorCode::Request => "EREQUEST",
        }
    }

    /// Categorize a reqwest failure
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ErrorCode::TimedOut
        } else if error.is_connect() {
            ErrorCode::ConnectionRefused
        } else if error.is_body() || error.is_decode() {
            ErrorCode::Body
        } else {
            ErrorCode::Request
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[{"code", "message"}, null, null]`
pub(crate) fn error_args(code: ErrorCode, message: impl Into<String>) -> CallbackArgs {
    CallbackArgs::from(json!([
        {"code": code.as_str(), "message": message.into()},
        null,
        null
    ]))
}

/// `[null, {"statusCode", "headers"}, body]`
pub(crate) fn response_args(
    status: u16,
    headers: Map<String, Value>,
    body: String,
) -> CallbackArgs {
    CallbackArgs::from(json!([
        null,
        {"statusCode": status, "headers": headers},
        body
    ]))
}
