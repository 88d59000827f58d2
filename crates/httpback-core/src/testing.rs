//! In-memory transport for test suites.

use crate::options::{CallbackArgs, RequestOptions};
use crate::transport::{Callback, Transport, STANDARD_OPERATIONS};
use serde_json::json;
use std::sync::{Mutex, PoisonError};

/// A call received by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: String,
    pub options: RequestOptions,
}

/// Transport that records every call and answers synchronously with a fixed reply.
#[derive(Debug)]
pub struct RecordingTransport {
    operations: Vec<&'static str>,
    reply: CallbackArgs,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    /// Transport declaring [`STANDARD_OPERATIONS`] and replying
    /// `[null, {"statusCode": 200}, ""]`.
    pub fn new() -> Self {
        Self::with_operations(STANDARD_OPERATIONS)
    }

    pub fn with_operations(operations: &[&'static str]) -> Self {
        Self {
            operations: operations.to_vec(),
            reply: CallbackArgs::from(json!([null, {"statusCode": 200}, ""])),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the reply handed to every callback
    pub fn with_reply(mut self, reply: impl Into<CallbackArgs>) -> Self {
        self.reply = reply.into();
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RecordingTransport {
    fn operations(&self) -> &[&'static str] {
        &self.operations
    }

    fn invoke(&self, operation: &str, options: RequestOptions, callback: Callback) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                operation: operation.to_string(),
                options,
            });
        callback(self.reply.clone());
    }
}
