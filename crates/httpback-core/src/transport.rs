//! Transport abstraction.
//!
//! A transport performs real requests. It declares the operations it supports by name and
//! reports every outcome through an error-first [`Callback`].

use crate::options::{CallbackArgs, RequestOptions};
use std::sync::Arc;

/// Operation names of an HTTP client whose deletion operation is abbreviated to `del`.
pub const STANDARD_OPERATIONS: &[&str] = &["get", "head", "post", "put", "patch", "del", "options"];

/// Completion callback receiving `[error, response, body]`-style arguments.
pub type Callback = Box<dyn FnOnce(CallbackArgs) + Send + 'static>;

/// Pluggable request transport.
pub trait Transport: Send + Sync {
    /// Names of the supported operations
    fn operations(&self) -> &[&'static str];

    /// Perform `operation` and call `callback` at most once with the outcome.
    ///
    /// The callback may run before or after `invoke` returns. A transport whose runtime has
    /// shut down may drop the callback uncalled.
    ///
    /// `operation` is always one of [`Transport::operations`] when called by the dispatcher.
    fn invoke(&self, operation: &str, options: RequestOptions, callback: Callback);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn operations(&self) -> &[&'static str] {
        (**self).operations()
    }

    fn invoke(&self, operation: &str, options: RequestOptions, callback: Callback) {
        (**self).invoke(operation, options, callback)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn operations(&self) -> &[&'static str] {
        (**self).operations()
    }

    fn invoke(&self, operation: &str, options: RequestOptions, callback: Callback) {
        (**self).invoke(operation, options, callback)
    }
}
