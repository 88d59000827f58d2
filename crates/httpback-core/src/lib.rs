//! Core library for the httpback request dispatcher.
//!
//! A [`Dispatcher`] resolves an HTTP-style method name to an operation of a pluggable
//! [`Transport`], and replays canned callback arguments registered with
//! [`Dispatcher::mock`] instead of calling the transport when the request options match.
//!
//! - [`options`]: request options and callback argument sequences
//! - [`key`]: canonical request keys
//! - [`store`]: the mock store owned by the dispatcher
//! - [`method`]: method name resolution and the alias table
//! - [`config`]: dispatcher settings and mock fixture files

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod key;
pub mod method;
pub mod options;
pub mod store;
pub mod testing;
pub mod transport;

pub use config::settings::{DispatcherConfig, ReplayMode};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use key::{KeyNormalization, RequestKey};
pub use options::{CallbackArgs, RequestOptions};
pub use store::MockStore;
pub use transport::{Callback, Transport, STANDARD_OPERATIONS};
