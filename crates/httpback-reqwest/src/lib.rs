//! reqwest-backed transport for the httpback dispatcher.
//!
//! [`ReqwestTransport`] declares the operations `get`, `head`, `post`, `put`, `patch`, `del`
//! and `options`. Deletion is abbreviated, so dispatching `delete` goes through the alias
//! table.

mod config;
mod outcome;
mod transport;

pub use config::ReqwestTransportConfig;
pub use outcome::ErrorCode;
pub use transport::{ReqwestTransport, TransportError};
