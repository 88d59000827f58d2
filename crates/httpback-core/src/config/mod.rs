//! Dispatcher settings and mock fixture files.
//!
//! - [`settings`]: [`DispatcherConfig`](settings::DispatcherConfig) and its environment overrides
//! - [`parser`]: JSON, JSONC and YAML parsing by file extension
//! - [`fixture`]: loading mock fixtures from files or glob patterns

pub mod error;
pub mod fixture;
pub mod parser;
pub mod settings;
