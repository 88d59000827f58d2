//! Request dispatcher with an embedded mock store.
//!
//! `Dispatcher::send` resolves the method name first, then looks the request options up
//! in the mock store. A hit replays the stored callback arguments; a miss forwards the
//! request to the transport untouched.

use crate::config::error::FixtureError;
use crate::config::fixture::load_fixtures;
use crate::config::settings::{DispatcherConfig, ReplayMode};
use crate::error::DispatchError;
use crate::method::MethodTable;
use crate::options::{CallbackArgs, RequestOptions};
use crate::store::MockStore;
use crate::transport::{Callback, Transport};
use tracing::{debug, info, trace, warn};

/// Dispatcher routing requests either to registered mocks or to a transport.
///
/// Mocked replies reach the callback synchronously inside [`Dispatcher::send`] unless the
/// dispatcher is configured with [`ReplayMode::Deferred`]. Transport replies arrive
/// whenever the transport calls back, usually later.
#[derive(Debug)]
pub struct Dispatcher<T> {
    /// Transport handling requests without a mock
    transport: T,
    /// Method name to transport operation, built from the transport's operations
    methods: MethodTable,
    /// Registered mocks
    store: MockStore,
    /// Timing of mocked replies
    replay: ReplayMode,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DispatcherConfig::default())
    }

    pub fn with_config(transport: T, config: DispatcherConfig) -> Self {
        let methods = MethodTable::new(transport.operations());
        debug!(methods = ?methods.methods(), "built method table");

        Self {
            transport,
            methods,
            store: MockStore::new(config.key_normalization),
            replay: config.replay,
        }
    }

    /// Send a request.
    ///
    /// Fails with [`DispatchError::UnsupportedMethod`] when `method` resolves to no
    /// operation, even if a mock exists for `options`; `callback` is then dropped without
    /// being called. Otherwise `callback` receives either the mocked arguments or whatever
    /// the transport reports.
    pub fn send<O, F>(&self, method: &str, options: O, callback: F) -> Result<(), DispatchError>
    where
        O: Into<RequestOptions>,
        F: FnOnce(CallbackArgs) + Send + 'static,
    {
        let operation = self.methods.resolve(method)?;
        let options = options.into();
        let key = self.store.key_for(&options);
        trace!(%key, "computed request key");

        if let Some(args) = self.store.get(key.as_str()) {
            debug!(method, operation, "replaying mocked response");
            self.replay(args.clone(), Box::new(callback));
            return Ok(());
        }

        debug!(method, operation, "no mock registered, forwarding to transport");
        self.transport.invoke(operation, options, Box::new(callback));
        Ok(())
    }

    fn replay(&self, args: CallbackArgs, callback: Callback) {
        match self.replay {
            ReplayMode::Immediate => callback(args),
            ReplayMode::Deferred => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move { callback(args) });
                }
                Err(_) => {
                    warn!(
                        "deferred replay requested outside a tokio runtime, replaying immediately"
                    );
                    callback(args)
                }
            },
        }
    }

    /// Register `data` as the reply for `options`, replacing any previous reply
    pub fn mock<O, D>(&mut self, options: O, data: D)
    where
        O: Into<RequestOptions>,
        D: Into<CallbackArgs>,
    {
        let (key, previous) = self.store.insert(&options.into(), data.into());
        debug!(%key, replaced = previous.is_some(), "registered mock");
    }

    /// Registered mocks
    pub fn list_mocks(&self) -> &MockStore {
        &self.store
    }

    /// Remove every registered mock
    pub fn clear_mocks(&mut self) {
        info!(count = self.store.len(), "clearing mocks");
        self.store.clear();
    }

    /// Register the fixtures found in files matching `pattern`.
    ///
    /// Returns the number of fixtures loaded. Nothing is registered when any file fails.
    pub fn load_mocks(&mut self, pattern: &str) -> Result<usize, FixtureError> {
        let fixtures = load_fixtures(pattern)?;
        let count = fixtures.len();
        for fixture in fixtures {
            self.mock(fixture.options, fixture.reply);
        }
        info!(pattern, count, "loaded mock fixtures");
        Ok(count)
    }

    /// Method names `send` accepts, lower-cased and sorted
    pub fn supported_methods(&self) -> Vec<&str> {
        self.methods.methods()
    }

    pub fn replay_mode(&self) -> ReplayMode {
        self.replay
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
