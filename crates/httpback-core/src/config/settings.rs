//! Dispatcher settings.

use crate::key::KeyNormalization;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding [`DispatcherConfig::key_normalization`]
pub const KEY_NORMALIZATION_ENV: &str = "HTTPBACK_KEY_NORMALIZATION";
/// Environment variable overriding [`DispatcherConfig::replay`]
pub const REPLAY_ENV: &str = "HTTPBACK_REPLAY";

/// When a mocked reply reaches its callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayMode {
    /// Inside `send`, before it returns
    #[default]
    Immediate,
    /// On a spawned tokio task, like a real transport reply
    Deferred,
}

impl ReplayMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "immediate" | "sync" => Some(Self::Immediate),
            "deferred" | "async" => Some(Self::Deferred),
            _ => None,
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatcherConfig {
    /// Normalization of request keys
    pub key_normalization: KeyNormalization,
    /// Timing of mocked replies
    pub replay: ReplayMode,
}

impl DispatcherConfig {
    /// Defaults overridden by `HTTPBACK_KEY_NORMALIZATION` and `HTTPBACK_REPLAY`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by values from `lookup`. Unrecognized values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(KEY_NORMALIZATION_ENV) {
            match KeyNormalization::parse(&value) {
                Some(normalization) => config.key_normalization = normalization,
                None => warn!(
                    variable = KEY_NORMALIZATION_ENV,
                    value = %value,
                    "ignoring unknown key normalization"
                ),
            }
        }

        if let Some(value) = lookup(REPLAY_ENV) {
            match ReplayMode::parse(&value) {
                Some(replay) => config.replay = replay,
                None => warn!(
                    variable = REPLAY_ENV,
                    value = %value,
                    "ignoring unknown replay mode"
                ),
            }
        }

        config
    }

    pub fn with_key_normalization(mut self, key_normalization: KeyNormalization) -> Self {
        self.key_normalization = key_normalization;
        self
    }

    pub fn with_replay(mut self, replay: ReplayMode) -> Self {
        self.replay = replay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[rstest]
    fn test_default() {
        let config = DispatcherConfig::default();
        assert_eq!(config.key_normalization, KeyNormalization::Canonical);
        assert_eq!(config.replay, ReplayMode::Immediate);
    }

    #[rstest]
    #[case(&[], DispatcherConfig::default())]
    #[case(
        &[(KEY_NORMALIZATION_ENV, "stripWhitespace")],
        DispatcherConfig::default().with_key_normalization(KeyNormalization::StripWhitespace)
    )]
    #[case(
        &[(REPLAY_ENV, "deferred")],
        DispatcherConfig::default().with_replay(ReplayMode::Deferred)
    )]
    #[case(
        &[(KEY_NORMALIZATION_ENV, "bogus"), (REPLAY_ENV, "ASYNC")],
        DispatcherConfig::default().with_replay(ReplayMode::Deferred)
    )]
    #[case(&[(REPLAY_ENV, "later")], DispatcherConfig::default())]
    fn test_from_lookup(#[case] vars: &[(&str, &str)], #[case] expected: DispatcherConfig) {
        assert_eq!(DispatcherConfig::from_lookup(lookup(vars)), expected);
    }

    #[rstest]
    fn test_deserialize_partial() {
        let config: DispatcherConfig =
            serde_json::from_str(r#"{"replay": "deferred"}"#).expect("Should deserialize");
        assert_eq!(config.replay, ReplayMode::Deferred);
        assert_eq!(config.key_normalization, KeyNormalization::Canonical);
    }

    #[rstest]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(
            DispatcherConfig::default().with_key_normalization(KeyNormalization::StripWhitespace),
        )
        .expect("Should serialize");
        assert_eq!(
            json,
            serde_json::json!({"keyNormalization": "stripWhitespace", "replay": "immediate"})
        );
    }
}
