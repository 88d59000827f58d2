//! Mock store.
//!
//! Maps request keys to canned callback arguments. Entries are created or overwritten by
//! registration and only ever removed all at once.

use crate::key::{KeyNormalization, RequestKey};
use crate::options::{CallbackArgs, RequestOptions};
use std::collections::BTreeMap;

/// Registered mocks, keyed by canonical request key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockStore {
    /// Normalization applied to every key computed by this store
    normalization: KeyNormalization,
    /// Map of request key to canned callback arguments
    entries: BTreeMap<RequestKey, CallbackArgs>,
}

impl MockStore {
    /// Create an empty store computing keys with `normalization`
    pub fn new(normalization: KeyNormalization) -> Self {
        Self {
            normalization,
            entries: BTreeMap::new(),
        }
    }

    pub fn normalization(&self) -> KeyNormalization {
        self.normalization
    }

    /// Key under which `options` would be stored
    pub fn key_for(&self, options: &RequestOptions) -> RequestKey {
        RequestKey::from_options(options, self.normalization)
    }

    /// Store `data` for `options`, returning the key and any previous entry
    pub fn insert(
        &mut self,
        options: &RequestOptions,
        data: CallbackArgs,
    ) -> (RequestKey, Option<CallbackArgs>) {
        let key = self.key_for(options);
        let previous = self.entries.insert(key.clone(), data);
        (key, previous)
    }

    /// Entry stored under a precomputed key
    pub fn get(&self, key: &str) -> Option<&CallbackArgs> {
        self.entries.get(key)
    }

    /// Entry matching `options`
    pub fn lookup(&self, options: &RequestOptions) -> Option<&CallbackArgs> {
        self.entries.get(&self.key_for(options))
    }

    pub fn contains(&self, options: &RequestOptions) -> bool {
        self.lookup(options).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&RequestKey, &CallbackArgs)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RequestKey> {
        self.entries.keys()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn options(url: &str) -> RequestOptions {
        RequestOptions::from(json!({"method": "GET", "url": url}))
    }

    #[rstest]
    fn test_store_default_is_empty() {
        let store = MockStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.normalization(), KeyNormalization::Canonical);
    }

    #[rstest]
    fn test_insert_and_lookup() {
        let mut store = MockStore::default();
        let (key, previous) = store.insert(&options("/x"), json!([null, "ok"]).into());

        assert!(previous.is_none());
        assert_eq!(key.as_str(), r#"{"method":"GET","url":"/x"}"#);
        let expected = CallbackArgs::from(json!([null, "ok"]));
        assert_eq!(store.get(key.as_str()), Some(&expected));
        assert_eq!(store.lookup(&options("/x")), Some(&expected));
        assert!(store.lookup(&options("/y")).is_none());
    }

    #[rstest]
    fn test_insert_overwrites_same_key() {
        let mut store = MockStore::default();
        store.insert(&options("/x"), json!([null, "first"]).into());
        let (_, previous) = store.insert(&options("/x"), json!([null, "second"]).into());

        assert_eq!(previous, Some(CallbackArgs::from(json!([null, "first"]))));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.lookup(&options("/x")),
            Some(&CallbackArgs::from(json!([null, "second"])))
        );
    }

    #[rstest]
    fn test_distinct_options_are_distinct_entries() {
        let mut store = MockStore::default();
        store.insert(&options("/a"), json!([null, "a"]).into());
        store.insert(&options("/b"), json!([null, "b"]).into());

        assert_eq!(store.len(), 2);
        let keys: Vec<&str> = store.keys().map(RequestKey::as_str).collect();
        assert_eq!(
            keys,
            vec![
                r#"{"method":"GET","url":"/a"}"#,
                r#"{"method":"GET","url":"/b"}"#
            ]
        );
    }

    #[rstest]
    fn test_iter_yields_entries_in_key_order() {
        let mut store = MockStore::default();
        store.insert(&options("/b"), json!([null, "b"]).into());
        store.insert(&options("/a"), json!([null, "a"]).into());

        let entries: Vec<(&str, &CallbackArgs)> = store
            .iter()
            .map(|(key, args)| (key.as_str(), args))
            .collect();
        assert_eq!(
            entries,
            vec![
                (
                    r#"{"method":"GET","url":"/a"}"#,
                    &CallbackArgs::from(json!([null, "a"]))
                ),
                (
                    r#"{"method":"GET","url":"/b"}"#,
                    &CallbackArgs::from(json!([null, "b"]))
                ),
            ]
        );
    }

    #[rstest]
    fn test_clear() {
        let mut store = MockStore::default();
        store.insert(&options("/a"), json!([null]).into());
        store.insert(&options("/b"), json!([null]).into());
        store.clear();

        assert!(store.is_empty());
        assert!(!store.contains(&options("/a")));
    }

    #[rstest]
    fn test_strip_whitespace_store_matches_spaced_values() {
        let mut store = MockStore::new(KeyNormalization::StripWhitespace);
        store.insert(
            &RequestOptions::from(json!({"url": "/x", "body": "a b"})),
            json!([null, "hit"]).into(),
        );

        assert!(store.contains(&RequestOptions::from(json!({"url": "/x", "body": "ab"}))));
    }
}
