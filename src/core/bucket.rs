//! Per-locale aggregation of extracted fragments.
//!
//! A `LocaleBucket` collects every fragment destined for one `(root chunk,
//! locale)` pair and serializes them into a single flat JSON document keyed by
//! module key.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::core::merge::deep_merge;

/// Buckets of one root chunk, keyed by locale in first-seen order.
pub type LocaleBuckets = IndexMap<String, LocaleBucket>;

/// Optional allow-list of locale codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFilter<'a> {
    allowed: Option<&'a [String]>,
}

impl<'a> LocaleFilter<'a> {
    /// Accept every locale.
    pub fn all() -> Self {
        Self { allowed: None }
    }

    /// Accept only the listed locales.
    pub fn only(allowed: &'a [String]) -> Self {
        Self {
            allowed: Some(allowed),
        }
    }

    pub fn from_option(allowed: Option<&'a [String]>) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, locale: &str) -> bool {
        match self.allowed {
            Some(allowed) => allowed.iter().any(|l| l == locale),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BucketFragment {
    key: String,
    value: Value,
    /// Length of `value` serialized on its own.
    raw_len: usize,
}

/// Accumulator for one `(root chunk, locale)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleBucket {
    defaults: Map<String, Value>,
    fragments: Vec<BucketFragment>,
}

impl LocaleBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Later fragments override earlier ones on shared leaves.
    pub fn add(&mut self, key: impl Into<String>, value: Value) {
        let raw_len = serde_json::to_string(&value).map_or(0, |s| s.len());
        self.fragments.push(BucketFragment {
            key: key.into(),
            value,
            raw_len,
        });
    }

    /// Register the shared default for `key`. Re-registering replaces it.
    pub fn add_default(&mut self, key: impl Into<String>, value: Value) {
        self.defaults.insert(key.into(), value);
    }

    pub fn default_for(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Number of appended fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.defaults.is_empty()
    }

    /// Build the merged document.
    ///
    /// Starts from the defaults, then deep-merges each fragment into its key in
    /// insertion order.
    pub fn combined(&self) -> Map<String, Value> {
        let mut combined = self.defaults.clone();
        for fragment in &self.fragments {
            let slot = combined
                .entry(fragment.key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            deep_merge(slot, &fragment.value);
        }
        combined
    }

    /// Serialize the merged document as compact JSON.
    pub fn source(&self) -> Result<String> {
        serde_json::to_string(&Value::Object(self.combined()))
            .context("Failed to serialize locale bundle")
    }

    /// Advisory payload size: the sum of raw fragment sizes.
    ///
    /// Not equal to `source().len()`; used only for asset-size reporting.
    pub fn size(&self) -> usize {
        self.fragments.iter().map(|f| f.raw_len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_bucket() {
        let bucket = LocaleBucket::new();
        assert!(bucket.is_empty());
        assert_eq!(bucket.source().unwrap(), "{}");
        assert_eq!(bucket.size(), 0);
    }

    #[test]
    fn test_fragments_concatenate_by_key() {
        let mut bucket = LocaleBucket::new();
        bucket.add("x", json!({"greet": "hi"}));
        bucket.add("y", json!({"bye": "cya"}));
        assert_snapshot!(bucket.source().unwrap(), @r#"{"x":{"greet":"hi"},"y":{"bye":"cya"}}"#);
    }

    #[test]
    fn test_default_is_overlaid_by_fragment() {
        let mut bucket = LocaleBucket::new();
        bucket.add("x", json!({"greet": "hi", "color": "blue"}));
        bucket.add_default("x", json!({"color": "red", "size": "L"}));
        assert_eq!(
            Value::Object(bucket.combined()),
            json!({"x": {"color": "blue", "size": "L", "greet": "hi"}})
        );
    }

    #[test]
    fn test_default_key_order_comes_first() {
        let mut bucket = LocaleBucket::new();
        bucket.add("a", json!({"v": 1}));
        bucket.add("b", json!({"v": 2}));
        bucket.add_default("b", json!({"d": 0}));
        assert_snapshot!(bucket.source().unwrap(), @r#"{"b":{"d":0,"v":2},"a":{"v":1}}"#);
    }

    #[test]
    fn test_same_key_later_fragment_wins() {
        let mut bucket = LocaleBucket::new();
        bucket.add("x", json!({"greet": "hi", "nested": {"a": 1, "b": 1}}));
        bucket.add("x", json!({"greet": "hello", "nested": {"b": 2}}));
        assert_eq!(
            Value::Object(bucket.combined()),
            json!({"x": {"greet": "hello", "nested": {"a": 1, "b": 2}}})
        );
    }

    #[test]
    fn test_re_registering_default_is_harmless() {
        let mut bucket = LocaleBucket::new();
        bucket.add("x", json!({"greet": "hi"}));
        bucket.add_default("x", json!({"color": "red"}));
        bucket.add_default("x", json!({"color": "red"}));
        assert_eq!(bucket.default_for("x"), Some(&json!({"color": "red"})));
        assert_eq!(
            Value::Object(bucket.combined()),
            json!({"x": {"color": "red", "greet": "hi"}})
        );
    }

    #[test]
    fn test_scalar_fragment_replaces_placeholder_object() {
        let mut bucket = LocaleBucket::new();
        bucket.add("title", json!("Hello"));
        assert_snapshot!(bucket.source().unwrap(), @r#"{"title":"Hello"}"#);
    }

    #[test]
    fn test_size_sums_raw_fragments() {
        let mut bucket = LocaleBucket::new();
        bucket.add("x", json!({"a": "b"}));
        bucket.add("y", json!("cd"));
        bucket.add_default("x", json!({"ignored": true}));
        // {"a":"b"} is 9 bytes, "cd" is 4 bytes
        assert_eq!(bucket.size(), 13);
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn test_locale_filter() {
        let allowed = vec!["en-us".to_string()];
        assert!(LocaleFilter::all().allows("es-mx"));
        assert!(LocaleFilter::only(&allowed).allows("en-us"));
        assert!(!LocaleFilter::only(&allowed).allows("es-mx"));
        assert!(LocaleFilter::from_option(None).allows("fr"));
    }
}
