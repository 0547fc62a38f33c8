use std::collections::BTreeMap;

use super::PropertyKey;

/// A string-keyed store of string values.
///
/// The bag does no semantic validation; it only stores what it is given. Each key maps to at most
/// one value and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    entries: BTreeMap<String, String>,
}

impl PropertyBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under the given key, or `default` if the key is not set.
    pub fn get<'a, 'k, K: Into<PropertyKey<'k>>>(
        &'a self,
        key: K,
        default: Option<&'a str>,
    ) -> Option<&'a str> {
        let key = key.into();
        self.entries.get(key.as_str()).map(String::as_str).or(default)
    }

    /// Stores a value under the given key and returns the value it replaced. Passing `None` clears
    /// the key instead.
    pub fn set<'k, 'v, K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<PropertyKey<'k>>,
        V: Into<Option<&'v str>>,
    {
        let key = key.into();
        match value.into() {
            Some(value) => self.entries.insert(key.as_str().to_owned(), value.to_owned()),
            None => self.entries.remove(key.as_str()),
        }
    }

    /// Removes the given key and returns its value.
    pub fn remove<'k, K: Into<PropertyKey<'k>>>(&mut self, key: K) -> Option<String> {
        self.set(key, None::<&str>)
    }

    /// Returns `true` if the given key is set.
    pub fn contains<'k, K: Into<PropertyKey<'k>>>(&self, key: K) -> bool {
        self.entries.contains_key(key.into().as_str())
    }

    /// Number of keys that are set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the value stored under the given key if it is set and not blank.
    pub(crate) fn non_blank<'k, K: Into<PropertyKey<'k>>>(&self, key: K) -> Option<&str> {
        self.get(key, None).map(str::trim).filter(|v| !v.is_empty())
    }
}
