//! Hook for an external UI-description layer.
//!
//! A UI description names views by class and describes each with a bag of
//! attributes. The core does not read or validate the attributes; it only
//! routes "construct a view of class X from these attributes" to a creator
//! registered for X.

pub mod factory;

pub use factory::{ViewCreator, ViewFactory};

use std::collections::BTreeMap;

/// String attributes describing one view, keyed by attribute name.
///
/// Values are opaque to the core. Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag {
    values: BTreeMap<String, String>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute (builder).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, returning the value it replaced.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
