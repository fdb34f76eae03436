//! Key-deduplicated attribute and option collections.
//!
//! A [`KeyedSet`] holds at most one member per key. Inserting a member whose
//! key is already present replaces the previous member, which is what lets
//! a write overlay payload attributes onto an identity set with
//! [`union`](KeyedSet::union).

use std::collections::hash_map::{self, HashMap};
use std::collections::BTreeMap;

use crate::attribute::Attribute;
use crate::option::SearchOption;
use crate::value::AttributeValue;

/// Flat key/value mapping consumed by a [`Backend`](crate::Backend).
///
/// Ordered so that flattening and logging are deterministic.
pub type Query = BTreeMap<String, AttributeValue>;

/// A stored item as returned by a backend search.
pub type Item = BTreeMap<String, AttributeValue>;

/// Anything that flattens to a single `(key, value)` pair.
pub trait Keyed {
    fn key(&self) -> &str;
    fn value(&self) -> &AttributeValue;
}

/// Unordered collection with at most one member per key.
#[derive(Debug, Clone)]
pub struct KeyedSet<T> {
    members: HashMap<String, T>,
}

/// Identity and payload attributes of an item.
pub type AttributeSet = KeyedSet<Attribute>;

/// Retrieval policy for a search.
pub type OptionSet = KeyedSet<SearchOption>;

impl<T: Keyed> KeyedSet<T> {
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
        }
    }

    /// Insert a member, replacing and returning any member with the same key.
    pub fn insert(&mut self, member: T) -> Option<T> {
        self.members.insert(member.key().to_string(), member)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, member: T) -> Self {
        self.insert(member);
        self
    }

    /// Combine two sets. On key collisions the member from `other` wins.
    pub fn union(mut self, other: Self) -> Self {
        self.members.extend(other.members);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    /// Membership by key; the member's value is not compared.
    pub fn contains(&self, member: &T) -> bool {
        self.contains_key(member.key())
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.members.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.members.remove(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, T> {
        self.members.values()
    }

    /// Flatten to a query with one entry per distinct key.
    pub fn to_query(&self) -> Query {
        self.members
            .values()
            .map(|member| (member.key().to_string(), member.value().clone()))
            .collect()
    }
}

impl<T: Keyed> Default for KeyedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for KeyedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Keyed> Extend<T> for KeyedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for member in iter {
            self.insert(member);
        }
    }
}

impl<T> IntoIterator for KeyedSet<T> {
    type Item = T;
    type IntoIter = hash_map::IntoValues<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_values()
    }
}

impl<'a, T> IntoIterator for &'a KeyedSet<T> {
    type Item = &'a T;
    type IntoIter = hash_map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}

/// Overlay `overlay` onto `base`; values from `overlay` win.
pub fn merge_queries(base: &Query, overlay: &Query) -> Query {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
