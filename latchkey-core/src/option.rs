//! Search-control options.
//!
//! Options shape how a search runs and what it returns; they never take part
//! in deciding which items match. The accessor layer only ever uses the two
//! canned policies [`match_first`] and [`match_all`].

use std::hash::{Hash, Hasher};

use crate::attribute::keys;
use crate::set::{Keyed, OptionSet};
use crate::value::AttributeValue;

/// How many items a search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchLimit {
    #[default]
    First,
    All,
}

impl MatchLimit {
    pub fn as_raw(&self) -> &'static str {
        match self {
            Self::First => keys::MATCH_LIMIT_ONE,
            Self::All => keys::MATCH_LIMIT_ALL,
        }
    }

    /// Unknown codes yield `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            keys::MATCH_LIMIT_ONE => Some(Self::First),
            keys::MATCH_LIMIT_ALL => Some(Self::All),
            _ => None,
        }
    }
}

/// A single search option. Equality and hashing consider the key only.
#[derive(Debug, Clone)]
pub struct SearchOption {
    key: &'static str,
    value: AttributeValue,
}

impl SearchOption {
    /// Ask the backend to include the secret payload in results.
    pub fn return_data(enabled: bool) -> Self {
        Self {
            key: keys::RETURN_DATA,
            value: AttributeValue::Boolean(enabled),
        }
    }

    /// Ask the backend to include the item attributes in results.
    pub fn return_attributes(enabled: bool) -> Self {
        Self {
            key: keys::RETURN_ATTRIBUTES,
            value: AttributeValue::Boolean(enabled),
        }
    }

    pub fn match_limit(limit: MatchLimit) -> Self {
        Self {
            key: keys::MATCH_LIMIT,
            value: AttributeValue::String(limit.as_raw().to_string()),
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

impl PartialEq for SearchOption {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SearchOption {}

impl Hash for SearchOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Keyed for SearchOption {
    fn key(&self) -> &str {
        SearchOption::key(self)
    }

    fn value(&self) -> &AttributeValue {
        SearchOption::value(self)
    }
}

/// Return data and attributes of the first matching item.
pub fn match_first() -> OptionSet {
    canned(MatchLimit::First)
}

/// Return data and attributes of every matching item.
pub fn match_all() -> OptionSet {
    canned(MatchLimit::All)
}

fn canned(limit: MatchLimit) -> OptionSet {
    [
        SearchOption::return_data(true),
        SearchOption::return_attributes(true),
        SearchOption::match_limit(limit),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_first_bundle() {
        let query = match_first().to_query();
        assert_eq!(query.len(), 3);
        assert_eq!(query[keys::RETURN_DATA], AttributeValue::Boolean(true));
        assert_eq!(query[keys::RETURN_ATTRIBUTES], AttributeValue::Boolean(true));
        assert_eq!(query[keys::MATCH_LIMIT].as_str(), Some("m_LimitOne"));
    }

    #[test]
    fn test_match_all_differs_only_in_limit() {
        let first = match_first().to_query();
        let all = match_all().to_query();
        assert_eq!(all[keys::MATCH_LIMIT].as_str(), Some("m_LimitAll"));
        assert_eq!(first[keys::RETURN_DATA], all[keys::RETURN_DATA]);
        assert_eq!(first[keys::RETURN_ATTRIBUTES], all[keys::RETURN_ATTRIBUTES]);
    }

    #[test]
    fn test_match_limit_raw_roundtrip() {
        for limit in [MatchLimit::First, MatchLimit::All] {
            assert_eq!(MatchLimit::from_raw(limit.as_raw()), Some(limit));
        }
        assert_eq!(MatchLimit::from_raw("m_LimitTwo"), None);
    }

    #[test]
    fn test_option_keys_are_option_vocabulary() {
        for option in [
            SearchOption::return_data(false),
            SearchOption::return_attributes(false),
            SearchOption::match_limit(MatchLimit::All),
        ] {
            assert!(keys::is_option_key(option.key()));
        }
    }

    #[test]
    fn test_keyed_view_matches_accessors() {
        let option = SearchOption::match_limit(MatchLimit::First);
        assert_eq!(Keyed::key(&option), option.key());
        assert_eq!(Keyed::value(&option), option.value());
    }
}
