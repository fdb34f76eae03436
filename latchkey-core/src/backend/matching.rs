//! Matching and shaping rules shared by the bundled backends.

use chrono::Utc;

use super::{status, BackendStatus};
use crate::attribute::keys;
use crate::option::MatchLimit;
use crate::set::{Item, Query};
use crate::value::AttributeValue;

/// Search options extracted from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchControls {
    pub limit: MatchLimit,
    pub return_data: bool,
    pub return_attributes: bool,
}

impl SearchControls {
    /// Read the option keys of `query`. Absent options take the store
    /// defaults: first match only, nothing returned.
    pub fn from_query(query: &Query) -> Self {
        let flag = |key: &str| {
            query
                .get(key)
                .and_then(AttributeValue::as_bool)
                .unwrap_or(false)
        };

        Self {
            limit: query
                .get(keys::MATCH_LIMIT)
                .and_then(AttributeValue::as_str)
                .and_then(MatchLimit::from_raw)
                .unwrap_or_default(),
            return_data: flag(keys::RETURN_DATA),
            return_attributes: flag(keys::RETURN_ATTRIBUTES),
        }
    }

    /// Shape a stored item the way the caller asked for it.
    ///
    /// An item stored without a payload reports an empty one when data is
    /// requested.
    pub fn project(&self, item: &Item) -> Item {
        let mut shaped = Item::new();

        if self.return_attributes {
            shaped.extend(
                item.iter()
                    .filter(|(k, _)| k.as_str() != keys::VALUE_DATA)
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }

        if self.return_data {
            let data = item
                .get(keys::VALUE_DATA)
                .cloned()
                .unwrap_or(AttributeValue::Data(Vec::new()));
            shaped.insert(keys::VALUE_DATA.to_string(), data);
        }

        shaped
    }
}

/// Whether a stored item satisfies every attribute constraint in `query`.
///
/// Option keys, the payload key and wildcard values never constrain. An item
/// without a synchronizable flag counts as not synchronized.
pub fn matches(item: &Item, query: &Query) -> bool {
    constraints(query).all(|(key, expected)| stored_value(item, key) == Some(expected))
}

static NOT_SYNCHRONIZED: AttributeValue = AttributeValue::Boolean(false);

/// The value `item` holds for `key`, reading a missing synchronizable flag
/// as `false`.
fn stored_value<'a>(item: &'a Item, key: &str) -> Option<&'a AttributeValue> {
    match item.get(key) {
        None if key == keys::SYNCHRONIZABLE => Some(&NOT_SYNCHRONIZED),
        value => value,
    }
}

fn constraints(query: &Query) -> impl Iterator<Item = (&str, &AttributeValue)> {
    query
        .iter()
        .filter(|(k, v)| {
            !keys::is_option_key(k) && k.as_str() != keys::VALUE_DATA && !v.is_wildcard()
        })
        .map(|(k, v)| (k.as_str(), v))
}

/// The class code of a query; every operation requires one.
pub(crate) fn require_class(query: &Query) -> Result<&str, BackendStatus> {
    query
        .get(keys::CLASS)
        .and_then(AttributeValue::as_str)
        .ok_or(BackendStatus::Other(status::PARAM))
}

/// Attributes that together identify an item within its class.
fn primary_keys(class: &str) -> &'static [&'static str] {
    match class {
        "genp" => &[keys::CLASS, keys::ACCOUNT, keys::SERVICE, keys::SYNCHRONIZABLE],
        "inet" => &[
            keys::CLASS,
            keys::ACCOUNT,
            keys::SECURITY_DOMAIN,
            keys::SERVER,
            keys::PROTOCOL,
            keys::AUTHENTICATION_TYPE,
            keys::PORT,
            keys::PATH,
            keys::SYNCHRONIZABLE,
        ],
        _ => &[keys::CLASS, keys::LABEL, keys::SYNCHRONIZABLE],
    }
}

/// Whether two stored items would collide on their class's primary key.
pub(crate) fn same_primary_key(a: &Item, b: &Item) -> bool {
    let class = match a.get(keys::CLASS).and_then(AttributeValue::as_str) {
        Some(class) => class,
        None => return false,
    };

    primary_keys(class)
        .iter()
        .all(|key| stored_value(a, key) == stored_value(b, key))
}

/// Build a storable item from insert attributes, stamping both timestamps.
pub(crate) fn new_item(attributes: &Query) -> Item {
    let mut item: Item = attributes
        .iter()
        .filter(|(k, v)| !keys::is_option_key(k) && !v.is_wildcard())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let now = AttributeValue::String(Utc::now().to_rfc3339());
    item.insert(keys::CREATION_DATE.to_string(), now.clone());
    item.insert(keys::MODIFICATION_DATE.to_string(), now);
    item
}

/// Overlay update attributes onto a stored item and restamp it.
///
/// Read-only timestamps and wildcard values are not writable.
pub(crate) fn apply_update(item: &mut Item, attributes: &Query) {
    for (key, value) in attributes {
        let read_only = key == keys::CREATION_DATE || key == keys::MODIFICATION_DATE;
        if keys::is_option_key(key) || read_only || value.is_wildcard() {
            continue;
        }
        item.insert(key.clone(), value.clone());
    }

    item.insert(
        keys::MODIFICATION_DATE.to_string(),
        AttributeValue::String(Utc::now().to_rfc3339()),
    );
}
