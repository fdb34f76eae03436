//! The closed set of value shapes an attribute or option can carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value half of an [`Attribute`](crate::Attribute) or
/// [`SearchOption`](crate::SearchOption).
///
/// Only these shapes ever reach a backend. Enum-valued attributes (kind,
/// protocol, authentication type) are carried as their raw `String` code.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// UTF-8 text, including the raw codes of enum-valued attributes.
    String(String),

    /// Integer (port numbers).
    Integer(i64),

    /// The platform's true/false sentinels.
    Boolean(bool),

    /// Opaque bytes (secret payloads, generic blobs).
    Data(Vec<u8>),

    /// Matches any stored value. Only produced by `Synchronizable::Any`.
    MatchAny,

    /// Key present with no value, used by read-only attributes in queries.
    Empty,
}

impl AttributeValue {
    /// Borrow the value as a string slice if it is `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as bytes if it is `Data`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value constrains a search at all.
    ///
    /// `MatchAny` and `Empty` place a key in the query without restricting
    /// which items match it.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::MatchAny | Self::Empty)
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Self::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            // Payload bytes are frequently secrets.
            Self::Data(bytes) => write!(f, "Data([REDACTED; {} bytes])", bytes.len()),
            Self::MatchAny => write!(f, "MatchAny"),
            Self::Empty => write!(f, "Empty"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Data(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_debug_redacted() {
        let value = AttributeValue::Data(b"hunter2".to_vec());
        let debug = format!("{:?}", value);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
        assert!(debug.contains("7 bytes"));
    }

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(AttributeValue::from("x").as_str(), Some("x"));
        assert_eq!(AttributeValue::from(443_i64).as_integer(), Some(443));
        assert_eq!(AttributeValue::from(true).as_bool(), Some(true));
        assert_eq!(AttributeValue::from(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(AttributeValue::Integer(1).as_str(), None);
    }

    #[test]
    fn test_wildcards() {
        assert!(AttributeValue::MatchAny.is_wildcard());
        assert!(AttributeValue::Empty.is_wildcard());
        assert!(!AttributeValue::Boolean(false).is_wildcard());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&AttributeValue::Integer(22)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":22}"#);
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AttributeValue::Integer(22));
    }
}
