//! Attribute catalog, grouped the way the store groups them.
//!
//! Each group is a closed enum whose variants carry the typed input for one
//! attribute. [`key`](GlobalAttribute::key) and
//! [`value`](GlobalAttribute::value) map a variant to its canonical pair.

use super::keys;
use super::{Attribute, AuthenticationType, InternetProtocol, Kind};
use crate::value::AttributeValue;

/// Three-state synchronization flag.
///
/// `Any` is not a boolean: it matches synchronized and local-only items
/// alike and must never collapse into `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Synchronizable {
    Yes,
    No,
    Any,
}

impl Synchronizable {
    fn value(&self) -> AttributeValue {
        match self {
            Self::Yes => AttributeValue::Boolean(true),
            Self::No => AttributeValue::Boolean(false),
            Self::Any => AttributeValue::MatchAny,
        }
    }

    /// Decode a stored value. Anything unrecognised yields `None`.
    pub fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Boolean(true) => Some(Self::Yes),
            AttributeValue::Boolean(false) => Some(Self::No),
            AttributeValue::MatchAny => Some(Self::Any),
            AttributeValue::String(s) if s == keys::SYNCHRONIZABLE_ANY => Some(Self::Any),
            _ => None,
        }
    }
}

impl From<Option<bool>> for Synchronizable {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Yes,
            Some(false) => Self::No,
            None => Self::Any,
        }
    }
}

/// Attributes valid for every item class.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalAttribute {
    Kind(Kind),
    Account(String),
    Password(Vec<u8>),
}

impl GlobalAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Kind(_) => keys::CLASS,
            Self::Account(_) => keys::ACCOUNT,
            Self::Password(_) => keys::VALUE_DATA,
        }
    }

    pub fn value(&self) -> AttributeValue {
        match self {
            Self::Kind(kind) => AttributeValue::String(kind.as_raw().to_string()),
            Self::Account(account) => AttributeValue::String(account.clone()),
            Self::Password(data) => AttributeValue::Data(data.clone()),
        }
    }
}

/// Attributes of internet passwords.
#[derive(Debug, Clone, PartialEq)]
pub enum InternetAttribute {
    Server(String),
    SecurityDomain(String),
    Port(u16),
    Authentication(AuthenticationType),
    Path(String),
    Protocol(InternetProtocol),
}

impl InternetAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Server(_) => keys::SERVER,
            Self::SecurityDomain(_) => keys::SECURITY_DOMAIN,
            Self::Port(_) => keys::PORT,
            Self::Authentication(_) => keys::AUTHENTICATION_TYPE,
            Self::Path(_) => keys::PATH,
            Self::Protocol(_) => keys::PROTOCOL,
        }
    }

    pub fn value(&self) -> AttributeValue {
        match self {
            Self::Server(s) | Self::SecurityDomain(s) | Self::Path(s) => {
                AttributeValue::String(s.clone())
            }
            Self::Port(port) => AttributeValue::Integer(i64::from(*port)),
            Self::Authentication(auth) => AttributeValue::String(auth.as_raw().to_string()),
            Self::Protocol(protocol) => AttributeValue::String(protocol.as_raw().to_string()),
        }
    }
}

/// Attributes of generic (application) passwords.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationAttribute {
    Service(String),
    /// Mutually exclusive with a legacy access object on the same item.
    AccessControl(String),
    Generic(Vec<u8>),
}

impl ApplicationAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Service(_) => keys::SERVICE,
            Self::AccessControl(_) => keys::ACCESS_CONTROL,
            Self::Generic(_) => keys::GENERIC,
        }
    }

    pub fn value(&self) -> AttributeValue {
        match self {
            Self::Service(s) | Self::AccessControl(s) => AttributeValue::String(s.clone()),
            Self::Generic(data) => AttributeValue::Data(data.clone()),
        }
    }
}

/// Descriptive metadata shared by all entries.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryAttribute {
    /// Read-only; stamped by the backend.
    CreationDate,
    /// Read-only; stamped by the backend.
    ModificationDate,
    Description(String),
    Comment(String),
    Creator(String),
    Type(String),
    Label(String),
    IsInvisible(bool),
    IsNegative(bool),
    Synchronizable(Synchronizable),
}

impl EntryAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreationDate => keys::CREATION_DATE,
            Self::ModificationDate => keys::MODIFICATION_DATE,
            Self::Description(_) => keys::DESCRIPTION,
            Self::Comment(_) => keys::COMMENT,
            Self::Creator(_) => keys::CREATOR,
            Self::Type(_) => keys::TYPE,
            Self::Label(_) => keys::LABEL,
            Self::IsInvisible(_) => keys::IS_INVISIBLE,
            Self::IsNegative(_) => keys::IS_NEGATIVE,
            Self::Synchronizable(_) => keys::SYNCHRONIZABLE,
        }
    }

    pub fn value(&self) -> AttributeValue {
        match self {
            Self::CreationDate | Self::ModificationDate => AttributeValue::Empty,
            Self::Description(s)
            | Self::Comment(s)
            | Self::Creator(s)
            | Self::Type(s)
            | Self::Label(s) => AttributeValue::String(s.clone()),
            Self::IsInvisible(b) | Self::IsNegative(b) => AttributeValue::Boolean(*b),
            Self::Synchronizable(sync) => sync.value(),
        }
    }
}

macro_rules! into_attribute {
    ($($group:ty),* $(,)?) => {
        $(
            impl From<$group> for Attribute {
                fn from(entry: $group) -> Self {
                    Attribute::new(entry.key(), entry.value())
                }
            }
        )*
    };
}

into_attribute!(GlobalAttribute, InternetAttribute, ApplicationAttribute, EntryAttribute);
