//! Typed credential attributes.
//!
//! This module provides:
//! - [`Attribute`] - A canonical `(key, value)` pair whose identity is its key
//! - Catalog groups ([`GlobalAttribute`], [`InternetAttribute`],
//!   [`ApplicationAttribute`], [`EntryAttribute`])
//! - Closed enum tables for [`Kind`], [`InternetProtocol`],
//!   [`AuthenticationType`] and [`Synchronizable`]
//! - [`keys`] - The canonical store key strings
//!
//! Prefer the constructors on [`Attribute`] over building pairs by hand:
//!
//! ```
//! use latchkey_core::{Attribute, AttributeSet, InternetProtocol, Kind};
//!
//! let identity: AttributeSet = [
//!     Attribute::kind(Kind::Internet),
//!     Attribute::server("example.com"),
//!     Attribute::protocol(InternetProtocol::Https),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(identity.to_query()["srvr"].as_str(), Some("example.com"));
//! ```

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use crate::set::Keyed;
use crate::value::AttributeValue;

mod authentication;
mod catalog;
mod kind;
mod protocol;
pub mod keys;

pub use authentication::AuthenticationType;
pub use catalog::{
    ApplicationAttribute,
    EntryAttribute,
    GlobalAttribute,
    InternetAttribute,
    Synchronizable,
};
pub use kind::Kind;
pub use protocol::{InternetProtocol, UnknownProtocol};

/// A single credential attribute.
///
/// Equality and hashing consider the key only, so an
/// [`AttributeSet`](crate::AttributeSet) holds at most one attribute per key.
#[derive(Debug, Clone)]
pub struct Attribute {
    key: Cow<'static, str>,
    value: AttributeValue,
}

impl Attribute {
    pub(crate) fn new(key: &'static str, value: AttributeValue) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value,
        }
    }

    /// Build an attribute with an arbitrary key.
    ///
    /// Bypasses the catalog. Use only for keys the catalog does not cover.
    pub fn raw(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: Cow::Owned(key.into()),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn into_value(self) -> AttributeValue {
        self.value
    }

    // Global

    pub fn kind(kind: Kind) -> Self {
        GlobalAttribute::Kind(kind).into()
    }

    pub fn account(account: impl Into<String>) -> Self {
        GlobalAttribute::Account(account.into()).into()
    }

    /// The secret payload of an item.
    pub fn password(data: impl Into<Vec<u8>>) -> Self {
        GlobalAttribute::Password(data.into()).into()
    }

    // Internet

    pub fn server(server: impl Into<String>) -> Self {
        InternetAttribute::Server(server.into()).into()
    }

    pub fn security_domain(domain: impl Into<String>) -> Self {
        InternetAttribute::SecurityDomain(domain.into()).into()
    }

    pub fn port(port: u16) -> Self {
        InternetAttribute::Port(port).into()
    }

    pub fn authentication(auth: AuthenticationType) -> Self {
        InternetAttribute::Authentication(auth).into()
    }

    pub fn path(path: impl Into<String>) -> Self {
        InternetAttribute::Path(path.into()).into()
    }

    pub fn protocol(protocol: InternetProtocol) -> Self {
        InternetAttribute::Protocol(protocol).into()
    }

    // Application

    pub fn service(service: impl Into<String>) -> Self {
        ApplicationAttribute::Service(service.into()).into()
    }

    pub fn access_control(access: impl Into<String>) -> Self {
        ApplicationAttribute::AccessControl(access.into()).into()
    }

    pub fn generic(data: impl Into<Vec<u8>>) -> Self {
        ApplicationAttribute::Generic(data.into()).into()
    }

    // Entry

    pub fn creation_date() -> Self {
        EntryAttribute::CreationDate.into()
    }

    pub fn modification_date() -> Self {
        EntryAttribute::ModificationDate.into()
    }

    pub fn description(description: impl Into<String>) -> Self {
        EntryAttribute::Description(description.into()).into()
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        EntryAttribute::Comment(comment.into()).into()
    }

    pub fn creator(creator: impl Into<String>) -> Self {
        EntryAttribute::Creator(creator.into()).into()
    }

    pub fn item_type(item_type: impl Into<String>) -> Self {
        EntryAttribute::Type(item_type.into()).into()
    }

    pub fn label(label: impl Into<String>) -> Self {
        EntryAttribute::Label(label.into()).into()
    }

    pub fn is_invisible(invisible: bool) -> Self {
        EntryAttribute::IsInvisible(invisible).into()
    }

    pub fn is_negative(negative: bool) -> Self {
        EntryAttribute::IsNegative(negative).into()
    }

    /// `None` matches both synchronized and local-only items.
    pub fn synchronizable(sync: Option<bool>) -> Self {
        EntryAttribute::Synchronizable(Synchronizable::from(sync)).into()
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Keyed for Attribute {
    fn key(&self) -> &str {
        Attribute::key(self)
    }

    fn value(&self) -> &AttributeValue {
        Attribute::value(self)
    }
}
