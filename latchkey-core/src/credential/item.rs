//! Structured secrets.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::codec::{Codec, JsonCodec};
use crate::attribute::{Attribute, Kind};
use crate::client::StoreClient;
use crate::error::KeychainError;
use crate::option::match_first;
use crate::queryable::Queryable;
use crate::set::{AttributeSet, OptionSet};

/// A serializable value stored as a generic password.
///
/// `name` is used as both label and service. The value is encoded with `C`,
/// JSON by default; a payload that fails to decode is reported as
/// [`KeychainError::UnexpectedData`].
///
/// # Example
///
/// ```
/// use latchkey_core::{SecureItem, StoreClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Session {
///     token: String,
/// }
///
/// let session: SecureItem<Session> = SecureItem::new(StoreClient::in_memory(), "com.example.session");
///
/// let value = Session { token: "abc".into() };
/// session.set(Some(&value)).unwrap();
/// assert_eq!(session.get().unwrap(), Some(value));
/// ```
pub struct SecureItem<T, C = JsonCodec> {
    client: StoreClient,
    options: OptionSet,
    name: String,
    account: Option<String>,
    codec: C,
    _value: PhantomData<fn() -> T>,
}

impl<T> SecureItem<T, JsonCodec> {
    pub fn new(client: StoreClient, name: impl Into<String>) -> Self {
        Self::with_codec(client, name, JsonCodec)
    }
}

impl<T, C: Codec> SecureItem<T, C> {
    pub fn with_codec(client: StoreClient, name: impl Into<String>, codec: C) -> Self {
        Self {
            client,
            options: match_first(),
            name: name.into(),
            account: None,
            codec,
            _value: PhantomData,
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Rewrite the stored account, then rebind this handle to it.
    pub fn set_account(&mut self, account: Option<String>) -> Result<(), KeychainError> {
        super::write_account(self, &self.client, account.as_deref())?;
        self.account = account;
        Ok(())
    }
}

impl<T, C> SecureItem<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    /// The stored value, `None` if no item exists yet.
    pub fn get(&self) -> Result<Option<T>, KeychainError> {
        match super::read_payload(self, &self.client)? {
            Some(bytes) => Ok(Some(self.codec.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Store `value`, or remove the item when `None`.
    pub fn set(&self, value: Option<&T>) -> Result<(), KeychainError> {
        let payload = value.map(|v| self.codec.encode(v)).transpose()?;
        super::write_payload(self, &self.client, payload)
    }
}

impl<T, C> Queryable for SecureItem<T, C> {
    fn identity_attributes(&self) -> AttributeSet {
        let attributes = AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::label(self.name.as_str()))
            .with(Attribute::service(self.name.as_str()));

        match &self.account {
            Some(account) => attributes.with(Attribute::account(account.as_str())),
            None => attributes,
        }
    }

    fn retrieval_options(&self) -> OptionSet {
        self.options.clone()
    }
}

impl<T, C: fmt::Debug> fmt::Debug for SecureItem<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureItem")
            .field("name", &self.name)
            .field("account", &self.account)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::keys;
    use crate::credential::CodecError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Wrapped {
        value: String,
    }

    /// JSON behind a version tag.
    #[derive(Debug, Clone, Copy)]
    struct PrefixedJson;

    impl Codec for PrefixedJson {
        fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
            let mut bytes = b"v1:".to_vec();
            bytes.extend(JsonCodec.encode(value)?);
            Ok(bytes)
        }

        fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
            let body = bytes
                .strip_prefix(b"v1:")
                .ok_or_else(|| CodecError::Decode("missing version prefix".to_string()))?;
            JsonCodec.decode(body)
        }
    }

    #[test]
    fn test_name_is_label_and_service() {
        let item: SecureItem<Wrapped> = SecureItem::new(StoreClient::in_memory(), "com.example");
        let identity = item.identity_attributes().to_query();
        assert_eq!(identity[keys::LABEL].as_str(), Some("com.example"));
        assert_eq!(identity[keys::SERVICE].as_str(), Some("com.example"));
    }

    #[test]
    fn test_round_trip_and_clear() {
        let item: SecureItem<Wrapped> = SecureItem::new(StoreClient::in_memory(), "svc");
        let value = Wrapped {
            value: "x".to_string(),
        };

        assert_eq!(item.get().unwrap(), None);
        item.set(Some(&value)).unwrap();
        assert_eq!(item.get().unwrap(), Some(value));

        item.set(None).unwrap();
        assert_eq!(item.get().unwrap(), None);
    }

    #[test]
    fn test_custom_codec() {
        let client = StoreClient::in_memory();
        let item: SecureItem<Wrapped, PrefixedJson> = SecureItem::with_codec(client.clone(), "svc", PrefixedJson);
        let value = Wrapped {
            value: "y".to_string(),
        };
        item.set(Some(&value)).unwrap();
        assert_eq!(item.get().unwrap(), Some(value));

        // The same item read through the default codec does not decode.
        let plain: SecureItem<Wrapped> = SecureItem::new(client, "svc");
        let err = plain.get().unwrap_err();
        assert!(matches!(err, KeychainError::UnexpectedData { .. }));
    }

    #[test]
    fn test_set_account_keeps_value() {
        let mut item: SecureItem<Wrapped> = SecureItem::new(StoreClient::in_memory(), "svc").with_account("alice");
        let value = Wrapped {
            value: "z".to_string(),
        };
        item.set(Some(&value)).unwrap();

        item.set_account(Some("bob".to_string())).unwrap();
        assert_eq!(item.account(), Some("bob"));
        assert_eq!(item.get().unwrap(), Some(value));
    }
}
