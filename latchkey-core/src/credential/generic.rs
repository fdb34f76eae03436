//! Generic (application) passwords.

use crate::attribute::{Attribute, Kind};
use crate::client::StoreClient;
use crate::error::KeychainError;
use crate::option::match_first;
use crate::queryable::Queryable;
use crate::secret::Secret;
use crate::set::{AttributeSet, OptionSet};

/// Password for a named service.
///
/// The item is located by label, service and, when bound, account. The
/// label defaults to the service name.
#[derive(Debug, Clone)]
pub struct GenericCredential {
    client: StoreClient,
    options: OptionSet,
    label: String,
    service: String,
    account: Option<String>,
}

impl GenericCredential {
    pub fn new(client: StoreClient, service: impl Into<String>) -> Self {
        let service = service.into();
        Self {
            client,
            options: match_first(),
            label: service.clone(),
            service,
            account: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// The stored password, `None` if no item exists yet.
    pub fn get(&self) -> Result<Option<Secret>, KeychainError> {
        super::read_password(self, &self.client)
    }

    /// Store `password`, or remove the item when `None`.
    pub fn set(&self, password: Option<&str>) -> Result<(), KeychainError> {
        super::write_password(self, &self.client, password)
    }

    /// Rewrite the stored account, then rebind this handle to it.
    pub fn set_account(&mut self, account: Option<String>) -> Result<(), KeychainError> {
        super::write_account(self, &self.client, account.as_deref())?;
        self.account = account;
        Ok(())
    }
}

impl Queryable for GenericCredential {
    fn identity_attributes(&self) -> AttributeSet {
        let attributes = AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::label(self.label.as_str()))
            .with(Attribute::service(self.service.as_str()));

        match &self.account {
            Some(account) => attributes.with(Attribute::account(account.as_str())),
            None => attributes,
        }
    }

    fn retrieval_options(&self) -> OptionSet {
        self.options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::keys;

    #[test]
    fn test_label_defaults_to_service() {
        let credential = GenericCredential::new(StoreClient::in_memory(), "svc");
        assert_eq!(credential.label(), "svc");

        let identity = credential.identity_attributes().to_query();
        assert_eq!(identity[keys::CLASS].as_str(), Some("genp"));
        assert_eq!(identity[keys::LABEL].as_str(), Some("svc"));
        assert_eq!(identity[keys::SERVICE].as_str(), Some("svc"));
    }

    #[test]
    fn test_write_then_read() {
        let credential = GenericCredential::new(StoreClient::in_memory(), "svc").with_account("alice");

        assert!(credential.get().unwrap().is_none());
        credential.set(Some("pässwörd")).unwrap();
        assert_eq!(credential.get().unwrap().unwrap().expose(), "pässwörd");

        credential.set(Some("rotated")).unwrap();
        assert_eq!(credential.get().unwrap().unwrap().expose(), "rotated");
    }

    #[test]
    fn test_accounts_are_distinct_items() {
        let client = StoreClient::in_memory();
        let alice = GenericCredential::new(client.clone(), "svc").with_account("alice");
        let bob = GenericCredential::new(client, "svc").with_account("bob");

        alice.set(Some("a")).unwrap();
        bob.set(Some("b")).unwrap();

        assert_eq!(alice.get().unwrap().unwrap().expose(), "a");
        assert_eq!(bob.get().unwrap().unwrap().expose(), "b");
    }

    #[test]
    fn test_set_account_on_empty_store_creates_item() {
        let mut credential = GenericCredential::new(StoreClient::in_memory(), "svc");

        credential.set_account(Some("alice".to_string())).unwrap();
        assert_eq!(credential.account(), Some("alice"));
        // The item exists but was never given a password.
        assert_eq!(credential.get().unwrap().unwrap().expose(), "");
    }

    #[test]
    fn test_non_utf8_payload_is_unexpected() {
        let client = StoreClient::in_memory();
        let credential = GenericCredential::new(client.clone(), "svc");

        credential
            .update(&client, [Attribute::password(vec![0xff, 0xfe])])
            .unwrap();

        let err = credential.get().unwrap_err();
        assert!(matches!(err, KeychainError::UnexpectedData { .. }));
    }
}
