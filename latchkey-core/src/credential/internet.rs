//! Internet passwords.

use crate::attribute::{Attribute, InternetProtocol, Kind};
use crate::client::StoreClient;
use crate::error::KeychainError;
use crate::option::match_first;
use crate::queryable::Queryable;
use crate::secret::Secret;
use crate::set::{AttributeSet, OptionSet};

/// Password for an account on a server.
///
/// The item is located by label, server, protocol and, when bound, account.
/// The label defaults to the server and the protocol to HTTPS.
///
/// # Example
///
/// ```
/// use latchkey_core::{InternetCredential, StoreClient};
///
/// let client = StoreClient::in_memory();
/// let mut login = InternetCredential::new(client, "example.com").with_account("alice");
///
/// assert!(login.get().unwrap().is_none());
/// login.set(Some("hunter2")).unwrap();
/// assert_eq!(login.get().unwrap().unwrap().expose(), "hunter2");
///
/// login.set_account(Some("bob".to_string())).unwrap();
/// assert_eq!(login.get().unwrap().unwrap().expose(), "hunter2");
/// ```
#[derive(Debug, Clone)]
pub struct InternetCredential {
    client: StoreClient,
    options: OptionSet,
    label: String,
    server: String,
    protocol: InternetProtocol,
    account: Option<String>,
}

impl InternetCredential {
    pub fn new(client: StoreClient, server: impl Into<String>) -> Self {
        let server = server.into();
        Self {
            client,
            options: match_first(),
            label: server.clone(),
            server,
            protocol: InternetProtocol::default(),
            account: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_protocol(mut self, protocol: InternetProtocol) -> Self {
        self.protocol = protocol;
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

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn protocol(&self) -> InternetProtocol {
        self.protocol
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

    /// Move the stored item to a different account.
    ///
    /// The bound account only changes once the store accepted the write.
    pub fn set_account(&mut self, account: Option<String>) -> Result<(), KeychainError> {
        super::write_account(self, &self.client, account.as_deref())?;
        self.account = account;
        Ok(())
    }
}

impl Queryable for InternetCredential {
    fn identity_attributes(&self) -> AttributeSet {
        let attributes = AttributeSet::new()
            .with(Attribute::kind(Kind::Internet))
            .with(Attribute::label(self.label.as_str()))
            .with(Attribute::server(self.server.as_str()))
            .with(Attribute::protocol(self.protocol));

        match &self.account {
            Some(account) => attributes.with(Attribute::account(account.as_str())),
            None => attributes,
        }
    }

    fn retrieval_options(&self) -> OptionSet {
        self.options.clone()
    }
}
