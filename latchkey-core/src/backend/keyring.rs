//! OS keyring-backed backend implementation.

use keyring::Entry;

use super::matching::{self, SearchControls};
use super::{status, Backend, BackendStatus};
use crate::attribute::keys;
use crate::set::{Item, Query};
use crate::value::AttributeValue;

/// OS keyring-backed backend.
///
/// This backend uses the platform's native keyring service:
/// - macOS: Keychain
/// - Linux: Secret Service API over D-Bus
/// - Windows: Credential Manager
///
/// # Entry Layout
///
/// Platform keyrings address entries by a `(service, user)` pair and store a
/// single opaque secret. Each item is stored as one entry whose secret is the
/// JSON-encoded item. The entry service is `{namespace}:{class}:{locator}`,
/// where the locator is built from the class's locating attributes:
///
/// - generic passwords: `service`
/// - internet passwords: `protocol://server:port/path` plus security domain
///   and authentication type
/// - everything else: `label`
///
/// The entry user is the item's account, or the namespace for items without
/// one. Remaining attributes live inside the stored item and are matched after
/// the entry is loaded.
///
/// The keyring cannot enumerate entries, so a query must carry its class's
/// locating attributes. A query without an account only finds the item stored
/// without one.
///
/// # Example
///
/// ```rust,ignore
/// use latchkey_core::{KeyringBackend, StoreClient};
///
/// let backend = KeyringBackend::try_new("latchkey").unwrap();
/// let client = StoreClient::new(backend);
/// ```
pub struct KeyringBackend {
    namespace: String,
}

/// Keyring address of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    service: String,
    user: String,
}

impl KeyringBackend {
    /// Try to create a new keyring backend.
    ///
    /// A marker is written to a `{namespace}:__test__` entry and read back
    /// through a second handle. Returns `NOT_AVAILABLE` if the platform store
    /// is missing, refuses access, or does not keep what it was given.
    pub fn try_new(namespace: &str) -> Result<Self, BackendStatus> {
        let test_service = format!("{}:__test__", namespace);
        match persists(&test_service, namespace) {
            Ok(true) => Ok(Self {
                namespace: namespace.to_string(),
            }),
            Ok(false) => {
                tracing::warn!("keyring backend not available: test entry was not kept");
                Err(BackendStatus::Other(status::NOT_AVAILABLE))
            }
            Err(e) => {
                tracing::warn!("keyring backend not available: {}", e);
                Err(BackendStatus::Other(status::NOT_AVAILABLE))
            }
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Keyring address of the item a query locates.
    fn locate(&self, query: &Query) -> Result<Location, BackendStatus> {
        let class = matching::require_class(query)?;
        let text = |key: &str| query.get(key).and_then(AttributeValue::as_str);

        let locator = match class {
            "genp" => text(keys::SERVICE).map(str::to_string),
            "inet" => text(keys::SERVER).map(|server| {
                let port = query
                    .get(keys::PORT)
                    .and_then(AttributeValue::as_integer)
                    .map(|p| format!(":{}", p))
                    .unwrap_or_default();
                format!(
                    "{}://{}{}{}#{}#{}",
                    text(keys::PROTOCOL).unwrap_or("").trim_end(),
                    server,
                    port,
                    text(keys::PATH).unwrap_or(""),
                    text(keys::SECURITY_DOMAIN).unwrap_or(""),
                    text(keys::AUTHENTICATION_TYPE).unwrap_or(""),
                )
            }),
            _ => text(keys::LABEL).map(str::to_string),
        };

        let Some(locator) = locator else {
            tracing::debug!(class, "query lacks locating attributes for keyring lookup");
            return Err(BackendStatus::Other(status::UNIMPLEMENTED));
        };

        // Some platforms reject an empty user.
        let user = text(keys::ACCOUNT)
            .filter(|account| !account.is_empty())
            .unwrap_or(self.namespace.as_str());

        Ok(Location {
            service: format!("{}:{}:{}", self.namespace, class, locator),
            user: user.to_string(),
        })
    }

    /// Create a keyring entry for the given location.
    fn create_entry(&self, location: &Location) -> Result<Entry, BackendStatus> {
        Entry::new(&location.service, &location.user).map_err(map_keyring_error)
    }

    /// Load the item stored in `entry`, if any.
    fn load(&self, entry: &Entry) -> Result<Option<Item>, BackendStatus> {
        match entry.get_secret() {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                tracing::warn!("stored keyring item is not valid JSON: {}", e);
                BackendStatus::Other(status::DECODE)
            }),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn store(&self, entry: &Entry, item: &Item) -> Result<(), BackendStatus> {
        let bytes = serde_json::to_vec(item).map_err(|e| {
            tracing::warn!("failed to encode keyring item: {}", e);
            BackendStatus::Other(status::DECODE)
        })?;
        entry.set_secret(&bytes).map_err(map_keyring_error)
    }

    /// Load the located item only if it satisfies the whole query.
    fn load_matching(&self, query: &Query) -> Result<(Location, Entry, Item), BackendStatus> {
        let location = self.locate(query)?;
        let entry = self.create_entry(&location)?;
        match self.load(&entry)? {
            Some(item) if matching::matches(&item, query) => Ok((location, entry, item)),
            _ => Err(BackendStatus::ItemNotFound),
        }
    }
}

/// Write a marker through one entry and read it back through a fresh one.
fn persists(service: &str, user: &str) -> keyring::Result<bool> {
    let marker = format!("latchkey-{}", std::process::id());
    Entry::new(service, user)?.set_password(&marker)?;

    let reader = Entry::new(service, user)?;
    let read = reader.get_password();
    if read.is_ok() {
        let _ = reader.delete_credential();
    }

    match read {
        Ok(stored) => Ok(stored == marker),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(e),
    }
}

fn map_keyring_error(error: keyring::Error) -> BackendStatus {
    match error {
        keyring::Error::NoEntry => BackendStatus::ItemNotFound,
        keyring::Error::Ambiguous(_) => BackendStatus::DuplicateItem,
        keyring::Error::NoStorageAccess(e) => {
            tracing::warn!("keyring storage not accessible: {}", e);
            BackendStatus::Other(status::INTERACTION_NOT_ALLOWED)
        }
        keyring::Error::PlatformFailure(e) => {
            tracing::warn!("platform keyring failure: {}", e);
            BackendStatus::Other(status::NOT_AVAILABLE)
        }
        e => {
            tracing::warn!("keyring error: {}", e);
            BackendStatus::Other(status::PARAM)
        }
    }
}

impl std::fmt::Debug for KeyringBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringBackend")
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl Backend for KeyringBackend {
    fn find(&self, query: &Query) -> Result<Vec<Item>, BackendStatus> {
        let (_, _, item) = self.load_matching(query)?;
        Ok(vec![SearchControls::from_query(query).project(&item)])
    }

    fn update(&self, query: &Query, attributes: &Query) -> Result<(), BackendStatus> {
        let (location, entry, mut item) = self.load_matching(query)?;
        matching::apply_update(&mut item, attributes);

        let relocated = self.locate(&item)?;
        if relocated == location {
            return self.store(&entry, &item);
        }

        let target = self.create_entry(&relocated)?;
        if self.load(&target)?.is_some() {
            return Err(BackendStatus::DuplicateItem);
        }
        self.store(&target, &item)?;
        entry.delete_credential().map_err(map_keyring_error)
    }

    fn insert(&self, attributes: &Query) -> Result<(), BackendStatus> {
        let item = matching::new_item(attributes);
        let entry = self.create_entry(&self.locate(&item)?)?;

        if self.load(&entry)?.is_some() {
            return Err(BackendStatus::DuplicateItem);
        }
        self.store(&entry, &item)
    }

    fn delete(&self, query: &Query) -> Result<(), BackendStatus> {
        let (_, entry, _) = self.load_matching(query)?;
        entry.delete_credential().map_err(map_keyring_error)
    }
}
