//! Search / modify / remove over a [`Backend`].
//!
//! [`StoreClient`] is the only place backend statuses are turned into
//! [`KeychainError`]s. It offers three primitives over flat queries
//! ([`read`](StoreClient::read), [`upsert`](StoreClient::upsert),
//! [`remove`](StoreClient::remove)) and set-level conveniences that flatten
//! an [`AttributeSet`] / [`OptionSet`] and delegate to them.
//!
//! # Example
//!
//! ```
//! use latchkey_core::{match_first, Attribute, AttributeSet, Kind, StoreClient};
//!
//! let client = StoreClient::in_memory();
//! let identity: AttributeSet = [Attribute::kind(Kind::Application), Attribute::service("svc")]
//!     .into_iter()
//!     .collect();
//!
//! let payload = AttributeSet::new().with(Attribute::password(b"hunter2".to_vec()));
//! client.modify(&payload, &identity).unwrap();
//!
//! let item = client.search(&identity, &match_first()).unwrap();
//! assert_eq!(item["v_Data"].as_bytes(), Some(&b"hunter2"[..]));
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::backend::{Backend, BackendStatus, MemoryBackend};
use crate::error::{KeychainError, Operation};
use crate::set::{merge_queries, AttributeSet, Item, OptionSet, Query};

/// Which side wins a key collision when an upsert falls back to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpsertPolicy {
    /// Payload attributes override identity attributes, so a write can
    /// relabel an item as it creates it.
    #[default]
    PayloadWins,

    /// Identity attributes are kept; the inserted item is always locatable
    /// by the identity query that created it.
    IdentityWins,
}

/// CRUD client over a shared backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct StoreClient {
    backend: Arc<dyn Backend>,
}

impl StoreClient {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend, e.g. from
    /// [`create_backend`](crate::create_backend).
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Client over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Return the first item matching `query`.
    ///
    /// `options` overlay `query` and shape the result; callers normally
    /// pass a match limit of one.
    pub fn read(&self, query: &Query, options: &Query) -> Result<Item, KeychainError> {
        self.read_all(query, options)?
            .into_iter()
            .next()
            .ok_or_else(|| KeychainError::unexpected_data("backend reported a match but returned no item"))
    }

    /// Return every item matching `query`, as limited by `options`.
    pub fn read_all(&self, query: &Query, options: &Query) -> Result<Vec<Item>, KeychainError> {
        let search = merge_queries(query, options);
        debug!(keys = search.len(), "reading keychain items");

        match self.backend.find(&search) {
            Ok(items) => Ok(items),
            Err(BackendStatus::ItemNotFound) => Err(KeychainError::ItemNotFound),
            Err(status) => Err(KeychainError::Backend {
                status,
                operation: Operation::Reading,
            }),
        }
    }

    /// Update the item located by `identity`, inserting it if absent.
    ///
    /// The fallback insert is `identity` overlaid with `attributes`, so a
    /// payload key that also appears in `identity` replaces the identity
    /// value. Use [`upsert_with_policy`](Self::upsert_with_policy) with
    /// [`UpsertPolicy::IdentityWins`] to prevent that.
    pub fn upsert(&self, attributes: &Query, identity: &Query) -> Result<(), KeychainError> {
        self.upsert_with_policy(attributes, identity, UpsertPolicy::PayloadWins)
    }

    /// [`upsert`](Self::upsert) with an explicit collision policy for the
    /// fallback insert.
    ///
    /// The update and the fallback insert are two separate backend calls;
    /// an item created or deleted by another process in between is not
    /// detected.
    pub fn upsert_with_policy(
        &self,
        attributes: &Query,
        identity: &Query,
        policy: UpsertPolicy,
    ) -> Result<(), KeychainError> {
        debug!(keys = attributes.len(), "updating keychain item");

        let status = match self.backend.update(identity, attributes) {
            Ok(()) => return Ok(()),
            Err(BackendStatus::ItemNotFound) => {
                debug!(?policy, "no item to update, inserting");
                let merged = match policy {
                    UpsertPolicy::PayloadWins => merge_queries(identity, attributes),
                    UpsertPolicy::IdentityWins => merge_queries(attributes, identity),
                };
                match self.backend.insert(&merged) {
                    Ok(()) => return Ok(()),
                    Err(status) => status,
                }
            }
            Err(status) => status,
        };

        Err(KeychainError::Backend {
            status,
            operation: Operation::Updating,
        })
    }

    /// Delete every item matching `query`. Deleting nothing is success.
    pub fn remove(&self, query: &Query) -> Result<(), KeychainError> {
        debug!(keys = query.len(), "deleting keychain item");

        match self.backend.delete(query) {
            Ok(()) | Err(BackendStatus::ItemNotFound) => Ok(()),
            Err(status) => Err(KeychainError::Backend {
                status,
                operation: Operation::Deleting,
            }),
        }
    }

    /// Set-level [`read`](Self::read).
    pub fn search(&self, attributes: &AttributeSet, options: &OptionSet) -> Result<Item, KeychainError> {
        self.read(&attributes.to_query(), &options.to_query())
    }

    /// Set-level [`read_all`](Self::read_all).
    pub fn search_all(
        &self,
        attributes: &AttributeSet,
        options: &OptionSet,
    ) -> Result<Vec<Item>, KeychainError> {
        self.read_all(&attributes.to_query(), &options.to_query())
    }

    /// Set-level [`upsert`](Self::upsert).
    pub fn modify(&self, attributes: &AttributeSet, identity: &AttributeSet) -> Result<(), KeychainError> {
        self.upsert(&attributes.to_query(), &identity.to_query())
    }

    /// Set-level [`remove`](Self::remove).
    pub fn remove_item(&self, identity: &AttributeSet) -> Result<(), KeychainError> {
        self.remove(&identity.to_query())
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient").finish_non_exhaustive()
    }
}
