//! Secret-store backends.
//!
//! This module provides:
//! - [`Backend`] - The four primitive operations every store implements
//! - [`BackendStatus`] - Non-success statuses, carrying the platform code
//! - [`MemoryBackend`] - In-memory implementation for testing
//! - [`KeyringBackend`] - OS keyring implementation (with `keyring-store` feature)
//! - [`create_backend`] - Helper to select a backend based on availability
//!
//! Backends speak flat [`Query`] maps only. Typed attributes, sets and
//! error mapping live one layer up in [`StoreClient`](crate::StoreClient).

use std::fmt;
use std::sync::Arc;

use crate::set::{Item, Query};

mod matching;
mod memory;
#[cfg(feature = "keyring-store")]
mod keyring;

pub use matching::{matches, SearchControls};
pub use memory::MemoryBackend;
#[cfg(feature = "keyring-store")]
pub use self::keyring::KeyringBackend;

/// Platform status codes used by the bundled backends.
pub mod status {
    pub const ITEM_NOT_FOUND: i32 = -25300;
    pub const DUPLICATE_ITEM: i32 = -25299;
    pub const NOT_AVAILABLE: i32 = -25291;
    pub const INTERACTION_NOT_ALLOWED: i32 = -25308;
    pub const DECODE: i32 = -26275;
    pub const PARAM: i32 = -50;
    pub const UNIMPLEMENTED: i32 = -4;
}

/// A non-success status reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// No item matched.
    ItemNotFound,

    /// An insert or update would collide with an existing item.
    DuplicateItem,

    /// Any other platform status code.
    Other(i32),
}

impl BackendStatus {
    /// The raw platform status code.
    pub fn code(&self) -> i32 {
        match self {
            Self::ItemNotFound => status::ITEM_NOT_FOUND,
            Self::DuplicateItem => status::DUPLICATE_ITEM,
            Self::Other(code) => *code,
        }
    }

    /// Map a raw code onto a status.
    pub fn from_code(code: i32) -> Self {
        match code {
            status::ITEM_NOT_FOUND => Self::ItemNotFound,
            status::DUPLICATE_ITEM => Self::DuplicateItem,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound => write!(f, "{} (item not found)", self.code()),
            Self::DuplicateItem => write!(f, "{} (duplicate item)", self.code()),
            Self::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Abstraction over secret storage backends.
///
/// Every query must carry the item class; backends reject class-less
/// queries with [`status::PARAM`].
///
/// Implementations include:
/// - [`MemoryBackend`] - In-memory storage for testing
/// - [`KeyringBackend`] (with `keyring-store` feature) - OS keyring
pub trait Backend: Send + Sync {
    /// Return the items matching `query`, shaped by the search options it
    /// carries. Reports [`BackendStatus::ItemNotFound`] when nothing matches.
    fn find(&self, query: &Query) -> Result<Vec<Item>, BackendStatus>;

    /// Apply `attributes` to every item matching `query`.
    ///
    /// Reports [`BackendStatus::ItemNotFound`] when nothing matches; never
    /// inserts.
    fn update(&self, query: &Query, attributes: &Query) -> Result<(), BackendStatus>;

    /// Insert a new item built from `attributes`.
    fn insert(&self, attributes: &Query) -> Result<(), BackendStatus>;

    /// Delete every item matching `query`.
    fn delete(&self, query: &Query) -> Result<(), BackendStatus>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn find(&self, query: &Query) -> Result<Vec<Item>, BackendStatus> {
        (**self).find(query)
    }

    fn update(&self, query: &Query, attributes: &Query) -> Result<(), BackendStatus> {
        (**self).update(query, attributes)
    }

    fn insert(&self, attributes: &Query) -> Result<(), BackendStatus> {
        (**self).insert(attributes)
    }

    fn delete(&self, query: &Query) -> Result<(), BackendStatus> {
        (**self).delete(query)
    }
}

/// Create a backend with automatic selection.
///
/// # Backend Selection Logic
///
/// - If `prefer_keyring` is `true` and the `keyring-store` feature is enabled:
///   - Attempts to create a [`KeyringBackend`] under `namespace`
///   - Falls back to [`MemoryBackend`] with a warning if the keyring is unavailable
/// - Otherwise: Returns [`MemoryBackend`]
///
/// # Example
///
/// ```rust,ignore
/// use latchkey_core::{create_backend, StoreClient};
///
/// let client = StoreClient::with_backend(create_backend(true, "latchkey"));
/// ```
pub fn create_backend(prefer_keyring: bool, namespace: &str) -> Arc<dyn Backend> {
    #[cfg(feature = "keyring-store")]
    if prefer_keyring {
        match KeyringBackend::try_new(namespace) {
            Ok(backend) => {
                tracing::info!("Using OS keyring for secret storage");
                return Arc::new(backend);
            }
            Err(status) => {
                tracing::warn!(
                    "Keyring unavailable (status {}), falling back to memory backend. \
                     Secrets will not persist across restarts.",
                    status
                );
            }
        }
    }

    #[cfg(not(feature = "keyring-store"))]
    if prefer_keyring {
        tracing::warn!(
            namespace,
            "Keyring storage requested but keyring-store feature not enabled. \
             Using memory backend. Secrets will not persist across restarts."
        );
    }

    tracing::debug!(namespace, "Using in-memory secret storage");
    Arc::new(MemoryBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{keys, Attribute, Kind};
    use crate::option::match_first;
    use crate::set::AttributeSet;

    #[test]
    fn test_status_codes_roundtrip() {
        for expected in [
            BackendStatus::ItemNotFound,
            BackendStatus::DuplicateItem,
            BackendStatus::Other(status::PARAM),
        ] {
            assert_eq!(BackendStatus::from_code(expected.code()), expected);
        }
    }

    #[test]
    fn test_status_display_contains_code() {
        assert!(BackendStatus::ItemNotFound.to_string().contains("-25300"));
        assert_eq!(BackendStatus::Other(-4).to_string(), "-4");
    }

    #[test]
    fn test_create_backend_memory() {
        let backend = create_backend(false, "latchkey-test");

        let item = AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::service("svc"))
            .to_query();
        backend.insert(&item).unwrap();

        let found = backend.find(&item).unwrap();
        assert_eq!(found.len(), 1);
        // No return options were requested.
        assert!(!found[0].contains_key(keys::SERVICE));
    }

    #[test]
    fn test_create_backend_prefer_keyring() {
        // Either the keyring passed its availability check or this is the
        // memory fallback; both must keep what they are given.
        let backend = create_backend(true, "latchkey-test-prefer");

        let service = format!(
            "latchkey-test-prefer-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        let identity = AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::service(service));
        let item = identity.clone().with(Attribute::password(b"test".to_vec()));

        backend.insert(&item.to_query()).unwrap();

        let mut search = identity.to_query();
        search.extend(match_first().to_query());
        let found = backend.find(&search).unwrap();
        assert_eq!(found[0][keys::VALUE_DATA].as_bytes(), Some(&b"test"[..]));

        backend.delete(&identity.to_query()).unwrap();
        assert_eq!(backend.find(&search), Err(BackendStatus::ItemNotFound));
    }
}
