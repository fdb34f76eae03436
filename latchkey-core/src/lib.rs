//! # Latchkey Core
//!
//! Typed queries over a platform credential store (Keychain-style).
//!
//! This crate provides:
//! - A catalog of typed attributes and search options with the store's
//!   canonical keys
//! - Key-deduplicated attribute and option sets that flatten to queries
//! - A [`StoreClient`] with read / upsert / remove over a pluggable
//!   [`Backend`]
//! - The [`Queryable`] trait, giving CRUD to anything that can name its item
//! - Typed handles: [`InternetCredential`], [`GenericCredential`] and
//!   [`SecureItem`]
//! - In-memory and (optionally) keyring-based backends
//!
//! ## Quick Start
//!
//! ```
//! use latchkey_core::{GenericCredential, StoreClient};
//!
//! let client = StoreClient::in_memory();
//! let credential = GenericCredential::new(client, "api.example.com").with_account("alice");
//!
//! credential.set(Some("hunter2"))?;
//! assert_eq!(credential.get()?.map(|s| s.expose().to_string()), Some("hunter2".to_string()));
//! # Ok::<(), latchkey_core::KeychainError>(())
//! ```

pub mod attribute;
pub mod backend;
pub mod client;
pub mod credential;
pub mod error;
pub mod option;
pub mod queryable;
pub mod secret;
pub mod set;
pub mod value;

// Re-export commonly used types at crate root
pub use attribute::{
    keys,
    ApplicationAttribute,
    Attribute,
    AuthenticationType,
    EntryAttribute,
    GlobalAttribute,
    InternetAttribute,
    InternetProtocol,
    Kind,
    Synchronizable,
    UnknownProtocol,
};

pub use option::{
    match_all,
    match_first,
    MatchLimit,
    SearchOption,
};

pub use set::{
    merge_queries,
    AttributeSet,
    Item,
    Keyed,
    KeyedSet,
    OptionSet,
    Query,
};

pub use value::AttributeValue;

pub use backend::{
    create_backend,
    Backend,
    BackendStatus,
    MemoryBackend,
};

#[cfg(feature = "keyring-store")]
pub use backend::KeyringBackend;

pub use client::{StoreClient, UpsertPolicy};

pub use queryable::Queryable;

pub use credential::{
    Codec,
    CodecError,
    GenericCredential,
    InternetCredential,
    JsonCodec,
    SecureItem,
};

pub use secret::Secret;

pub use error::{KeychainError, Operation};
