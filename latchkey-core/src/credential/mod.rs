//! Typed handles over single stored secrets.
//!
//! Each handle is bound to the attributes that locate one item and exposes
//! one read/write slot:
//!
//! - [`InternetCredential`] - password for a server and protocol
//! - [`GenericCredential`] - password for a named service
//! - [`SecureItem`] - any serializable value, encoded with a [`Codec`]
//!
//! Reading an item that does not exist yields `Ok(None)`. Every other
//! failure is returned as an error; absence is never confused with a
//! backend fault. Writing `None` removes the item.

mod codec;
mod generic;
mod internet;
mod item;

pub use codec::{Codec, CodecError, JsonCodec};
pub use generic::GenericCredential;
pub use internet::InternetCredential;
pub use item::SecureItem;

use crate::attribute::{keys, Attribute};
use crate::client::StoreClient;
use crate::error::KeychainError;
use crate::queryable::Queryable;
use crate::secret::Secret;
use crate::value::AttributeValue;

/// Payload bytes of the item `credential` locates, `None` if there is none.
fn read_payload<Q: Queryable>(credential: &Q, client: &StoreClient) -> Result<Option<Vec<u8>>, KeychainError> {
    let mut item = match credential.current_item(client) {
        Ok(item) => item,
        Err(KeychainError::ItemNotFound) => return Ok(None),
        Err(e) => return Err(e),
    };

    match item.remove(keys::VALUE_DATA) {
        Some(AttributeValue::Data(bytes)) => Ok(Some(bytes)),
        Some(_) => Err(KeychainError::unexpected_data("secret payload is not binary data")),
        None => Err(KeychainError::unexpected_data("item was returned without its secret payload")),
    }
}

/// Store `payload` on the located item, or remove the item for `None`.
fn write_payload<Q: Queryable>(
    credential: &Q,
    client: &StoreClient,
    payload: Option<Vec<u8>>,
) -> Result<(), KeychainError> {
    match payload {
        Some(bytes) => credential.update(client, [Attribute::password(bytes)]),
        None => credential.delete(client),
    }
}

/// Rewrite the account attribute of the located item.
///
/// Clearing the account stores an empty one.
fn write_account<Q: Queryable>(
    credential: &Q,
    client: &StoreClient,
    account: Option<&str>,
) -> Result<(), KeychainError> {
    credential.update(client, [Attribute::account(account.unwrap_or(""))])
}

fn read_password<Q: Queryable>(credential: &Q, client: &StoreClient) -> Result<Option<Secret>, KeychainError> {
    match read_payload(credential, client)? {
        Some(bytes) => Secret::from_utf8(bytes)
            .map(Some)
            .ok_or_else(|| KeychainError::unexpected_data("password is not valid UTF-8")),
        None => Ok(None),
    }
}

fn write_password<Q: Queryable>(
    credential: &Q,
    client: &StoreClient,
    password: Option<&str>,
) -> Result<(), KeychainError> {
    write_payload(credential, client, password.map(|p| p.as_bytes().to_vec()))
}
