//! CRUD for anything that can describe the item it stands for.

use crate::attribute::Attribute;
use crate::client::StoreClient;
use crate::error::KeychainError;
use crate::set::{AttributeSet, Item, OptionSet};

/// A value that locates one stored item.
///
/// Implementors declare how the item is identified and how it should be
/// read back; the provided methods supply search / modify / remove on top
/// of a [`StoreClient`].
///
/// ```
/// use latchkey_core::{match_first, Attribute, AttributeSet, Kind, OptionSet, Queryable, StoreClient};
///
/// struct ApiToken;
///
/// impl Queryable for ApiToken {
///     fn identity_attributes(&self) -> AttributeSet {
///         [Attribute::kind(Kind::Application), Attribute::service("api-token")]
///             .into_iter()
///             .collect()
///     }
///
///     fn retrieval_options(&self) -> OptionSet {
///         match_first()
///     }
/// }
///
/// let client = StoreClient::in_memory();
/// ApiToken.update(&client, [Attribute::password(b"t0k3n".to_vec())]).unwrap();
/// assert!(ApiToken.current_item(&client).is_ok());
///
/// ApiToken.delete(&client).unwrap();
/// assert!(ApiToken.current_item(&client).unwrap_err().is_not_found());
/// ```
pub trait Queryable {
    /// Attributes that locate the item, without its payload.
    fn identity_attributes(&self) -> AttributeSet;

    /// Options used when reading the item back.
    fn retrieval_options(&self) -> OptionSet;

    /// Read the located item.
    fn current_item(&self, client: &StoreClient) -> Result<Item, KeychainError> {
        client.search(&self.identity_attributes(), &self.retrieval_options())
    }

    /// Write `attributes` onto the located item, creating it if absent.
    ///
    /// Later attributes with the same key replace earlier ones.
    fn update<I>(&self, client: &StoreClient, attributes: I) -> Result<(), KeychainError>
    where
        I: IntoIterator<Item = Attribute>,
        Self: Sized,
    {
        let changes: AttributeSet = attributes.into_iter().collect();
        client.modify(&changes, &self.identity_attributes())
    }

    /// Remove the located item. Removing an absent item succeeds.
    fn delete(&self, client: &StoreClient) -> Result<(), KeychainError> {
        client.remove_item(&self.identity_attributes())
    }
}
