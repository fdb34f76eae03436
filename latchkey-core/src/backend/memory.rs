//! In-memory backend implementation.

use parking_lot::RwLock;

use super::matching::{self, SearchControls};
use super::{Backend, BackendStatus};
use crate::option::MatchLimit;
use crate::set::{Item, Query};

/// In-memory backend for testing and development.
///
/// This backend is not persistent; data is lost when the process exits.
/// It follows the platform store's rules closely enough for the CRUD layer to
/// be tested against it: queries need a class, searches honour the match
/// limit and return options, inserts reject primary-key duplicates, and
/// update/delete touch every matching item.
///
/// # Thread Safety
///
/// This implementation uses interior mutability via `RwLock` and is
/// safe to share across threads.
pub struct MemoryBackend {
    items: RwLock<Vec<Item>>,
}

impl MemoryBackend {
    /// Create a new empty memory backend.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("items_count", &self.len())
            .finish()
    }
}

impl Backend for MemoryBackend {
    fn find(&self, query: &Query) -> Result<Vec<Item>, BackendStatus> {
        matching::require_class(query)?;
        let controls = SearchControls::from_query(query);

        let items = self.items.read();
        let mut found = items.iter().filter(|item| matching::matches(item, query));

        let results: Vec<Item> = match controls.limit {
            MatchLimit::First => found.next().map(|item| controls.project(item)).into_iter().collect(),
            MatchLimit::All => found.map(|item| controls.project(item)).collect(),
        };

        if results.is_empty() {
            return Err(BackendStatus::ItemNotFound);
        }
        Ok(results)
    }

    fn update(&self, query: &Query, attributes: &Query) -> Result<(), BackendStatus> {
        matching::require_class(query)?;

        let mut items = self.items.write();
        let (targets, others): (Vec<usize>, Vec<usize>) =
            (0..items.len()).partition(|&i| matching::matches(&items[i], query));

        if targets.is_empty() {
            return Err(BackendStatus::ItemNotFound);
        }

        let mut updated = Vec::with_capacity(targets.len());
        for &index in &targets {
            let mut item = items[index].clone();
            matching::apply_update(&mut item, attributes);
            updated.push(item);
        }

        // Reject the whole update if any result collides with an item it
        // did not touch, or two results collide with each other.
        for (position, item) in updated.iter().enumerate() {
            let clashes_untouched = others
                .iter()
                .any(|&i| matching::same_primary_key(item, &items[i]));
            let clashes_sibling = updated[position + 1..]
                .iter()
                .any(|other| matching::same_primary_key(item, other));
            if clashes_untouched || clashes_sibling {
                return Err(BackendStatus::DuplicateItem);
            }
        }

        for (index, item) in targets.into_iter().zip(updated) {
            items[index] = item;
        }
        Ok(())
    }

    fn insert(&self, attributes: &Query) -> Result<(), BackendStatus> {
        matching::require_class(attributes)?;
        let item = matching::new_item(attributes);

        let mut items = self.items.write();
        if items.iter().any(|existing| matching::same_primary_key(&item, existing)) {
            return Err(BackendStatus::DuplicateItem);
        }
        items.push(item);
        Ok(())
    }

    fn delete(&self, query: &Query) -> Result<(), BackendStatus> {
        matching::require_class(query)?;

        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| !matching::matches(item, query));

        if items.len() == before {
            return Err(BackendStatus::ItemNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{keys, Attribute, Kind};
    use crate::backend::status;
    use crate::option::{match_all, match_first};
    use crate::set::AttributeSet;

    fn generic(service: &str, account: &str) -> AttributeSet {
        AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::service(service))
            .with(Attribute::account(account))
    }

    fn search(identity: AttributeSet) -> Query {
        let mut query = identity.to_query();
        query.extend(match_first().to_query());
        query
    }

    #[test]
    fn test_memory_backend_insert_find() {
        let backend = MemoryBackend::new();
        let item = generic("svc", "alice").with(Attribute::password(b"pw".to_vec()));

        backend.insert(&item.to_query()).unwrap();
        let found = backend.find(&search(generic("svc", "alice"))).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0][keys::VALUE_DATA].as_bytes(), Some(&b"pw"[..]));
        assert_eq!(found[0][keys::ACCOUNT].as_str(), Some("alice"));
        assert!(found[0].contains_key(keys::CREATION_DATE));
    }

    #[test]
    fn test_memory_backend_find_nonexistent() {
        let backend = MemoryBackend::new();
        let result = backend.find(&search(generic("svc", "alice")));
        assert_eq!(result, Err(BackendStatus::ItemNotFound));
    }

    #[test]
    fn test_memory_backend_requires_class() {
        let backend = MemoryBackend::new();
        let classless = AttributeSet::new().with(Attribute::service("svc")).to_query();

        assert_eq!(backend.insert(&classless), Err(BackendStatus::Other(status::PARAM)));
        assert_eq!(backend.find(&classless), Err(BackendStatus::Other(status::PARAM)));
        assert_eq!(backend.delete(&classless), Err(BackendStatus::Other(status::PARAM)));
    }

    #[test]
    fn test_memory_backend_duplicate_insert() {
        let backend = MemoryBackend::new();
        backend.insert(&generic("svc", "alice").to_query()).unwrap();

        let again = generic("svc", "alice").with(Attribute::label("different label"));
        assert_eq!(backend.insert(&again.to_query()), Err(BackendStatus::DuplicateItem));

        backend.insert(&generic("svc", "bob").to_query()).unwrap();
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn test_memory_backend_duplicate_ignores_implicit_sync() {
        let backend = MemoryBackend::new();
        backend.insert(&generic("svc", "alice").to_query()).unwrap();

        let local = generic("svc", "alice").with(Attribute::synchronizable(Some(false)));
        assert_eq!(backend.insert(&local.to_query()), Err(BackendStatus::DuplicateItem));

        let synced = generic("svc", "alice").with(Attribute::synchronizable(Some(true)));
        backend.insert(&synced.to_query()).unwrap();
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn test_memory_backend_match_limit() {
        let backend = MemoryBackend::new();
        backend.insert(&generic("svc", "alice").to_query()).unwrap();
        backend.insert(&generic("svc", "bob").to_query()).unwrap();

        let identity = AttributeSet::new()
            .with(Attribute::kind(Kind::Application))
            .with(Attribute::service("svc"));

        let first = backend.find(&search(identity.clone())).unwrap();
        assert_eq!(first.len(), 1);

        let mut all_query = identity.to_query();
        all_query.extend(match_all().to_query());
        let all = backend.find(&all_query).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_memory_backend_update() {
        let backend = MemoryBackend::new();
        let item = generic("svc", "alice").with(Attribute::comment("keep me"));
        backend.insert(&item.to_query()).unwrap();

        let change = AttributeSet::new().with(Attribute::account("bob")).to_query();
        backend.update(&generic("svc", "alice").to_query(), &change).unwrap();

        let found = backend.find(&search(generic("svc", "bob"))).unwrap();
        assert_eq!(found[0][keys::COMMENT].as_str(), Some("keep me"));
        assert_eq!(
            backend.find(&search(generic("svc", "alice"))),
            Err(BackendStatus::ItemNotFound)
        );
    }

    #[test]
    fn test_memory_backend_update_nonexistent() {
        let backend = MemoryBackend::new();
        let change = AttributeSet::new().with(Attribute::account("bob")).to_query();
        let result = backend.update(&generic("svc", "alice").to_query(), &change);
        assert_eq!(result, Err(BackendStatus::ItemNotFound));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_memory_backend_update_collision() {
        let backend = MemoryBackend::new();
        backend.insert(&generic("svc", "alice").to_query()).unwrap();
        backend.insert(&generic("svc", "bob").to_query()).unwrap();

        let change = AttributeSet::new().with(Attribute::account("bob")).to_query();
        let result = backend.update(&generic("svc", "alice").to_query(), &change);
        assert_eq!(result, Err(BackendStatus::DuplicateItem));
    }

    #[test]
    fn test_memory_backend_delete() {
        let backend = MemoryBackend::new();
        backend.insert(&generic("svc", "alice").to_query()).unwrap();

        backend.delete(&generic("svc", "alice").to_query()).unwrap();
        assert!(backend.is_empty());
        assert_eq!(
            backend.delete(&generic("svc", "alice").to_query()),
            Err(BackendStatus::ItemNotFound)
        );
    }
}
