use chrono::Utc;
use shared::Item;
use std::sync::Mutex;

use super::CatalogError;

struct ItemStoreInner {
    next_id: i64,
    items: Vec<Item>,
}

/// In-memory items store. Ids are assigned monotonically under the lock, so
/// concurrent creates never collide. Entries are immutable once created.
pub struct ItemStore {
    inner: Mutex<ItemStoreInner>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ItemStoreInner {
                next_id: 1,
                items: Vec::new(),
            }),
        }
    }

    pub fn create(&self, name: &str, description: &str) -> Result<Item, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let mut inner = self.inner.lock().unwrap();
        let item = Item {
            id: inner.next_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.items.push(item.clone());
        Ok(item)
    }

    /// Insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.inner.lock().unwrap().items.clone()
    }

    pub fn get(&self, id: i64) -> Result<Item, CatalogError> {
        self.inner
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn create_assigns_monotonic_ids() {
        let store = ItemStore::new();
        let a = store.create("First", "one").unwrap();
        let b = store.create("Second", "two").unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn create_rejects_empty_name() {
        let store = ItemStore::new();
        assert!(matches!(
            store.create("   ", "desc"),
            Err(CatalogError::EmptyName)
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = ItemStore::new();
        store.create("a", "").unwrap();
        store.create("b", "").unwrap();
        store.create("c", "").unwrap();
        let names: Vec<String> = store.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn get_returns_not_found_for_unknown_id() {
        let store = ItemStore::new();
        assert!(matches!(store.get(999_999), Err(CatalogError::NotFound)));
        let created = store.create("Test", "x").unwrap();
        assert_eq!(store.get(created.id).unwrap().name, "Test");
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let store = Arc::new(ItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.create(&format!("item-{t}-{i}"), "").unwrap().id)
                        .collect::<Vec<i64>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
