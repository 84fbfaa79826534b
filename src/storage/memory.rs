//! In-Memory Storage
//!
//! Shared-handle map used natively and in tests. Clones see the same data,
//! the way every script on a page sees the same localStorage.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate raw values
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        storage
    }

    /// Make every write fail, like a full or disabled browser store
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.read_only.get() {
            return Err(DomainError::Internal("storage is read-only".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.check_writable()?;
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&mut self) -> DomainResult<()> {
        self.check_writable()?;
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut storage = MemoryStorage::with_entries([("k", "v")]);
        storage.set_read_only(true);
        assert!(storage.set("k", "w").is_err());
        assert!(storage.clear().is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
