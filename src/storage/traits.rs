//! Storage Layer - Core Traits
//!
//! Defines the abstract key-value interface the gateway writes through.
//! Implementations can use browser localStorage, memory, etc.

use crate::domain::DomainResult;

/// String key-value store with localStorage semantics
pub trait KeyValueStore {
    /// Read the raw value under `key`
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Write the raw value under `key`
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete `key` (absent keys are fine)
    fn remove(&mut self, key: &str) -> DomainResult<()>;

    /// Delete every key
    fn clear(&mut self) -> DomainResult<()>;
}
