//! Storage Layer
//!
//! Key-value persistence abstractions and implementations.

mod traits;
mod memory;
mod gateway;
pub mod keys;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use traits::KeyValueStore;
pub use memory::MemoryStorage;
pub use gateway::PersistenceGateway;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
