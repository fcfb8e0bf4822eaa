//! Infrastructure layer - key/value storage.

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{KeyValueStore, StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockKeyValueStore;
