//! Storage abstraction layer for dictionary entries.
//!
//! This module defines the repository interface the `Dictionary` handle
//! talks to, decoupling it from the concrete store.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::storage::{EntryStoreBackend, MemoryEntryStore};
//!
//! let store = MemoryEntryStore::new();
//! store.save_entry(&entry).await?;
//! ```

mod memory;
mod traits;

pub use memory::MemoryEntryStore;
pub use traits::EntryStoreBackend;
