//! # Storage Module
//!
//! Handles persistence of the six record collections and of photos.
//!
//! The domain only ever talks to [`FlockStore`], which keeps the whole state in
//! memory and writes each collection through a [`KeyValueStore`] under its own
//! key. The adapter can be swapped (files on disk, memory for tests) without
//! affecting the services.
//!
//! ## Key Responsibilities
//!
//! - **Codec**: JSON encoding of collections, exact for timestamps and weights
//! - **Key-value adapters**: `FileKeyValueStore` and `InMemoryKeyValueStore`
//! - **Image storage**: photo bytes live outside the records; only a reference is kept
//! - **State container**: loading with per-key defaults, typed mutation, observers
//!
//! ## On-disk Layout
//!
//! ```text
//! Chicken Incubator/
//! ├── config.yaml
//! ├── eggsKey.json
//! ├── chicksKey.json
//! ├── hensKey.json
//! ├── envKey.json
//! ├── logsKey.json
//! ├── tasksKey.json
//! └── photos/
//!     └── <uuid>.jpg
//! ```

pub mod codec;
pub mod error;
pub mod file;
pub mod flock_store;
pub mod memory;
pub mod traits;

pub use error::{CodecError, StoreError, StoreResult};
pub use file::{FileImageStorage, FileKeyValueStore};
pub use flock_store::{
    Chicks, Collection, CollectionName, Eggs, Environment, FlockState, FlockStore, Hens, Logs,
    StoreChange, SubscriptionId, Tasks,
};
pub use memory::{InMemoryImageStorage, InMemoryKeyValueStore};
pub use traits::{ImageStorage, KeyValueStore};
