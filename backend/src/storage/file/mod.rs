//! File-backed storage: serialized collections and photos under the data directory.

pub mod image_storage;
pub mod key_value_store;

pub use image_storage::FileImageStorage;
pub use key_value_store::FileKeyValueStore;
