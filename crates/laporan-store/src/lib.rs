//! Storage layer: a small persistent key-value area and the draft slot on top of it.

mod error;
pub use error::StoreError;

pub mod draft;
pub mod kv;

pub use draft::{DRAFT_KEY, DraftStore};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
