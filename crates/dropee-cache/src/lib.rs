//! Type-safe key-value storage for the Dropee storefront.
//!
//! Stands in for browser `localStorage`: a [`Storage`] backend keeps raw
//! strings under keys, and [`Cache`] adds JSON serialization on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use dropee_cache::{Cache, FileStorage};
//!
//! let cache = Cache::new(FileStorage::open(".dropee")?);
//!
//! // Store a value
//! cache.set("dropee:cart", &snapshot)?;
//!
//! // Retrieve a value
//! let snapshot: Option<CartSnapshot> = cache.get("dropee:cart")?;
//!
//! // Delete a value
//! cache.delete("dropee:cart")?;
//! ```

mod error;
mod kv;
mod storage;

pub use error::CacheError;
pub use kv::Cache;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStorage, MemoryStorage, Storage};
}
