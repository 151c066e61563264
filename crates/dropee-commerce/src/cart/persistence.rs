//! Write-through persistence of cart state.
//!
//! [`CartPersistence`] owns the storage side of the cart store. It never
//! returns errors to the caller: a corrupt snapshot is discarded and a
//! failing backend switches the adapter to memory-only mode for the rest of
//! its life.

use dropee_cache::{Cache, Storage};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cart::{CartLine, CartSnapshot};

/// Storage key the cart snapshot is saved under unless one is given.
pub const DEFAULT_CART_KEY: &str = "hashtagDropeeCart";

/// Whether writes still reach durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Every save is written to storage.
    Durable,
    /// Storage failed; state lives only in memory.
    MemoryOnly,
}

/// Saved cart shapes: a snapshot object, or a bare array of lines with no
/// promo code. Both use this crate's own line and product encoding.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Lines(Vec<CartLine>),
    Snapshot(CartSnapshot),
}

impl From<StoredCart> for CartSnapshot {
    fn from(stored: StoredCart) -> Self {
        match stored {
            StoredCart::Lines(items) => CartSnapshot {
                items,
                promo_code: String::new(),
            },
            StoredCart::Snapshot(snapshot) => snapshot,
        }
    }
}

/// Loads and saves [`CartSnapshot`]s under one storage key.
#[derive(Debug)]
pub struct CartPersistence<S> {
    cache: Cache<S>,
    key: String,
    mode: PersistenceMode,
}

impl<S: Storage> CartPersistence<S> {
    /// Adapter over `storage` using `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
            mode: PersistenceMode::Durable,
        }
    }

    /// Read the saved snapshot.
    ///
    /// Returns `None` when nothing is saved, when the saved value is corrupt,
    /// or when storage cannot be read. The last case also degrades the
    /// adapter to memory-only.
    pub fn load(&mut self) -> Option<CartSnapshot> {
        if self.mode == PersistenceMode::MemoryOnly {
            return None;
        }
        match self.cache.get::<StoredCart>(&self.key) {
            Ok(Some(stored)) => {
                debug!(key = %self.key, "restored saved cart");
                Some(stored.into())
            }
            Ok(None) => None,
            Err(e) if e.is_corrupt_value() => {
                warn!(key = %self.key, error = %e, "discarding unreadable saved cart");
                None
            }
            Err(e) => {
                self.degrade(&e);
                None
            }
        }
    }

    /// Write a snapshot. Returns `true` if it reached storage.
    pub fn save(&mut self, snapshot: &CartSnapshot) -> bool {
        if self.mode == PersistenceMode::MemoryOnly {
            return false;
        }
        match self.cache.set(&self.key, snapshot) {
            Ok(()) => true,
            Err(e) => {
                self.degrade(&e);
                false
            }
        }
    }

    /// Current mode.
    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// True once storage has failed.
    pub fn is_memory_only(&self) -> bool {
        self.mode == PersistenceMode::MemoryOnly
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    fn degrade(&mut self, error: &dropee_cache::CacheError) {
        warn!(
            key = %self.key,
            error = %error,
            "cart storage unavailable, continuing in memory only"
        );
        self.mode = PersistenceMode::MemoryOnly;
    }
}
