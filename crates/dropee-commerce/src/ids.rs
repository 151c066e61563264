//! String identifiers for storefront records.
//!
//! Each record kind gets its own newtype so a shop id can never be passed
//! where a product id is expected. All of them serialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, generated) => {
        define_id!($(#[$meta])* $name);

        impl $name {
            /// A fresh identifier, unique within this process.
            pub fn generate() -> Self {
                Self(next_id())
            }
        }
    };
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a product in the catalog and on cart lines.
    ProductId
);
define_id!(
    /// Identifies a catalog category.
    CategoryId
);
define_id!(
    /// Identifies the shop a product comes from.
    ShopId
);
define_id!(
    /// Identifies a submitted order.
    OrderId,
    generated
);
define_id!(
    /// Identifies a promotion.
    PromotionId,
    generated
);

/// Clock time in hex followed by a wrapping sequence number.
fn next_id() -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xffff;

    format!("{:x}{:04x}", nanos, seq)
}
