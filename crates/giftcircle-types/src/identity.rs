//! Identity types for GiftCircle
//!
//! Every identifier is a distinct newtype so a user id can never be passed
//! where an item id is expected. They wrap strings rather than UUIDs because
//! ids handed in by an external store are opaque (`"u1"`, `"w3"`); ids minted
//! locally are prefixed UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::TypesError;

macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh id (`<prefix>_<uuid>`)
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::new_v4()))
            }

            /// Wrap an id issued elsewhere. Empty or blank ids are rejected.
            pub fn parse(s: &str) -> Result<Self, TypesError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(TypesError::InvalidIdentifier(format!("empty {} id", $prefix)));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id_type!(UserId, "user", "Unique identifier for a user (wish owner or contributor)");
define_id_type!(ItemId, "item", "Unique identifier for a wishlist item");
define_id_type!(ContributionId, "contrib", "Unique identifier for a contribution");
define_id_type!(EventId, "event", "Unique identifier for a gifting event");
define_id_type!(CircleId, "circle", "Unique identifier for a gift circle");
