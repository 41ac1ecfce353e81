//! GiftCircle Types - Foundation types for the gifting ledger
//!
//! This crate has zero dependencies on other giftcircle crates. It defines:
//!
//! - Identity types (UserId, ItemId, ContributionId, ...)
//! - Fixed-point `Amount` in minor units (no floating point)
//! - `Currency` as a display label
//! - `Timestamp` for logical, totally ordered insertion time

pub mod amount;
pub mod currency;
pub mod error;
pub mod identity;
pub mod time;

pub use amount::*;
pub use currency::*;
pub use error::*;
pub use identity::*;
pub use time::*;
