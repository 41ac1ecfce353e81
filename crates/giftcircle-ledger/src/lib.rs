//! GiftCircle Ledger - Contribution ledger for social gifting
//!
//! Friends contribute money toward each other's wishlist items. The ledger
//! owns the funding rules:
//!
//! - Contributions are append-only and immutable once recorded
//! - `funded_amount` always equals the sum of an item's contribution amounts
//! - An item goes `Active → Cancelled` and never back
//! - Wallet balances are derived from history on every read, never stored
//! - History projections redact anonymous contributors and hidden amounts
//!
//! # Invariants
//!
//! 1. Every contribution amount is positive
//! 2. A rejected operation leaves the item unchanged
//! 3. `LOCKED` funds on an active item count as locked; once the item is
//!    cancelled they count as available to the owner
//! 4. `FREE` funds always count as available to the owner

pub mod arena;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod funding;
pub mod history;
pub mod item;
pub mod ledger;
pub mod limits;
pub mod shared;
pub mod wallet;

pub use arena::ItemArena;
pub use clock::LogicalClock;
pub use config::{CancelPolicy, HistoryLabels, LedgerConfig};
pub use error::{LedgerError, Result};
pub use events::LedgerEvent;
pub use funding::{cancel_item, record_contribution, ContributionRequest};
pub use history::{
    item_history, list_transaction_history, AmountDisplay, ContributorDirectory,
    ContributorDisplay, NoDirectory, TransactionView,
};
pub use item::{Contribution, ContributionType, ItemStatus, WishlistItem};
pub use ledger::{Ledger, NewItem};
pub use limits::ContributionLimits;
pub use shared::SharedLedger;
pub use wallet::{compute_wallet_balance, WalletBalance};

pub use giftcircle_types::{
    Amount, CircleId, ContributionId, Currency, EventId, ItemId, Timestamp, UserId,
};
