//! Ledger error types
//!
//! Every variant is a local validation failure. Nothing here is transient:
//! the caller has to change its input or the item's state before retrying.

use giftcircle_types::{Amount, ContributionId, ItemId, UserId};
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    #[error("Item {item_id} is not active")]
    ItemNotActive { item_id: ItemId },

    #[error("Item {item_id} has already been cancelled")]
    ItemAlreadyCancelled { item_id: ItemId },

    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    #[error("Item {item_id} already exists")]
    DuplicateItem { item_id: ItemId },

    #[error("Item {item_id} holds contribution {contribution_id} more than once")]
    DuplicateContribution {
        item_id: ItemId,
        contribution_id: ContributionId,
    },

    #[error("Item {item_id} records funded amount {recorded} but its contributions sum to {expected}")]
    FundingMismatch {
        item_id: ItemId,
        recorded: Amount,
        expected: Amount,
    },

    #[error("Contribution of {requested} to item {item_id} exceeds the remaining {remaining}")]
    ExceedsRemaining {
        item_id: ItemId,
        requested: Amount,
        remaining: Amount,
    },

    #[error("Contribution of {requested} exceeds the gift limit of {limit}")]
    ExceedsGiftLimit { requested: Amount, limit: Amount },

    #[error("Wallet balance of {user_id} does not fit in an amount")]
    BalanceOverflow { user_id: UserId },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
