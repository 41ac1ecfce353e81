//! Per-contributor gift limits.
//!
//! A caller-side guard taken from the contributor's gift settings. The
//! ledger itself never consults it: `record_contribution` accepts any
//! positive amount.

use giftcircle_types::Amount;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::item::WishlistItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    /// Amount offered by default
    pub default_amount: Amount,
    /// Largest single contribution this contributor allows themselves
    pub max_amount: Amount,
}

impl ContributionLimits {
    pub fn new(default_amount: Amount, max_amount: Amount) -> Self {
        Self {
            default_amount,
            max_amount,
        }
    }

    /// The default amount, but never more than the item still needs.
    pub fn suggested_amount(&self, item: &WishlistItem) -> Amount {
        self.default_amount.min(item.remaining())
    }

    pub fn check(&self, amount: Amount) -> Result<()> {
        if amount > self.max_amount {
            return Err(LedgerError::ExceedsGiftLimit {
                requested: amount,
                limit: self.max_amount,
            });
        }
        Ok(())
    }
}

impl Default for ContributionLimits {
    fn default() -> Self {
        Self {
            default_amount: Amount::from_major(50),
            max_amount: Amount::from_major(500),
        }
    }
}
