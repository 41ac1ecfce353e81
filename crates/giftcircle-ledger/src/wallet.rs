//! Wallet balances derived from contribution history.
//!
//! Nothing here is stored. A balance is recomputed from the items a user
//! owns every time it is read.

use giftcircle_types::{Amount, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::item::{ContributionType, ItemStatus, WishlistItem};

/// A user's funds across all of their items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Usable for anything: `free + released`
    pub available: Amount,
    /// Locked contributions on items that are still active
    pub locked: Amount,
    /// Free contributions on any item
    pub free: Amount,
    /// Locked contributions on cancelled items
    pub released: Amount,
}

impl WalletBalance {
    /// Everything received, or `None` if the parts were built by hand and
    /// overflow. Balances from [`compute_wallet_balance`] always have a total.
    pub fn total(&self) -> Option<Amount> {
        self.available.checked_add(self.locked)
    }
}

/// Derive `user_id`'s wallet from `items`.
///
/// Items owned by other users are skipped, so the full item set can be passed.
/// Fails with [`LedgerError::BalanceOverflow`] rather than capping when the
/// user's combined funds do not fit in an [`Amount`].
pub fn compute_wallet_balance<'a, I>(user_id: &UserId, items: I) -> Result<WalletBalance>
where
    I: IntoIterator<Item = &'a WishlistItem>,
{
    let overflow = || LedgerError::BalanceOverflow {
        user_id: user_id.clone(),
    };
    let mut balance = WalletBalance::default();

    for item in items.into_iter().filter(|item| item.is_owned_by(user_id)) {
        for contribution in item.contributions() {
            let bucket = match (contribution.contribution_type, item.status()) {
                (ContributionType::Free, _) => &mut balance.free,
                (ContributionType::Locked, ItemStatus::Active) => &mut balance.locked,
                (ContributionType::Locked, ItemStatus::Cancelled) => &mut balance.released,
            };
            *bucket = bucket.checked_add(contribution.amount).ok_or_else(overflow)?;
        }
    }

    balance.available = balance.free.checked_add(balance.released).ok_or_else(overflow)?;
    balance.total().ok_or_else(overflow)?;
    Ok(balance)
}
