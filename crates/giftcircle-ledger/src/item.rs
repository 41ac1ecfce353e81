//! Wishlist items and the contributions recorded against them.
//!
//! The funding fields of a [`WishlistItem`] are private. They change only
//! through the ledger operations in [`crate::funding`], which is what keeps
//! `funded_amount == Σ contributions.amount` true after every operation.

use std::collections::HashSet;

use giftcircle_types::{Amount, CircleId, ContributionId, EventId, ItemId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// What the recipient may do with a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionType {
    /// Earmarked for this item only
    Locked,
    /// Credited to the owner's wallet, usable for anything
    Free,
}

/// Item lifecycle. `Active → Cancelled` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Active,
    Cancelled,
}

/// A recorded contribution. Immutable once appended to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub contributor_id: UserId,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    pub timestamp: Timestamp,
    /// Readers of history must not learn who contributed
    #[serde(default)]
    pub is_anonymous: bool,
    /// Readers of history must not learn the amount
    #[serde(default)]
    pub is_amount_hidden: bool,
}

/// A wish with a funding goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ItemId,
    pub owner_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Funding goal, always positive
    pub price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_id: Option<CircleId>,
    pub created_at: Timestamp,

    funded_amount: Amount,
    #[serde(default)]
    contributions: Vec<Contribution>,
    status: ItemStatus,
}

impl WishlistItem {
    /// Create an active, unfunded item.
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        price: Amount,
        created_at: Timestamp,
    ) -> Result<Self> {
        if price.is_zero() {
            return Err(LedgerError::InvalidPrice {
                message: "Price must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            id: ItemId::new(),
            owner_id,
            title: title.into(),
            description: String::new(),
            price,
            product_url: None,
            event_id: None,
            circle_id: None,
            created_at,
            funded_amount: Amount::ZERO,
            contributions: Vec::new(),
            status: ItemStatus::Active,
        })
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    pub fn with_event(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn with_circle(mut self, circle_id: CircleId) -> Self {
        self.circle_id = Some(circle_id);
        self
    }

    pub fn funded_amount(&self) -> Amount {
        self.funded_amount
    }

    /// Contributions in insertion order
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ItemStatus::Cancelled
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Amount still needed to reach the price; zero once fully (or over) funded.
    pub fn remaining(&self) -> Amount {
        self.price.saturating_sub(self.funded_amount)
    }

    /// Funding progress in whole percent, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        self.funded_amount.percent_of(self.price)
    }

    pub fn is_fully_funded(&self) -> bool {
        self.funded_amount >= self.price
    }

    /// Newest contribution timestamp, if any.
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.contributions.iter().map(|c| c.timestamp).max()
    }

    /// Re-check the funding invariant on an item loaded from outside the
    /// ledger: positive price, non-zero contributions with unique ids.
    pub fn verify_funding(&self) -> Result<()> {
        if self.price.is_zero() {
            return Err(LedgerError::InvalidPrice {
                message: format!("Item {} has a zero price", self.id),
            });
        }

        let expected = self
            .contributions
            .iter()
            .try_fold(Amount::ZERO, |acc, c| acc.checked_add(c.amount));

        match expected {
            Some(expected) if expected == self.funded_amount => {}
            Some(expected) => {
                return Err(LedgerError::FundingMismatch {
                    item_id: self.id.clone(),
                    recorded: self.funded_amount,
                    expected,
                })
            }
            None => {
                return Err(LedgerError::InvalidAmount {
                    message: format!("Contributions to item {} overflow", self.id),
                })
            }
        }

        if let Some(c) = self.contributions.iter().find(|c| c.amount.is_zero()) {
            return Err(LedgerError::InvalidAmount {
                message: format!("Contribution {} on item {} is zero", c.id, self.id),
            });
        }

        let mut seen = HashSet::with_capacity(self.contributions.len());
        if let Some(c) = self.contributions.iter().find(|c| !seen.insert(&c.id)) {
            return Err(LedgerError::DuplicateContribution {
                item_id: self.id.clone(),
                contribution_id: c.id.clone(),
            });
        }

        Ok(())
    }

    /// Append a validated contribution. `new_total` must already include it.
    pub(crate) fn push_contribution(&mut self, contribution: Contribution, new_total: Amount) {
        debug_assert_eq!(self.funded_amount.checked_add(contribution.amount), Some(new_total));
        self.contributions.push(contribution);
        self.funded_amount = new_total;
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.status = ItemStatus::Cancelled;
    }
}
