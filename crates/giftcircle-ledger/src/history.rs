//! Read-only transaction history projections.
//!
//! This is the one place the display contract is enforced: a view of an
//! anonymous contribution carries no contributor identity, and a view of a
//! hidden-amount contribution carries no amount. The underlying
//! [`Contribution`] keeps the true values.

use std::collections::{BTreeMap, HashMap};

use giftcircle_types::{Amount, ContributionId, Currency, ItemId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::config::HistoryLabels;
use crate::item::{Contribution, ContributionType, WishlistItem};

/// Resolves contributor ids to display names.
///
/// Implemented by whatever user directory the caller has; the ledger never
/// stores names.
pub trait ContributorDirectory {
    fn display_name(&self, user_id: &UserId) -> Option<String>;
}

impl ContributorDirectory for HashMap<UserId, String> {
    fn display_name(&self, user_id: &UserId) -> Option<String> {
        self.get(user_id).cloned()
    }
}

impl ContributorDirectory for BTreeMap<UserId, String> {
    fn display_name(&self, user_id: &UserId) -> Option<String> {
        self.get(user_id).cloned()
    }
}

/// A directory that knows nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl ContributorDirectory for NoDirectory {
    fn display_name(&self, _user_id: &UserId) -> Option<String> {
        None
    }
}

/// Who a history entry is from, as far as readers may know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContributorDisplay {
    Named { name: String },
    Unknown,
    Anonymous,
}

/// How much a history entry is for, as far as readers may know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmountDisplay {
    Visible { amount: Amount },
    Hidden,
}

/// One redacted history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    pub contribution_id: ContributionId,
    pub item_id: ItemId,
    pub item_title: String,
    pub contribution_type: ContributionType,
    pub amount: AmountDisplay,
    pub contributor: ContributorDisplay,
    pub timestamp: Timestamp,
}

impl TransactionView {
    pub fn contributor_label<'a>(&'a self, labels: &'a HistoryLabels) -> &'a str {
        match &self.contributor {
            ContributorDisplay::Named { name } => name,
            ContributorDisplay::Unknown => &labels.unknown_contributor,
            ContributorDisplay::Anonymous => &labels.anonymous,
        }
    }

    /// `"+$100.00"`, or the hidden-amount placeholder.
    pub fn amount_label(&self, labels: &HistoryLabels, currency: &Currency) -> String {
        match self.amount {
            AmountDisplay::Visible { amount } => format!("+{}", currency.format(amount)),
            AmountDisplay::Hidden => labels.hidden_amount.clone(),
        }
    }

    pub fn visible_amount(&self) -> Option<Amount> {
        match self.amount {
            AmountDisplay::Visible { amount } => Some(amount),
            AmountDisplay::Hidden => None,
        }
    }
}

/// Project a single contribution, applying redaction.
pub fn project(
    item: &WishlistItem,
    contribution: &Contribution,
    directory: &dyn ContributorDirectory,
) -> TransactionView {
    let contributor = if contribution.is_anonymous {
        ContributorDisplay::Anonymous
    } else {
        match directory.display_name(&contribution.contributor_id) {
            Some(name) => ContributorDisplay::Named { name },
            None => ContributorDisplay::Unknown,
        }
    };

    let amount = if contribution.is_amount_hidden {
        AmountDisplay::Hidden
    } else {
        AmountDisplay::Visible {
            amount: contribution.amount,
        }
    };

    TransactionView {
        contribution_id: contribution.id.clone(),
        item_id: item.id.clone(),
        item_title: item.title.clone(),
        contribution_type: contribution.contribution_type,
        amount,
        contributor,
        timestamp: contribution.timestamp,
    }
}

/// Contributions received on `user_id`'s items, newest first.
///
/// A finite snapshot; call again to pick up later contributions.
pub fn list_transaction_history<'a, I>(
    user_id: &UserId,
    items: I,
    directory: &dyn ContributorDirectory,
) -> Vec<TransactionView>
where
    I: IntoIterator<Item = &'a WishlistItem>,
{
    let mut views: Vec<TransactionView> = items
        .into_iter()
        .filter(|item| item.is_owned_by(user_id))
        .flat_map(|item| item.contributions().iter().map(move |c| (item, c)))
        .map(|(item, c)| project(item, c, directory))
        .collect();

    sort_newest_first(&mut views);
    views
}

/// Contributor history of one item, newest first.
pub fn item_history(item: &WishlistItem, directory: &dyn ContributorDirectory) -> Vec<TransactionView> {
    let mut views: Vec<TransactionView> = item
        .contributions()
        .iter()
        .map(|c| project(item, c, directory))
        .collect();

    sort_newest_first(&mut views);
    views
}

fn sort_newest_first(views: &mut [TransactionView]) {
    views.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
