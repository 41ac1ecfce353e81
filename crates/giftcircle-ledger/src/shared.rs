//! Thread-safe ledger handle for server-side use with concurrent writers.
//!
//! Writes take the write lock, so contributions and cancellations on an item
//! are applied one at a time and `funded_amount == Σ amounts` holds under
//! contention. A contribution that loses the race to a cancel is rejected
//! with `ItemNotActive`. Reads share the read lock.

use std::sync::Arc;

use giftcircle_types::{ItemId, UserId};
use tokio::sync::{broadcast, RwLock};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::events::LedgerEvent;
use crate::funding::ContributionRequest;
use crate::history::{ContributorDirectory, TransactionView};
use crate::item::{Contribution, WishlistItem};
use crate::ledger::{Ledger, NewItem};
use crate::wallet::WalletBalance;

#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self::from_ledger(Ledger::new(config))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.inner.read().await.subscribe()
    }

    pub async fn create_item(&self, new_item: NewItem) -> Result<WishlistItem> {
        let mut ledger = self.inner.write().await;
        ledger.create_item(new_item).cloned()
    }

    pub async fn insert_item(&self, item: WishlistItem) -> Result<()> {
        self.inner.write().await.insert_item(item)
    }

    pub async fn item(&self, item_id: &ItemId) -> Result<WishlistItem> {
        self.inner
            .read()
            .await
            .item(item_id)
            .cloned()
            .ok_or_else(|| LedgerError::ItemNotFound {
                item_id: item_id.clone(),
            })
    }

    pub async fn record_contribution(
        &self,
        item_id: &ItemId,
        request: ContributionRequest,
    ) -> Result<Contribution> {
        self.inner
            .write()
            .await
            .record_contribution(item_id, request)
    }

    pub async fn cancel_item(&self, item_id: &ItemId) -> Result<WishlistItem> {
        let mut ledger = self.inner.write().await;
        ledger.cancel_item(item_id).cloned()
    }

    pub async fn wallet_balance(&self, user_id: &UserId) -> Result<WalletBalance> {
        self.inner.read().await.wallet_balance(user_id)
    }

    pub async fn transaction_history(
        &self,
        user_id: &UserId,
        directory: &(dyn ContributorDirectory + Sync),
    ) -> Vec<TransactionView> {
        self.inner.read().await.transaction_history(user_id, directory)
    }

    pub async fn item_history(
        &self,
        item_id: &ItemId,
        directory: &(dyn ContributorDirectory + Sync),
    ) -> Result<Vec<TransactionView>> {
        self.inner.read().await.item_history(item_id, directory)
    }

    /// Snapshot of every item for persistence.
    pub async fn items(&self) -> Vec<WishlistItem> {
        self.inner.read().await.items().cloned().collect()
    }
}
