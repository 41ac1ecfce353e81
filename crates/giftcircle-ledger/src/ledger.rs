//! The ledger: an item arena plus the clock, config and event channel the
//! funding operations need. All state is explicit; there is no global.

use giftcircle_types::{Amount, CircleId, EventId, ItemId, UserId};
use tokio::sync::broadcast;

use crate::arena::ItemArena;
use crate::clock::LogicalClock;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::events::LedgerEvent;
use crate::funding::{self, ContributionRequest};
use crate::history::{self, ContributorDirectory, TransactionView};
use crate::item::{Contribution, WishlistItem};
use crate::wallet::{self, WalletBalance};

/// Everything needed to create a wishlist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub owner_id: UserId,
    pub title: String,
    pub price: Amount,
    pub description: String,
    pub product_url: Option<String>,
    pub event_id: Option<EventId>,
    pub circle_id: Option<CircleId>,
}

impl NewItem {
    pub fn new(owner_id: UserId, title: impl Into<String>, price: Amount) -> Self {
        Self {
            owner_id,
            title: title.into(),
            price,
            description: String::new(),
            product_url: None,
            event_id: None,
            circle_id: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    pub fn event(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn circle(mut self, circle_id: CircleId) -> Self {
        self.circle_id = Some(circle_id);
        self
    }
}

/// The GiftCircle contribution ledger
///
/// Single-session and synchronous. Wrap it in [`crate::SharedLedger`] for
/// concurrent writers.
#[derive(Debug)]
pub struct Ledger {
    arena: ItemArena,
    clock: LogicalClock,
    config: LedgerConfig,
    events: broadcast::Sender<LedgerEvent>,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            arena: ItemArena::new(),
            clock: LogicalClock::new(),
            config,
            events,
        }
    }

    /// Rehydrate a ledger from items fetched from an external store.
    pub fn from_items<I>(config: LedgerConfig, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = WishlistItem>,
    {
        let mut ledger = Self::new(config);
        for item in items {
            ledger.insert_item(item)?;
        }
        Ok(ledger)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: LedgerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Create an active, unfunded item.
    pub fn create_item(&mut self, new_item: NewItem) -> Result<&WishlistItem> {
        let created_at = self.clock.tick();
        let mut item = WishlistItem::new(new_item.owner_id, new_item.title, new_item.price, created_at)?
            .with_description(new_item.description);
        item.product_url = new_item.product_url;
        item.event_id = new_item.event_id;
        item.circle_id = new_item.circle_id;

        let item_id = item.id.clone();
        let event = LedgerEvent::ItemCreated {
            item_id: item_id.clone(),
            owner_id: item.owner_id.clone(),
            price: item.price,
            timestamp: created_at,
        };

        self.arena.insert(item)?;
        tracing::info!(item_id = %item_id, "Item created");
        self.emit(event);

        self.arena
            .get(&item_id)
            .ok_or_else(|| LedgerError::ItemNotFound {
                item_id: item_id.clone(),
            })
    }

    /// Add an item that already exists elsewhere (e.g. loaded from a store).
    ///
    /// The funding invariant is re-checked and the clock moves past every
    /// timestamp on the item.
    pub fn insert_item(&mut self, item: WishlistItem) -> Result<()> {
        item.verify_funding()?;

        let created_at = item.created_at;
        let latest = item.latest_timestamp();
        tracing::debug!(item_id = %item.id, contributions = item.contributions().len(), "Item loaded");
        self.arena.insert(item)?;

        // Only an accepted item may move the clock
        self.clock.observe(created_at);
        if let Some(latest) = latest {
            self.clock.observe(latest);
        }
        Ok(())
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&WishlistItem> {
        self.arena.get(item_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &WishlistItem> {
        self.arena.iter()
    }

    pub fn items_owned_by<'a>(&'a self, user_id: &UserId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.arena.owned_by(user_id)
    }

    pub fn items_in_circle<'a>(&'a self, circle_id: &'a CircleId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.arena.in_circle(circle_id)
    }

    pub fn items_for_event<'a>(&'a self, event_id: &'a EventId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.arena.for_event(event_id)
    }

    /// Record a contribution against an item. See [`funding::record_contribution`].
    pub fn record_contribution(
        &mut self,
        item_id: &ItemId,
        request: ContributionRequest,
    ) -> Result<Contribution> {
        let item = self.arena.get_mut(item_id)?;
        let contribution = funding::record_contribution(item, &mut self.clock, request, &self.config)?;

        let event = LedgerEvent::ContributionRecorded {
            item_id: item.id.clone(),
            owner_id: item.owner_id.clone(),
            contribution_id: contribution.id.clone(),
            contribution_type: contribution.contribution_type,
            timestamp: contribution.timestamp,
        };
        self.emit(event);

        Ok(contribution)
    }

    /// Cancel an item. See [`funding::cancel_item`].
    pub fn cancel_item(&mut self, item_id: &ItemId) -> Result<&WishlistItem> {
        let item = self.arena.get_mut(item_id)?;
        let changed = funding::cancel_item(item, self.config.cancel_policy)?;

        if changed {
            let event = LedgerEvent::ItemCancelled {
                item_id: item.id.clone(),
                owner_id: item.owner_id.clone(),
                timestamp: self.clock.tick(),
            };
            self.emit(event);
        }

        self.arena
            .get(item_id)
            .ok_or_else(|| LedgerError::ItemNotFound {
                item_id: item_id.clone(),
            })
    }

    pub fn wallet_balance(&self, user_id: &UserId) -> Result<WalletBalance> {
        let balance = wallet::compute_wallet_balance(user_id, self.arena.owned_by(user_id))?;
        tracing::debug!(user_id = %user_id, "Wallet balance computed");
        Ok(balance)
    }

    /// Redacted history of contributions received by `user_id`, newest first.
    pub fn transaction_history(
        &self,
        user_id: &UserId,
        directory: &dyn ContributorDirectory,
    ) -> Vec<TransactionView> {
        history::list_transaction_history(user_id, self.arena.owned_by(user_id), directory)
    }

    /// The newest `limit` entries of [`Self::transaction_history`].
    pub fn recent_activity(
        &self,
        user_id: &UserId,
        directory: &dyn ContributorDirectory,
        limit: usize,
    ) -> Vec<TransactionView> {
        let mut views = self.transaction_history(user_id, directory);
        views.truncate(limit);
        views
    }

    /// Redacted contributor history for one item, newest first.
    pub fn item_history(
        &self,
        item_id: &ItemId,
        directory: &dyn ContributorDirectory,
    ) -> Result<Vec<TransactionView>> {
        let item = self
            .arena
            .get(item_id)
            .ok_or_else(|| LedgerError::ItemNotFound {
                item_id: item_id.clone(),
            })?;
        Ok(history::item_history(item, directory))
    }

    /// All items, in insertion order, for the caller to persist.
    pub fn into_items(self) -> Vec<WishlistItem> {
        self.arena.into_items()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
