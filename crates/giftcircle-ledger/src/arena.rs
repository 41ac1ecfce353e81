//! Item arena keyed by id, with an owner index.

use std::collections::HashMap;

use giftcircle_types::{CircleId, EventId, ItemId, UserId};

use crate::error::{LedgerError, Result};
use crate::item::WishlistItem;

/// All items a ledger knows about. Items are never removed.
#[derive(Debug, Clone, Default)]
pub struct ItemArena {
    items: HashMap<ItemId, WishlistItem>,
    /// Insertion order
    order: Vec<ItemId>,
    by_owner: HashMap<UserId, Vec<ItemId>>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: WishlistItem) -> Result<()> {
        if self.items.contains_key(&item.id) {
            return Err(LedgerError::DuplicateItem {
                item_id: item.id.clone(),
            });
        }

        self.order.push(item.id.clone());
        self.by_owner
            .entry(item.owner_id.clone())
            .or_default()
            .push(item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    pub fn get(&self, id: &ItemId) -> Option<&WishlistItem> {
        self.items.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ItemId) -> Result<&mut WishlistItem> {
        self.items
            .get_mut(id)
            .ok_or_else(|| LedgerError::ItemNotFound { item_id: id.clone() })
    }

    /// Items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &WishlistItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Only the user's own items; cost is proportional to what they own.
    pub fn owned_by<'a>(&'a self, user_id: &UserId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.by_owner
            .get(user_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.items.get(id))
    }

    pub fn in_circle<'a>(&'a self, circle_id: &'a CircleId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.iter()
            .filter(move |item| item.circle_id.as_ref() == Some(circle_id))
    }

    pub fn for_event<'a>(&'a self, event_id: &'a EventId) -> impl Iterator<Item = &'a WishlistItem> + 'a {
        self.iter()
            .filter(move |item| item.event_id.as_ref() == Some(event_id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order, consuming the arena
    pub fn into_items(mut self) -> Vec<WishlistItem> {
        self.order
            .iter()
            .filter_map(|id| self.items.remove(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftcircle_types::{Amount, Timestamp};

    fn item(id: &str, owner: &str) -> WishlistItem {
        WishlistItem::new(UserId::from(owner), id, Amount::from_major(10), Timestamp::now())
            .unwrap()
            .with_id(ItemId::from(id))
    }

    #[test]
    fn test_insert_and_index() {
        let mut arena = ItemArena::new();
        arena.insert(item("w1", "u1")).unwrap();
        arena.insert(item("w2", "u2")).unwrap();
        arena.insert(item("w3", "u1")).unwrap();

        let mine: Vec<&str> = arena.owned_by(&UserId::from("u1")).map(|i| i.id.as_str()).collect();
        assert_eq!(mine, vec!["w1", "w3"]);
        assert_eq!(arena.owned_by(&UserId::from("nobody")).count(), 0);

        let all: Vec<&str> = arena.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(all, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut arena = ItemArena::new();
        arena.insert(item("w1", "u1")).unwrap();
        assert!(matches!(
            arena.insert(item("w1", "u2")),
            Err(LedgerError::DuplicateItem { .. })
        ));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.owned_by(&UserId::from("u2")).count(), 0);
    }

    #[test]
    fn test_circle_and_event_links() {
        let mut arena = ItemArena::new();
        arena
            .insert(item("w1", "u1").with_circle(CircleId::from("c1")))
            .unwrap();
        arena
            .insert(item("w2", "u2").with_event(EventId::from("e1")))
            .unwrap();

        assert_eq!(arena.in_circle(&CircleId::from("c1")).count(), 1);
        assert_eq!(arena.for_event(&EventId::from("e1")).count(), 1);
        assert_eq!(arena.for_event(&EventId::from("e2")).count(), 0);
    }
}
