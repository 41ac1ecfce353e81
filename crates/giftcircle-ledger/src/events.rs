//! Ledger events for observers (activity feeds, notification delivery).
//!
//! Events carry ids, types and timestamps. They never carry contributor
//! identity or contribution amounts, so subscribers cannot sidestep the
//! history redaction rules.

use giftcircle_types::{Amount, ContributionId, ItemId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::item::ContributionType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A wishlist item was created
    ItemCreated {
        item_id: ItemId,
        owner_id: UserId,
        price: Amount,
        timestamp: Timestamp,
    },

    /// A contribution was appended to an item
    ContributionRecorded {
        item_id: ItemId,
        owner_id: UserId,
        contribution_id: ContributionId,
        contribution_type: ContributionType,
        timestamp: Timestamp,
    },

    /// An item moved to cancelled
    ItemCancelled {
        item_id: ItemId,
        owner_id: UserId,
        timestamp: Timestamp,
    },
}

impl LedgerEvent {
    pub fn item_id(&self) -> &ItemId {
        match self {
            Self::ItemCreated { item_id, .. }
            | Self::ContributionRecorded { item_id, .. }
            | Self::ItemCancelled { item_id, .. } => item_id,
        }
    }

    pub fn owner_id(&self) -> &UserId {
        match self {
            Self::ItemCreated { owner_id, .. }
            | Self::ContributionRecorded { owner_id, .. }
            | Self::ItemCancelled { owner_id, .. } => owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_with_type_tag() {
        let event = LedgerEvent::ItemCancelled {
            item_id: ItemId::from("w1"),
            owner_id: UserId::from("u1"),
            timestamp: Timestamp::new(5, 0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ItemCancelled");
        assert_eq!(json["item_id"], "w1");
        assert_eq!(event.owner_id().as_str(), "u1");
    }
}
