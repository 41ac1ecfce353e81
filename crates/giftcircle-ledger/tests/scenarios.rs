use std::collections::HashMap;

use giftcircle_ledger::{
    Amount, CancelPolicy, ContributionId, ContributionRequest, ContributorDisplay, Currency,
    HistoryLabels, ItemId, ItemStatus, Ledger, LedgerConfig, LedgerError, LedgerEvent, NewItem,
    Timestamp, UserId, WishlistItem,
};

fn owner() -> UserId {
    UserId::from("u1")
}

fn directory() -> HashMap<UserId, String> {
    HashMap::from([
        (UserId::from("u1"), "Aisha".to_string()),
        (UserId::from("u2"), "Ben".to_string()),
        (UserId::from("u3"), "Chloe".to_string()),
    ])
}

fn ledger_with_item(price: u64) -> (Ledger, ItemId) {
    let mut ledger = Ledger::default();
    let item_id = ledger
        .create_item(NewItem::new(owner(), "Noise-cancelling headphones", Amount::from_major(price)))
        .unwrap()
        .id
        .clone();
    (ledger, item_id)
}

#[test]
fn locked_and_free_contributions_split_the_wallet() {
    let (mut ledger, item_id) = ledger_with_item(350);

    ledger
        .record_contribution(&item_id, ContributionRequest::locked("u2".into(), Amount::from_major(100)))
        .unwrap();
    ledger
        .record_contribution(&item_id, ContributionRequest::free("u3".into(), Amount::from_major(20)))
        .unwrap();

    assert_eq!(ledger.item(&item_id).unwrap().funded_amount(), Amount::from_major(120));

    let balance = ledger.wallet_balance(&owner()).unwrap();
    assert_eq!(balance.locked, Amount::from_major(100));
    assert_eq!(balance.available, Amount::from_major(20));
}

#[test]
fn cancelling_releases_locked_funds_to_available() {
    let (mut ledger, item_id) = ledger_with_item(350);
    ledger
        .record_contribution(&item_id, ContributionRequest::locked("u2".into(), Amount::from_major(50)))
        .unwrap();
    let before = ledger.wallet_balance(&owner()).unwrap();

    let item = ledger.cancel_item(&item_id).unwrap();
    assert_eq!(item.status(), ItemStatus::Cancelled);
    assert_eq!(item.funded_amount(), Amount::from_major(50));
    assert_eq!(item.contributions().len(), 1);

    let after = ledger.wallet_balance(&owner()).unwrap();
    assert_eq!(after.locked, Amount::ZERO);
    assert_eq!(
        after.available,
        before.available.checked_add(Amount::from_major(50)).unwrap()
    );
}

#[test]
fn zero_amount_is_rejected_without_side_effects() {
    let (mut ledger, item_id) = ledger_with_item(350);
    let before = ledger.item(&item_id).unwrap().clone();

    let result = ledger.record_contribution(&item_id, ContributionRequest::free("u2".into(), Amount::ZERO));

    assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    assert_eq!(ledger.item(&item_id).unwrap(), &before);
}

#[test]
fn contributions_to_cancelled_items_are_rejected() {
    let (mut ledger, item_id) = ledger_with_item(350);
    ledger.cancel_item(&item_id).unwrap();
    let before = ledger.item(&item_id).unwrap().clone();

    let result = ledger.record_contribution(&item_id, ContributionRequest::locked("u2".into(), Amount::from_major(10)));

    assert!(matches!(result, Err(LedgerError::ItemNotActive { .. })));
    assert_eq!(ledger.item(&item_id).unwrap(), &before);
}

#[test]
fn history_redacts_anonymous_contributors_and_hidden_amounts() {
    let (mut ledger, item_id) = ledger_with_item(350);
    ledger
        .record_contribution(
            &item_id,
            ContributionRequest::locked("u2".into(), Amount::from_major(30)).anonymous(),
        )
        .unwrap();
    ledger
        .record_contribution(
            &item_id,
            ContributionRequest::free("u3".into(), Amount::from_major(45)).amount_hidden(),
        )
        .unwrap();

    let history = ledger.transaction_history(&owner(), &directory());
    let labels = HistoryLabels::default();
    let usd = Currency::usd();

    let anonymous = history
        .iter()
        .find(|v| v.contributor == ContributorDisplay::Anonymous)
        .unwrap();
    assert_eq!(anonymous.contributor_label(&labels), "Anonymous User");
    assert_eq!(anonymous.visible_amount(), Some(Amount::from_major(30)));

    let hidden = history.iter().find(|v| v.visible_amount().is_none()).unwrap();
    assert_eq!(hidden.contributor_label(&labels), "Chloe");
    assert_eq!(hidden.amount_label(&labels, &usd), "Secret");

    // the records themselves keep the real values
    let item = ledger.item(&item_id).unwrap();
    assert_eq!(item.contributions()[0].contributor_id, UserId::from("u2"));
    assert_eq!(item.contributions()[1].amount, Amount::from_major(45));
    assert_eq!(item.funded_amount(), Amount::from_major(75));
}

#[test]
fn history_only_covers_the_users_own_items_newest_first() {
    let mut ledger = Ledger::default();
    let mine = ledger
        .create_item(NewItem::new(owner(), "Plant", Amount::from_major(40)))
        .unwrap()
        .id
        .clone();
    let theirs = ledger
        .create_item(NewItem::new("u2".into(), "Desk", Amount::from_major(300)))
        .unwrap()
        .id
        .clone();

    ledger
        .record_contribution(&mine, ContributionRequest::free("u2".into(), Amount::from_major(5)))
        .unwrap();
    ledger
        .record_contribution(&theirs, ContributionRequest::free("u1".into(), Amount::from_major(50)))
        .unwrap();
    ledger
        .record_contribution(&mine, ContributionRequest::locked("u3".into(), Amount::from_major(7)))
        .unwrap();

    let history = ledger.transaction_history(&owner(), &directory());
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|v| v.item_id == mine && v.item_title == "Plant"));
    assert_eq!(history[0].visible_amount(), Some(Amount::from_major(7)));
    assert_eq!(history[1].visible_amount(), Some(Amount::from_major(5)));
}

#[test]
fn strict_policy_rejects_double_cancel() {
    let config = LedgerConfig {
        cancel_policy: CancelPolicy::Strict,
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::new(config);
    let item_id = ledger
        .create_item(NewItem::new(owner(), "Watch", Amount::from_major(90)))
        .unwrap()
        .id
        .clone();

    ledger.cancel_item(&item_id).unwrap();
    assert!(matches!(
        ledger.cancel_item(&item_id),
        Err(LedgerError::ItemAlreadyCancelled { .. })
    ));
    assert!(ledger.item(&item_id).unwrap().is_cancelled());
}

#[test]
fn reloaded_items_keep_timestamps_monotonic() {
    let (mut ledger, item_id) = ledger_with_item(100);
    let first = ledger
        .record_contribution(&item_id, ContributionRequest::free("u2".into(), Amount::from_major(10)))
        .unwrap();

    let stored = serde_json::to_string(&ledger.into_items()).unwrap();
    let items: Vec<WishlistItem> = serde_json::from_str(&stored).unwrap();
    let mut reloaded = Ledger::from_items(LedgerConfig::default(), items).unwrap();

    let second = reloaded
        .record_contribution(&item_id, ContributionRequest::free("u3".into(), Amount::from_major(10)))
        .unwrap();
    assert!(second.timestamp > first.timestamp);
    assert_eq!(reloaded.item(&item_id).unwrap().funded_amount(), Amount::from_major(20));
}

#[test]
fn reloading_rejects_inconsistent_items() {
    let json = r#"[{
        "id": "w9",
        "owner_id": "u1",
        "title": "Guitar",
        "price": 50000,
        "created_at": {"millis": 1},
        "funded_amount": 1000,
        "contributions": [],
        "status": "ACTIVE"
    }]"#;
    let items: Vec<WishlistItem> = serde_json::from_str(json).unwrap();
    let result = Ledger::from_items(LedgerConfig::default(), items);
    assert!(matches!(result, Err(LedgerError::FundingMismatch { .. })));
}

#[test]
fn reloading_rejects_repeated_contribution_ids() {
    let json = r#"[{
        "id": "w1",
        "owner_id": "u1",
        "title": "Camera",
        "price": 50000,
        "created_at": {"millis": 1},
        "funded_amount": 300,
        "contributions": [
            {"id": "c1", "contributor_id": "u2", "amount": 100, "type": "LOCKED", "timestamp": {"millis": 2}},
            {"id": "c1", "contributor_id": "u3", "amount": 200, "type": "FREE", "timestamp": {"millis": 3}}
        ],
        "status": "ACTIVE"
    }]"#;
    let items: Vec<WishlistItem> = serde_json::from_str(json).unwrap();
    let result = Ledger::from_items(LedgerConfig::default(), items);
    assert_eq!(
        result.err(),
        Some(LedgerError::DuplicateContribution {
            item_id: ItemId::from("w1"),
            contribution_id: ContributionId::from("c1"),
        })
    );
}

#[test]
fn reloaded_item_with_exhausted_sequence_keeps_accepting_contributions() {
    let json = r#"[{
        "id": "w1",
        "owner_id": "u1",
        "title": "Kayak",
        "price": 90000,
        "created_at": {"millis": 1},
        "funded_amount": 500,
        "contributions": [
            {"id": "c1", "contributor_id": "u2", "amount": 500, "type": "LOCKED",
             "timestamp": {"millis": 9000000000000, "sequence": 18446744073709551615}}
        ],
        "status": "ACTIVE"
    }]"#;
    let items: Vec<WishlistItem> = serde_json::from_str(json).unwrap();
    let mut ledger = Ledger::from_items(LedgerConfig::default(), items).unwrap();
    let item_id = ItemId::from("w1");

    let contribution = ledger
        .record_contribution(&item_id, ContributionRequest::free("u3".into(), Amount::from_major(1)))
        .unwrap();

    let stored = ledger.item(&item_id).unwrap().contributions()[0].timestamp;
    assert!(contribution.timestamp > stored);
    assert_eq!(contribution.timestamp, Timestamp::new(9_000_000_000_001, 0));
}

#[test]
fn rejected_duplicate_insert_leaves_the_clock_alone() {
    let (mut ledger, item_id) = ledger_with_item(100);
    let original = ledger.item(&item_id).unwrap().clone();

    let far_future = Timestamp::new(9_000_000_000_000, 0);
    let mut copy = original.clone();
    copy.created_at = far_future;
    assert!(matches!(
        ledger.insert_item(copy),
        Err(LedgerError::DuplicateItem { .. })
    ));

    let contribution = ledger
        .record_contribution(&item_id, ContributionRequest::free("u2".into(), Amount::from_major(1)))
        .unwrap();
    assert!(contribution.timestamp < far_future);
    assert_eq!(ledger.item(&item_id).unwrap().created_at, original.created_at);
}

#[test]
fn events_are_broadcast_without_contributor_identity() {
    let (mut ledger, item_id) = ledger_with_item(100);
    let mut rx = ledger.subscribe();

    ledger
        .record_contribution(
            &item_id,
            ContributionRequest::locked("u2".into(), Amount::from_major(10)).anonymous(),
        )
        .unwrap();
    ledger.cancel_item(&item_id).unwrap();
    // idempotent repeat emits nothing
    ledger.cancel_item(&item_id).unwrap();

    let recorded = rx.try_recv().unwrap();
    assert!(matches!(recorded, LedgerEvent::ContributionRecorded { .. }));
    assert!(!serde_json::to_string(&recorded).unwrap().contains("u2"));

    let cancelled = rx.try_recv().unwrap();
    assert!(matches!(cancelled, LedgerEvent::ItemCancelled { .. }));
    assert_eq!(cancelled.item_id(), &item_id);

    assert!(rx.try_recv().is_err());
}

#[test]
fn circle_and_event_items_are_queryable() {
    let mut ledger = Ledger::default();
    let circle = giftcircle_ledger::CircleId::from("family");
    let event = giftcircle_ledger::EventId::from("birthday-30");

    ledger
        .create_item(NewItem::new(owner(), "Holiday fund", Amount::from_major(1000)).circle(circle.clone()))
        .unwrap();
    ledger
        .create_item(NewItem::new(owner(), "Cake stand", Amount::from_major(35)).event(event.clone()))
        .unwrap();

    assert_eq!(ledger.items_in_circle(&circle).count(), 1);
    assert_eq!(ledger.items_for_event(&event).count(), 1);
    assert_eq!(ledger.items_owned_by(&owner()).count(), 2);
}
