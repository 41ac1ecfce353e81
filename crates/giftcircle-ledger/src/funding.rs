//! Funding operations: recording contributions and cancelling items.
//!
//! Both operations validate everything before touching the item, so a
//! rejected call leaves `funded_amount`, `contributions` and `status`
//! exactly as they were.

use giftcircle_types::{Amount, ContributionId, UserId};

use crate::clock::LogicalClock;
use crate::config::{CancelPolicy, LedgerConfig};
use crate::error::{LedgerError, Result};
use crate::item::{Contribution, ContributionType, WishlistItem};

/// A contribution the caller wants to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRequest {
    pub contributor_id: UserId,
    pub amount: Amount,
    pub contribution_type: ContributionType,
    pub is_anonymous: bool,
    pub is_amount_hidden: bool,
}

impl ContributionRequest {
    pub fn new(contributor_id: UserId, amount: Amount, contribution_type: ContributionType) -> Self {
        Self {
            contributor_id,
            amount,
            contribution_type,
            is_anonymous: false,
            is_amount_hidden: false,
        }
    }

    pub fn locked(contributor_id: UserId, amount: Amount) -> Self {
        Self::new(contributor_id, amount, ContributionType::Locked)
    }

    pub fn free(contributor_id: UserId, amount: Amount) -> Self {
        Self::new(contributor_id, amount, ContributionType::Free)
    }

    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }

    pub fn amount_hidden(mut self) -> Self {
        self.is_amount_hidden = true;
        self
    }
}

/// Record a contribution against an active item.
///
/// On success the contribution is appended, `funded_amount` grows by its
/// amount and the new record is returned. Over-funding past `price` is
/// accepted unless `config.allow_overfunding` is off.
pub fn record_contribution(
    item: &mut WishlistItem,
    clock: &mut LogicalClock,
    request: ContributionRequest,
    config: &LedgerConfig,
) -> Result<Contribution> {
    if request.amount.is_zero() {
        tracing::warn!(item_id = %item.id, "Rejected contribution: zero amount");
        return Err(LedgerError::InvalidAmount {
            message: "Amount must be greater than zero".to_string(),
        });
    }

    if !item.is_active() {
        tracing::warn!(item_id = %item.id, status = ?item.status(), "Rejected contribution: item not active");
        return Err(LedgerError::ItemNotActive {
            item_id: item.id.clone(),
        });
    }

    if !config.allow_overfunding && request.amount > item.remaining() {
        tracing::warn!(item_id = %item.id, "Rejected contribution: exceeds remaining amount");
        return Err(LedgerError::ExceedsRemaining {
            item_id: item.id.clone(),
            requested: request.amount,
            remaining: item.remaining(),
        });
    }

    let new_total = item
        .funded_amount()
        .checked_add(request.amount)
        .ok_or_else(|| LedgerError::InvalidAmount {
            message: "Funded amount overflow".to_string(),
        })?;

    let contribution = Contribution {
        id: ContributionId::new(),
        contributor_id: request.contributor_id,
        amount: request.amount,
        contribution_type: request.contribution_type,
        timestamp: clock.tick(),
        is_anonymous: request.is_anonymous,
        is_amount_hidden: request.is_amount_hidden,
    };

    item.push_contribution(contribution.clone(), new_total);

    // Contributor and amount stay out of the log; anonymity applies here too.
    tracing::info!(
        item_id = %item.id,
        contribution_id = %contribution.id,
        contribution_type = ?contribution.contribution_type,
        anonymous = contribution.is_anonymous,
        amount_hidden = contribution.is_amount_hidden,
        "Contribution recorded"
    );

    Ok(contribution)
}

/// Move an item to `Cancelled`.
///
/// Funding and history are untouched; locked contributions simply start
/// counting as available wallet funds for the owner. Returns `true` when the
/// status changed, `false` for an idempotent repeat.
pub fn cancel_item(item: &mut WishlistItem, policy: CancelPolicy) -> Result<bool> {
    if item.is_cancelled() {
        return match policy {
            CancelPolicy::Idempotent => {
                tracing::debug!(item_id = %item.id, "Item already cancelled");
                Ok(false)
            }
            CancelPolicy::Strict => {
                tracing::warn!(item_id = %item.id, "Rejected cancel: item already cancelled");
                Err(LedgerError::ItemAlreadyCancelled {
                    item_id: item.id.clone(),
                })
            }
        };
    }

    item.mark_cancelled();

    let released = item
        .contributions()
        .iter()
        .filter(|c| c.contribution_type == ContributionType::Locked)
        .count();
    tracing::info!(item_id = %item.id, released_contributions = released, "Item cancelled");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;
    use giftcircle_types::Timestamp;

    fn setup(price: u64) -> (WishlistItem, LogicalClock, LedgerConfig) {
        let item = WishlistItem::new(
            UserId::from("owner"),
            "Espresso machine",
            Amount::from_major(price),
            Timestamp::now(),
        )
        .unwrap();
        (item, LogicalClock::new(), LedgerConfig::default())
    }

    #[test]
    fn test_record_updates_funded_amount() {
        let (mut item, mut clock, config) = setup(350);

        let first = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::locked(UserId::from("u2"), Amount::from_major(100)),
            &config,
        )
        .unwrap();
        let second = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::free(UserId::from("u3"), Amount::from_major(20)),
            &config,
        )
        .unwrap();

        assert_eq!(item.funded_amount(), Amount::from_major(120));
        assert_eq!(item.contributions().len(), 2);
        assert!(second.timestamp > first.timestamp);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_zero_amount_rejected_and_item_unchanged() {
        let (mut item, mut clock, config) = setup(350);
        let before = item.clone();

        let result = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::locked(UserId::from("u2"), Amount::ZERO),
            &config,
        );

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(item, before);
    }

    #[test]
    fn test_cancelled_item_rejects_contributions() {
        let (mut item, mut clock, config) = setup(350);
        cancel_item(&mut item, CancelPolicy::Idempotent).unwrap();
        let before = item.clone();

        let result = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::free(UserId::from("u2"), Amount::from_major(5)),
            &config,
        );

        assert!(matches!(result, Err(LedgerError::ItemNotActive { .. })));
        assert_eq!(item, before);
    }

    #[test]
    fn test_overfunding_allowed_by_default() {
        let (mut item, mut clock, config) = setup(50);
        record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::locked(UserId::from("u2"), Amount::from_major(80)),
            &config,
        )
        .unwrap();
        assert_eq!(item.funded_amount(), Amount::from_major(80));
        assert_eq!(item.remaining(), Amount::ZERO);
        assert_eq!(item.progress_percent(), 100);
        assert!(item.is_fully_funded());
    }

    #[test]
    fn test_overfunding_rejected_when_disabled() {
        let (mut item, mut clock, _) = setup(50);
        let config = LedgerConfig {
            allow_overfunding: false,
            ..LedgerConfig::default()
        };

        let result = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::locked(UserId::from("u2"), Amount::from_major(51)),
            &config,
        );

        assert!(matches!(result, Err(LedgerError::ExceedsRemaining { .. })));
        assert_eq!(item.funded_amount(), Amount::ZERO);
    }

    #[test]
    fn test_overflow_rejected() {
        let (mut item, mut clock, config) = setup(50);
        record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::free(UserId::from("u2"), Amount::from_minor(u64::MAX)),
            &config,
        )
        .unwrap();

        let result = record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::free(UserId::from("u2"), Amount::from_minor(1)),
            &config,
        );
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(item.contributions().len(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent_by_default() {
        let (mut item, mut clock, config) = setup(350);
        record_contribution(
            &mut item,
            &mut clock,
            ContributionRequest::locked(UserId::from("u2"), Amount::from_major(50)),
            &config,
        )
        .unwrap();

        assert!(cancel_item(&mut item, CancelPolicy::Idempotent).unwrap());
        let once = item.clone();
        assert!(!cancel_item(&mut item, CancelPolicy::Idempotent).unwrap());

        assert_eq!(item, once);
        assert_eq!(item.status(), ItemStatus::Cancelled);
        assert_eq!(item.funded_amount(), Amount::from_major(50));
    }

    #[test]
    fn test_strict_policy_rejects_second_cancel() {
        let (mut item, _, _) = setup(350);
        cancel_item(&mut item, CancelPolicy::Strict).unwrap();
        let result = cancel_item(&mut item, CancelPolicy::Strict);
        assert!(matches!(result, Err(LedgerError::ItemAlreadyCancelled { .. })));
        assert!(item.is_cancelled());
    }
}
