//! Ledger configuration
//!
//! Passed explicitly to [`crate::Ledger::new`]. Every field has a default,
//! so a partial JSON document deserializes cleanly.

use giftcircle_types::Currency;
use serde::{Deserialize, Serialize};

/// What `cancel_item` does with an item that is already cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Second cancel is a no-op that returns the item unchanged
    #[default]
    Idempotent,
    /// Second cancel fails with `ItemAlreadyCancelled`
    Strict,
}

impl std::str::FromStr for CancelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idempotent" => Ok(Self::Idempotent),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown cancel policy '{}'", other)),
        }
    }
}

/// Placeholders shown by history projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryLabels {
    pub anonymous: String,
    pub unknown_contributor: String,
    pub hidden_amount: String,
}

impl Default for HistoryLabels {
    fn default() -> Self {
        Self {
            anonymous: "Anonymous User".to_string(),
            unknown_contributor: "Unknown User".to_string(),
            hidden_amount: "Secret".to_string(),
        }
    }
}

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub cancel_policy: CancelPolicy,
    /// Accept contributions beyond the item's remaining amount
    pub allow_overfunding: bool,
    pub labels: HistoryLabels,
    /// Display label only
    pub currency: Currency,
    /// Buffer size of the event broadcast channel
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cancel_policy: CancelPolicy::Idempotent,
            allow_overfunding: true,
            labels: HistoryLabels::default(),
            currency: Currency::usd(),
            event_capacity: 1024,
        }
    }
}
