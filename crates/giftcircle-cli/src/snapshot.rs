//! JSON snapshot store standing in for the remote item API.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use giftcircle_ledger::{Ledger, LedgerConfig, UserId, WishlistItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display names, used to resolve contributors in history
    #[serde(default)]
    pub users: BTreeMap<UserId, String>,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}

impl Snapshot {
    /// Load a snapshot; a missing file is an empty snapshot.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No snapshot yet, starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Write via a temporary file so a failed write never truncates the store.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        tracing::debug!(path = %path.display(), items = self.items.len(), "Snapshot saved");
        Ok(())
    }

    /// Split into a ledger over the items and the user directory.
    pub fn into_ledger(self, config: LedgerConfig) -> anyhow::Result<(Ledger, BTreeMap<UserId, String>)> {
        let ledger = Ledger::from_items(config, self.items).context("loading items into ledger")?;
        Ok((ledger, self.users))
    }

    pub fn from_ledger(ledger: Ledger, users: BTreeMap<UserId, String>) -> Self {
        Self {
            users,
            items: ledger.into_items(),
        }
    }
}
