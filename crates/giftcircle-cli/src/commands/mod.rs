//! Command handlers

pub mod contribute;
pub mod item;
pub mod wallet;

use std::collections::BTreeMap;

use giftcircle_ledger::{Ledger, UserId};

use crate::config::CliConfig;
use crate::snapshot::Snapshot;

/// A loaded snapshot: the ledger plus the user directory it was stored with.
pub struct Session {
    pub ledger: Ledger,
    pub users: BTreeMap<UserId, String>,
}

impl Session {
    pub fn open(config: &CliConfig) -> anyhow::Result<Self> {
        let snapshot = Snapshot::load(&config.data_path)?;
        let (ledger, users) = snapshot.into_ledger(config.ledger.clone())?;
        Ok(Self { ledger, users })
    }

    pub fn save(self, config: &CliConfig) -> anyhow::Result<()> {
        Snapshot::from_ledger(self.ledger, self.users).save(&config.data_path)
    }
}
