//! CLI configuration
//!
//! Resolved in order: built-in defaults, then an optional JSON config file,
//! then environment variables (a `.env` file is loaded first by `main`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use giftcircle_ledger::{CancelPolicy, ContributionLimits, LedgerConfig};
use giftcircle_types::Currency;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Snapshot file holding users and items
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Gift limits applied to contributions made from this CLI
    #[serde(default)]
    pub limits: Option<ContributionLimits>,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("giftcircle.json")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            ledger: LedgerConfig::default(),
            limits: None,
        }
    }
}

impl CliConfig {
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(path) = std::env::var("GIFTCIRCLE_DATA") {
            self.data_path = PathBuf::from(path);
        }
        if let Ok(code) = std::env::var("GIFTCIRCLE_CURRENCY") {
            self.ledger.currency = Currency::new(&code).context("GIFTCIRCLE_CURRENCY")?;
        }
        if let Ok(policy) = std::env::var("GIFTCIRCLE_CANCEL_POLICY") {
            self.ledger.cancel_policy = policy
                .parse::<CancelPolicy>()
                .map_err(anyhow::Error::msg)
                .context("GIFTCIRCLE_CANCEL_POLICY")?;
        }
        if let Ok(flag) = std::env::var("GIFTCIRCLE_ALLOW_OVERFUNDING") {
            self.ledger.allow_overfunding = flag
                .parse::<bool>()
                .context("GIFTCIRCLE_ALLOW_OVERFUNDING")?;
        }
        Ok(())
    }
}
