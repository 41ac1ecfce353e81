//! Wallet commands - balance and received contributions

use giftcircle_ledger::UserId;

use super::Session;
use crate::config::CliConfig;
use crate::display;

pub fn show(config: &CliConfig, user: &str) -> anyhow::Result<()> {
    let user_id = UserId::parse(user)?;
    let session = Session::open(config)?;
    let balance = session.ledger.wallet_balance(&user_id)?;
    let currency = &config.ledger.currency;

    display::section(&format!("Wallet: {}", display_name(&session, &user_id)));
    display::kv("Available", &currency.format(balance.available));
    display::kv("  from free gifts", &currency.format(balance.free));
    display::kv("  released on cancel", &currency.format(balance.released));
    display::kv("Locked in active items", &currency.format(balance.locked));
    Ok(())
}

pub fn history(config: &CliConfig, user: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let user_id = UserId::parse(user)?;
    let session = Session::open(config)?;
    let views = match limit {
        Some(limit) => session.ledger.recent_activity(&user_id, &session.users, limit),
        None => session.ledger.transaction_history(&user_id, &session.users),
    };
    let currency = &config.ledger.currency;
    let labels = &config.ledger.labels;

    display::section(&format!("History: {}", display_name(&session, &user_id)));
    if views.is_empty() {
        display::info("No contributions received");
        return Ok(());
    }
    for view in &views {
        println!(
            "    {:<24} {:<20} {:>12}  {:?}  {}",
            view.item_title,
            view.contributor_label(labels),
            view.amount_label(labels, currency),
            view.contribution_type,
            view.timestamp
        );
    }
    Ok(())
}

fn display_name(session: &Session, user_id: &UserId) -> String {
    session
        .users
        .get(user_id)
        .cloned()
        .unwrap_or_else(|| user_id.to_string())
}
