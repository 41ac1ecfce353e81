//! Item commands - create, show and cancel wishlist items

use giftcircle_ledger::{Amount, CircleId, EventId, ItemId, NewItem, UserId};

use super::Session;
use crate::config::CliConfig;
use crate::display;

pub struct CreateArgs {
    pub owner: String,
    pub title: String,
    pub price: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub event: Option<String>,
    pub circle: Option<String>,
}

pub fn create(config: &CliConfig, args: CreateArgs) -> anyhow::Result<()> {
    let owner = UserId::parse(&args.owner)?;
    let price = Amount::parse_decimal(&args.price)?;

    let mut new_item = NewItem::new(owner, args.title, price);
    if let Some(description) = args.description {
        new_item = new_item.description(description);
    }
    if let Some(url) = args.url {
        new_item = new_item.product_url(url);
    }
    if let Some(event) = args.event {
        new_item = new_item.event(EventId::parse(&event)?);
    }
    if let Some(circle) = args.circle {
        new_item = new_item.circle(CircleId::parse(&circle)?);
    }

    let mut session = Session::open(config)?;
    let item = session.ledger.create_item(new_item)?.clone();
    session.save(config)?;

    display::success("Item created");
    display::kv("Id", item.id.as_str());
    display::kv("Title", &item.title);
    display::kv("Price", &config.ledger.currency.format(item.price));
    Ok(())
}

pub fn show(config: &CliConfig, item_id: &str) -> anyhow::Result<()> {
    let item_id = ItemId::parse(item_id)?;
    let session = Session::open(config)?;
    let item = session
        .ledger
        .item(&item_id)
        .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
    let currency = &config.ledger.currency;
    let labels = &config.ledger.labels;

    display::section(&item.title);
    display::kv("Id", item.id.as_str());
    display::kv("Status", &format!("{:?}", item.status()));
    if !item.description.is_empty() {
        display::kv("Description", &item.description);
    }
    if let Some(url) = &item.product_url {
        display::kv("Link", url);
    }
    display::kv(
        "Funded",
        &format!(
            "{} of {}  {}",
            currency.format(item.funded_amount()),
            currency.format(item.price),
            display::progress_bar(item.progress_percent())
        ),
    );
    display::kv("Remaining", &currency.format(item.remaining()));

    let history = session.ledger.item_history(&item_id, &session.users)?;
    if history.is_empty() {
        display::info("No contributions yet");
    }
    for view in &history {
        println!(
            "    {:<20} {:>12}  {:?}  {}",
            view.contributor_label(labels),
            view.amount_label(labels, currency),
            view.contribution_type,
            view.timestamp
        );
    }
    Ok(())
}

pub fn cancel(config: &CliConfig, item_id: &str) -> anyhow::Result<()> {
    let item_id = ItemId::parse(item_id)?;
    let mut session = Session::open(config)?;
    let item = session.ledger.cancel_item(&item_id)?;
    let title = item.title.clone();
    session.save(config)?;

    display::success(&format!("Cancelled \"{}\"", title));
    display::info("Locked contributions are now available to the owner");
    Ok(())
}
