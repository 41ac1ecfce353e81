//! Contribute command

use giftcircle_ledger::{Amount, ContributionRequest, ContributionType, ItemId, UserId};

use super::Session;
use crate::config::CliConfig;
use crate::display;

pub struct ContributeArgs {
    pub item: String,
    pub from: String,
    pub amount: Option<String>,
    pub contribution_type: ContributionType,
    pub anonymous: bool,
    pub hide_amount: bool,
}

pub fn run(config: &CliConfig, args: ContributeArgs) -> anyhow::Result<()> {
    let item_id = ItemId::parse(&args.item)?;
    let contributor = UserId::parse(&args.from)?;
    let limits = config.limits.unwrap_or_default();

    let mut session = Session::open(config)?;
    let amount = match args.amount {
        Some(raw) => Amount::parse_decimal(&raw)?,
        None => {
            let item = session
                .ledger
                .item(&item_id)
                .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
            limits.suggested_amount(item)
        }
    };
    if config.limits.is_some() {
        limits.check(amount)?;
    }

    let mut request = ContributionRequest::new(contributor, amount, args.contribution_type);
    if args.anonymous {
        request = request.anonymous();
    }
    if args.hide_amount {
        request = request.amount_hidden();
    }

    let contribution = session.ledger.record_contribution(&item_id, request)?;
    let item = session
        .ledger
        .item(&item_id)
        .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
    let progress = display::progress_bar(item.progress_percent());
    session.save(config)?;

    display::success("Contribution recorded");
    display::kv("Id", contribution.id.as_str());
    display::kv("Amount", &config.ledger.currency.format(contribution.amount));
    display::kv("Type", &format!("{:?}", contribution.contribution_type));
    display::kv("Progress", &progress);
    Ok(())
}
