//! GiftCircle CLI - wishlist funding from the command line
//!
//! State lives in a JSON snapshot (`--data`, `GIFTCIRCLE_DATA`, default
//! `giftcircle.json`). Each mutating command loads the snapshot, applies one
//! ledger operation and writes it back.
//!
//! # Quick Start
//!
//! ```bash
//! giftcircle item create --owner u1 --title "Headphones" --price 120
//! giftcircle contribute --item item_... --from u2 --amount 40 --kind locked
//! giftcircle contribute --item item_... --from u3 --amount 80 --kind free --anonymous
//! giftcircle wallet --user u1
//! giftcircle history --user u1
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use giftcircle_ledger::ContributionType;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod display;
mod snapshot;

use config::CliConfig;

/// GiftCircle - group funding for wishlist items
#[derive(Parser)]
#[command(name = "giftcircle")]
#[command(author = "GiftCircle Contributors")]
#[command(version)]
#[command(about = "Record contributions, cancel items and inspect wallets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Snapshot file (overrides config and GIFTCIRCLE_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage wishlist items
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },

    /// Contribute to an item
    Contribute {
        /// Item to fund
        #[arg(long)]
        item: String,

        /// Contributor user id
        #[arg(long)]
        from: String,

        /// Amount in major units, e.g. 40 or 12.50 (defaults to the suggested gift)
        #[arg(long)]
        amount: Option<String>,

        /// Locked funds are released only if the item is cancelled
        #[arg(long, value_enum, default_value = "locked")]
        kind: KindArg,

        /// Hide the contributor's identity from the owner
        #[arg(long)]
        anonymous: bool,

        /// Hide the amount from the owner
        #[arg(long)]
        hide_amount: bool,
    },

    /// Cancel an item, releasing its locked contributions
    Cancel {
        /// Item to cancel
        #[arg(long)]
        item: String,
    },

    /// Show a user's wallet balance
    Wallet {
        /// Wallet owner
        #[arg(long)]
        user: String,
    },

    /// Show contributions received by a user, newest first
    History {
        /// Wallet owner
        #[arg(long)]
        user: String,

        /// Show only the newest N entries
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// Create a wishlist item
    Create {
        /// Owner user id
        #[arg(long)]
        owner: String,

        #[arg(long)]
        title: String,

        /// Price in major units, e.g. 120 or 99.99
        #[arg(long)]
        price: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        url: Option<String>,

        /// Attach to an event
        #[arg(long)]
        event: Option<String>,

        /// Share with a circle
        #[arg(long)]
        circle: Option<String>,
    },

    /// Show an item with its funding and contributor history
    Show {
        #[arg(long)]
        item: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Locked,
    Free,
}

impl From<KindArg> for ContributionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Locked => ContributionType::Locked,
            KindArg::Free => ContributionType::Free,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    match cli.command {
        Commands::Item { action } => match action {
            ItemCommands::Create {
                owner,
                title,
                price,
                description,
                url,
                event,
                circle,
            } => commands::item::create(
                &config,
                commands::item::CreateArgs {
                    owner,
                    title,
                    price,
                    description,
                    url,
                    event,
                    circle,
                },
            ),
            ItemCommands::Show { item } => commands::item::show(&config, &item),
        },
        Commands::Contribute {
            item,
            from,
            amount,
            kind,
            anonymous,
            hide_amount,
        } => commands::contribute::run(
            &config,
            commands::contribute::ContributeArgs {
                item,
                from,
                amount,
                contribution_type: kind.into(),
                anonymous,
                hide_amount,
            },
        ),
        Commands::Cancel { item } => commands::item::cancel(&config, &item),
        Commands::Wallet { user } => commands::wallet::show(&config, &user),
        Commands::History { user, limit } => commands::wallet::history(&config, &user, limit),
    }
}
