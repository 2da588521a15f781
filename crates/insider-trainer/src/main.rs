//! Insider Trainer
//!
//! One-shot offline training utility: fits gradient-boosted tree classifiers
//! on trade-level and wallet-level records carrying `is_suspicious` proxy
//! labels, then exports the models with human-readable artifacts.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use insider_core::features::{TRADE_FEATURES, WALLET_FEATURES};
use insider_trainer::pipeline::run_pipeline;

/// Train insider detection models from trade and wallet CSVs.
#[derive(Parser, Debug)]
#[command(name = "insider-trainer")]
struct Args {
    /// Path to the trades CSV.
    #[arg(long)]
    trades: Option<PathBuf>,

    /// Path to the wallets CSV.
    #[arg(long)]
    wallets: Option<PathBuf>,

    /// Output directory for exported model artifacts.
    #[arg(long, default_value = "./model")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insider_trainer=info,insider_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Some(trades) = &args.trades {
        if trades.exists() {
            info!("==== TRADE-LEVEL MODEL ====");
            run_pipeline(trades, &TRADE_FEATURES, "trade_model", &args.output)?;
        } else {
            warn!("Trades file {} does not exist, skipping", trades.display());
        }
    }

    if let Some(wallets) = &args.wallets {
        if wallets.exists() {
            info!("==== WALLET-LEVEL MODEL ====");
            run_pipeline(wallets, &WALLET_FEATURES, "wallet_model", &args.output)?;
        } else {
            warn!("Wallets file {} does not exist, skipping", wallets.display());
        }
    }

    info!("Training complete!");
    Ok(())
}
