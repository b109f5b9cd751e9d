//! Wallet sweeper CLI
//!
//! Command-line interface for sweeping wallet balances into a main wallet
//! through a JSON-RPC node that manages its own accounts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wallet_sweeper::{
    ChainProvider, Error, Result, RpcChainProvider, RpcSettings, SweepConfig, TracingStatusSink,
    WalletSweepController,
};

#[derive(Parser)]
#[command(name = "sweeper")]
#[command(about = "Sweeps wallet balances into a main wallet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RPC endpoint (overrides ETH_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep registered wallets into the main wallet
    Sweep {
        /// Main (destination) wallet; defaults to the provider's first account
        #[arg(long)]
        main: Option<String>,

        /// Source wallet to sweep (repeatable); defaults to the provider's
        /// remaining accounts
        #[arg(long = "from")]
        from: Vec<String>,

        /// Compute and print the transfer plans without submitting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List the provider's accounts
    Accounts,

    /// Show the native balance of an address
    Balance {
        /// Address to query
        address: String,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::default(),
    };

    let rpc = match cli.rpc_url {
        Some(url) => RpcSettings::with_url(url),
        None => RpcSettings::from_env(),
    };

    match cli.command {
        Commands::Sweep {
            main,
            from,
            dry_run,
        } => {
            run_sweep(config, rpc, main, from, dry_run).await?;
        }
        Commands::Accounts => {
            run_accounts(rpc).await?;
        }
        Commands::Balance { address } => {
            run_balance(rpc, address).await?;
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn parse_address(input: &str) -> Result<alloy::primitives::Address> {
    alloy::primitives::Address::from_str(input)
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", input, e)))
}

async fn run_sweep(
    config: SweepConfig,
    rpc: RpcSettings,
    main: Option<String>,
    from: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let provider = RpcChainProvider::new(rpc.url());
    let mut controller =
        WalletSweepController::new(provider, config, Arc::new(TracingStatusSink));

    match main {
        Some(address) => controller.set_main(parse_address(&address)?),
        None => {
            controller.connect_main().await?;
        }
    }

    if from.is_empty() {
        // Register every provider account that is not the main wallet
        let accounts = controller.provider().request_accounts().await?;
        for account in accounts {
            controller.register_source(account);
        }
    } else {
        for address in &from {
            let address = parse_address(address)?;
            if !controller.register_source(address) {
                tracing::warn!(address = %address, "address ignored (main wallet or duplicate)");
            }
        }
    }

    if !controller.session().is_ready() {
        tracing::warn!("nothing to sweep: no source wallets registered");
        return Ok(());
    }

    if dry_run {
        let plans = controller.plan_all().await?;
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    let report = controller.sweep_all().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_accounts(rpc: RpcSettings) -> Result<()> {
    let provider = RpcChainProvider::new(rpc.url());
    for account in provider.request_accounts().await? {
        println!("{:?}", account);
    }
    Ok(())
}

async fn run_balance(rpc: RpcSettings, address: String) -> Result<()> {
    let address = parse_address(&address)?;
    let provider = RpcChainProvider::new(rpc.url());
    let balance = provider.get_balance(address).await?;

    println!(
        "{} wei ({} ETH)",
        balance,
        wallet_sweeper::units::format_eth(balance)
    );
    Ok(())
}
