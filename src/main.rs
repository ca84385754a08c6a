use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use hashlock_tx::config::Config;
use hashlock_tx::constants::SATOSHIS_PER_BTC;
use hashlock_tx::pipeline::{self, PipelineReport};
use hashlock_tx::{LockMode, Network};

/// Build a hash-locked P2SH output and the transactions that fund and spend it
#[derive(Debug, Parser)]
#[command(name = "hashlock-tx", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// mainnet, testnet, signet or regtest
    #[arg(long)]
    network: Option<Network>,

    /// Secret that unlocks the script
    #[arg(long)]
    preimage: Option<String>,

    /// Satoshis locked by the funding transaction
    #[arg(long)]
    amount: Option<i64>,

    /// literal or commitment
    #[arg(long, value_parser = parse_lock_mode)]
    lock_mode: Option<LockMode>,

    /// Address receiving the spent funds
    #[arg(long)]
    destination: Option<String>,

    /// Spend fee in satoshis
    #[arg(long)]
    fee: Option<i64>,

    /// Stop after the funding transaction
    #[arg(long)]
    no_spend: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_lock_mode(s: &str) -> Result<LockMode, String> {
    match s {
        "literal" => Ok(LockMode::Literal),
        "commitment" => Ok(LockMode::Commitment),
        other => Err(format!("unknown lock mode '{}'", other)),
    }
}

impl Args {
    fn into_config(self) -> anyhow::Result<(Config, bool)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(preimage) = self.preimage {
            config.preimage = preimage;
        }
        if let Some(amount) = self.amount {
            config.amount = amount;
        }
        if let Some(lock_mode) = self.lock_mode {
            config.lock_mode = lock_mode;
        }
        if let Some(destination) = self.destination {
            config.spend.destination = destination;
        }
        if let Some(fee) = self.fee {
            config.spend.fee = fee;
        }
        if self.no_spend {
            config.skip_spend = true;
        }

        Ok((config, self.json))
    }
}

fn print_report(report: &PipelineReport) {
    println!("Network: {}", report.network);
    println!("Redeem Script: {}", report.redeem_script);
    println!("Derived Address: {}", report.address);
    println!(
        "Funding Transaction: {} ({} BTC)",
        report.funding_txid,
        report.funding_value as f64 / SATOSHIS_PER_BTC as f64
    );
    if let Some(spend) = &report.spend {
        println!("Spending Transaction: {}", spend.txid);
        println!("Spend Output Value: {} (fee {})", spend.value, spend.fee);
        println!("Unlock Verified: {}", spend.unlock_verified);
    }
    if let Some(hint) = report.hint() {
        println!("Hint: {}", hint);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let (config, json) = args.into_config()?;
    let output = pipeline::run(&config.pipeline_config()).context("pipeline failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    } else {
        print_report(&output.report);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
