//! stakevote command-line host.
//!
//! Runs the staking contract against a local sled store, acting as the
//! transaction engine: it supplies the caller, block time and attached coin.
//!
//! Usage:
//!   stakevote init --validators genesis.json
//!   stakevote invoke --sender <addr> --amount 5000000000000 '{"method":"pledgeCoin"}'
//!   stakevote query '{"method":"getCandidates"}'
//!   stakevote address <hex-public-key>

use clap::{Parser, Subcommand};
use stakevote::governance::{CallContext, CandidateEntry, Governance, Thresholds};
use stakevote::identity::Address;
use stakevote::ledger::Amount;
use stakevote::storage::GovStore;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Staked validator admission and abolition.
#[derive(Parser, Debug)]
#[command(name = "stakevote", version, about = "Validator set governance by quorum voting")]
struct Cli {
    /// Data directory for persistent storage.
    #[arg(long, default_value = "./stakevote-data", global = true)]
    data_dir: PathBuf,

    /// JSON file overriding governance thresholds.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed the registry and candidate pool from a genesis validator list.
    Init {
        /// JSON file of [address, stake] pairs.
        #[arg(long)]
        validators: PathBuf,
    },

    /// Run a state-changing method.
    Invoke {
        /// Caller address.
        #[arg(long)]
        sender: String,

        /// Coin attached to the call (in base units).
        #[arg(long, default_value = "0")]
        amount: String,

        /// Block timestamp in microseconds (defaults to now).
        #[arg(long)]
        timestamp: Option<u64>,

        /// Request JSON, e.g. {"method":"voteForApplicant","params":{"address":"..."}}
        request: String,
    },

    /// Run a read-only query.
    Query {
        /// Query JSON, e.g. {"method":"getValidators"}
        request: String,
    },

    /// Derive the address of a hex-encoded public key.
    Address {
        public_key: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Address { public_key } = &cli.command {
        let bytes = hex::decode(public_key)?;
        println!("{}", Address::from_public_key(&bytes)?);
        return Ok(());
    }

    let thresholds = match &cli.config {
        Some(path) => Thresholds::from_file(path)?,
        None => Thresholds::default(),
    };

    let store = GovStore::open(&cli.data_dir)?;
    info!(data_dir = %cli.data_dir.display(), "Opened store");

    let governance = Governance::new(&store, &store, thresholds);

    match cli.command {
        Command::Init { validators } => {
            let data = fs::read_to_string(&validators)?;
            let genesis: Vec<CandidateEntry> = serde_json::from_str(&data)?;
            let pool = governance.init_from(genesis)?;
            println!("{}", serde_json::to_string_pretty(&pool)?);
        }
        Command::Invoke {
            sender,
            amount,
            timestamp,
            request,
        } => {
            let sender = Address::parse(&sender)?;
            let amount = Amount::parse(&amount)?;
            let block_timestamp = timestamp.unwrap_or_else(now_micros);
            let ctx = CallContext::new(sender, block_timestamp).with_payment(amount);

            let receipt = governance.invoke_json(&ctx, &request)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::Query { request } => {
            println!("{}", governance.query_json(&request)?);
        }
        Command::Address { .. } => {}
    }

    store.flush()?;
    Ok(())
}

fn now_micros() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_micros()).unwrap_or(0)
}
