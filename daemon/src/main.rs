//! valset daemon: operator entry point for validator-set elections.

mod commands;
mod config;

use anyhow::anyhow;
use clap::Parser;
use commands::{parse_validator, read_key, Operator};
use config::ValsetConfig;
use std::path::PathBuf;
use valset_crypto::generate_keypair;
use valset_types::{PublicKey, TxHash, Validator, ValidatorChange};
use valset_utils::LogFormat;

#[derive(Parser)]
#[command(name = "valset-daemon", about = "Validator-set election operator tool")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VALSET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VALSET_LOG_FORMAT")]
    log_format: Option<String>,

    /// JSON ledger snapshot to operate on.
    #[arg(long, env = "VALSET_LEDGER")]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print a fresh key pair as hex.
    Keygen,

    /// Create a ledger with the given genesis validators.
    Init {
        /// Genesis validator as `<public key hex>:<power>`. Repeatable.
        #[arg(long = "validator", required = true, value_parser = parse_validator)]
        validators: Vec<Validator>,
    },

    /// Propose, approve and inspect validator elections.
    Election {
        #[command(subcommand)]
        action: ElectionAction,
    },
}

#[derive(clap::Subcommand)]
enum ElectionAction {
    /// Print the ballot distribution of the current validator set.
    Recipients,

    /// Propose a validator change. Prints the election id.
    Propose {
        /// File holding the proposer's hex private key.
        #[arg(long)]
        key: PathBuf,
        /// Public key of the validator to add, re-weight or remove.
        #[arg(long)]
        public_key: String,
        /// Requested power; 0 removes the validator.
        #[arg(long)]
        power: u64,
        /// Node id of the validator.
        #[arg(long)]
        node_id: String,
    },

    /// Spend the key's ballot to approve an election.
    Approve {
        /// File holding the voter's hex private key.
        #[arg(long)]
        key: PathBuf,
        election_id: String,
    },

    /// Print the status report of an election.
    Show { election_id: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ValsetConfig::from_toml_file(path)?,
        None => ValsetConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format.as_deref() {
        config.log_format =
            LogFormat::parse(format).ok_or_else(|| anyhow!("unknown log format {format:?}"))?;
    }
    if let Some(ledger) = cli.ledger {
        config.ledger_path = ledger;
    }

    valset_utils::init_tracing(&config.log_level, config.log_format);
    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }

    let params = config.election.clone();
    match cli.command {
        Command::Keygen => {
            let pair = generate_keypair();
            println!("public_key={}", pair.public.to_hex());
            println!("private_key={}", hex::encode(pair.private.0));
        }
        Command::Init { validators } => {
            Operator::init(&config.ledger_path, validators, params)?;
        }
        Command::Election { action } => {
            let mut operator = Operator::open(&config.ledger_path, params)?;
            match action {
                ElectionAction::Recipients => {
                    for recipient in operator.recipients()? {
                        for key in &recipient.public_keys {
                            println!("{key} {}", recipient.power);
                        }
                    }
                }
                ElectionAction::Propose {
                    key,
                    public_key,
                    power,
                    node_id,
                } => {
                    let proposer = read_key(&key)?;
                    let change =
                        ValidatorChange::new(PublicKey::from_hex(&public_key)?, power, node_id);
                    println!("{}", operator.propose(&proposer, change)?);
                }
                ElectionAction::Approve { key, election_id } => {
                    let voter = read_key(&key)?;
                    let status = operator.approve(&voter, &TxHash::from_hex(&election_id)?)?;
                    println!("status={status}");
                }
                ElectionAction::Show { election_id } => {
                    println!("{}", operator.show(&TxHash::from_hex(&election_id)?)?);
                }
            }
        }
    }

    Ok(())
}
