//! Anchorchain CLI - record verification events, seal them into blocks and audit the chain.

use std::path::PathBuf;

use anchorchain_core::{Difficulty, VerificationStatus};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod context;
mod output;

use commands::{blocks, events, proof, record, seal, status, verify};
use context::LedgerArgs;

#[derive(Parser)]
#[command(name = "anchorchain")]
#[command(about = "Proof-of-work anchoring ledger for product verification events")]
struct Cli {
    /// Directory holding the ledger files
    #[arg(long, global = true, env = "ANCHORCHAIN_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// Leading zero hex digits required of block hashes
    #[arg(long, global = true, env = "ANCHORCHAIN_DIFFICULTY", default_value = "3", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// fsync every ledger write
    #[arg(long, global = true)]
    sync: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    /// First verification of the code
    First,
    /// The code was verified before
    Repeat,
}

impl From<StatusArg> for VerificationStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::First => VerificationStatus::FirstVerification,
            StatusArg::Repeat => VerificationStatus::PreviouslyVerified,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record a verification event and seal its day
    Record {
        /// Verified code identifier
        #[arg(long)]
        code_id: String,
        /// Product (batch) identifier
        #[arg(long)]
        product_id: String,
        /// Product display name
        #[arg(long)]
        product_name: String,
        /// Distributor the batch was issued to
        #[arg(long)]
        distributor: String,
        /// Verification outcome
        #[arg(long, value_enum, default_value = "first")]
        status: StatusArg,
        /// Event time (RFC 3339, UTC); defaults to now
        #[arg(long)]
        timestamp: Option<String>,
        /// Precomputed anchor hash for the code; takes precedence over --secret
        #[arg(long)]
        anchor_hash: Option<String>,
        /// Server secret the anchor hash is derived from
        #[arg(long, env = "ANCHORCHAIN_ANCHOR_SECRET", hide_env_values = true)]
        secret: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Seal pending events up to a date
    Seal {
        /// Last date to seal (YYYY-MM-DD); defaults to today
        #[arg(long)]
        up_to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ledger proof for a code
    Proof {
        /// Verified code identifier
        code_id: String,
        /// Only match the event recorded at this time
        #[arg(long)]
        timestamp: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize ledger progress
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List sealed blocks
    Blocks {
        /// Only show the newest N blocks
        #[arg(long)]
        last: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List sealed events
    Events {
        /// Only show events with this verification outcome
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Earliest event date to show (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest event date to show (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Audit the stored chain
    Verify {
        /// Exit with error code if any violation is found
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    let zeros: usize = value.parse().map_err(|e| format!("{e}"))?;
    Difficulty::new(zeros).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = LedgerArgs {
        data_dir: cli.data_dir,
        difficulty: cli.difficulty,
        sync: cli.sync,
    };

    let result = match cli.command {
        Commands::Record {
            code_id,
            product_id,
            product_name,
            distributor,
            status,
            timestamp,
            anchor_hash,
            secret,
            json,
        } => record::run(
            &args,
            record::RecordInput {
                code_id,
                product_id,
                product_name,
                distributor,
                status: status.into(),
                timestamp,
                anchor_hash,
                secret,
            },
            json,
        ),
        Commands::Seal { up_to, json } => seal::run(&args, up_to, json),
        Commands::Proof {
            code_id,
            timestamp,
            json,
        } => proof::run(&args, code_id, timestamp, json),
        Commands::Status { json } => status::run(&args, json),
        Commands::Blocks { last, json } => blocks::run(&args, last, json),
        Commands::Events {
            status,
            from,
            to,
            json,
        } => events::run(
            &args,
            events::EventQuery {
                status: status.map(Into::into),
                from,
                to,
            },
            json,
        ),
        Commands::Verify { strict, json } => verify::run(&args, strict, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
