//! Phonegate TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Blocks persist in ./phonegate.redb
//! phonegate
//!
//! # In-memory blocks, faster delays, logs to a file
//! phonegate --ephemeral --phone-delay-ms 300 --log-file phonegate.log --log-level debug
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use phonegate_core::{BlockStore, LockoutTracker, MemoryStore, RedbStore};
use phonegate_tui::{App, FlowConfig, Runtime, SystemEnv, TerminalDriver, TerminalError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Phone number sign-in mock with client-side lockout
#[derive(Parser, Debug)]
#[command(name = "phonegate")]
#[command(about = "Terminal sign-in flow with escalating client-side lockouts")]
#[command(version)]
struct Args {
    /// Database file holding the block record
    #[arg(long, default_value = "phonegate.redb")]
    state: PathBuf,

    /// Keep the block record in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Simulated delay after submitting the phone number
    #[arg(long, default_value = "1200")]
    phone_delay_ms: u64,

    /// Simulated delay after entering a full code
    #[arg(long, default_value = "1000")]
    code_delay_ms: u64,

    /// Code resends allowed before each further resend blocks phone requests
    #[arg(long)]
    resend_limit: Option<u32>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            phone_delay: Duration::from_millis(self.phone_delay_ms),
            code_delay: Duration::from_millis(self.code_delay_ms),
            resend_limit: self.resend_limit,
            ..FlowConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    tracing::info!(ephemeral = args.ephemeral, state = %args.state.display(), "phonegate starting");

    let config = args.flow_config();
    let result = if args.ephemeral {
        run(MemoryStore::new(), config).await
    } else {
        match RedbStore::open(&args.state) {
            Ok(store) => run(store, config).await,
            Err(e) => Err(TerminalError::Store(e)),
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "phonegate exited with error");
    }
    Ok(result?)
}

async fn run<S: BlockStore>(store: S, config: FlowConfig) -> Result<(), TerminalError> {
    let app = App::new(LockoutTracker::new(store, SystemEnv::new()), config);
    let driver = TerminalDriver::new()?;

    let mut runtime = Runtime::new(driver, app);
    runtime.run().await
}

#[allow(clippy::disallowed_types, reason = "log writer is synchronous")]
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let file_layer = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        },
        None => None,
    };

    tracing_subscriber::registry().with(file_layer).with(filter).init();
    Ok(())
}
