//! saiserverd daemon entry point.
//!
//! Parses the command line, initializes logging, and hands control to the
//! bring-up orchestrator. The process only exits on a fatal bring-up
//! error (non-zero) or external termination.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use sai_hal::StubSwitch;
use saiserverd::{BringUpOptions, Orchestrator, DEFAULT_RPC_PORT};

/// SAI switch bring-up server
#[derive(Parser, Debug)]
#[command(name = "saiserverd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile map file with key=value variables for the HAL
    #[arg(short = 'p', long)]
    profile: Option<PathBuf>,

    /// Port map file (front-panel interface to hardware lanes)
    #[arg(short = 'f', long)]
    portmap: Option<PathBuf>,

    /// Control port for the RPC endpoint
    #[arg(long, default_value_t = DEFAULT_RPC_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

/// Initialize tracing/logging.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let level: Level = level.parse().context("invalid log level")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("saiserverd: {:#}", e);
        return ExitCode::FAILURE;
    }

    info!("--- Starting saiserverd ---");
    if let Some(ref path) = args.profile {
        info!("profile map file: {}", path.display());
    }
    if let Some(ref path) = args.portmap {
        info!("port map file: {}", path.display());
    }
    info!("control port: {}", args.port);

    // The vendor backend plugs in behind SwitchHal; the software stub
    // stands in until the SAI library is linked.
    let hal = Arc::new(StubSwitch::new());

    let mut orchestrator = Orchestrator::new(
        hal,
        BringUpOptions {
            profile_path: args.profile,
            port_map_path: args.portmap,
            rpc_port: args.port,
        },
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received termination signal");
            signal_token.cancel();
        }
    });

    match orchestrator.run(shutdown).await {
        Ok(()) => {
            info!("saiserverd exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("bring-up failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
