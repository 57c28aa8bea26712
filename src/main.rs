//! Binary entrypoint for the memory frame server.

mod logging;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use memory_frame::config::Config;
use memory_frame::web::{self, AppState};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "memory-frame",
    version,
    about = "Serve a rotating slideshow of photos over HTTP"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Photo library root (overrides image-path)
    #[arg(long, value_name = "DIR", env = "IMAGE_PATH")]
    image_path: Option<PathBuf>,

    /// Address to bind
    #[arg(long, value_name = "ADDR")]
    bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        error!(error = ?err, "memory-frame exited with error");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = cli.image_path {
        cfg.image_path = Some(path);
    }
    if let Some(bind) = cli.bind {
        cfg.bind_address = bind;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    let cfg = cfg.validated().context("validating configuration")?;
    info!(
        image_path = ?cfg.image_path,
        period_secs = cfg.period_secs().get(),
        extensions = ?cfg.extensions,
        "starting memory-frame"
    );

    let catalog = memory_frame::build_catalog(&cfg).context("building image catalog")?;
    let state = AppState::new(Arc::new(catalog), &cfg);
    web::serve(state, cfg.socket_addr()).await
}
