use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use stillcam::capture::file::ensure_directory_exists;
use stillcam::config::{Config, ConfigOverrides};
use stillcam::{daemon, server};

#[derive(Parser, Debug)]
#[command(name = "stillcam")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STILLCAM_GIT_HASH"), ")"),
    about = "HTTP front-end for a Raspberry Pi still camera"
)]
struct Cli {
    /// Listen address, e.g. ":9001" or "127.0.0.1:8080"
    #[arg(long, value_name = "ADDR")]
    http: Option<String>,

    /// Prefix for links in the gallery page
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Directory to save images to
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Camera host as user@host (e.g. pi@192.168.1.103); captures run over ssh
    #[arg(long, value_name = "USER@HOST")]
    remote: Option<String>,

    /// Configuration file (default: ~/.config/stillcam/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        listen: cli.http,
        prefix: cli.prefix,
        directory: cli.dir,
        remote: cli.remote,
    });

    config.storage.directory = ensure_directory_exists(&config.storage.directory)
        .with_context(|| {
            format!(
                "Failed to prepare capture directory {}",
                config.storage.directory.display()
            )
        })?;

    log::info!(
        "Starting stillcam {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("STILLCAM_GIT_HASH")
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let shutdown = daemon::shutdown_signal()?;
    runtime.block_on(server::serve(Arc::new(config), shutdown))
}
