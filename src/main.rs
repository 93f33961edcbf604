use anyhow::Result;
use clap::Parser;
use nonparam::{cli::Cli, config::ServerConfig, server};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the default level to TRACE
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the config file if any, then CLI flags
fn load_config(args: &Cli) -> Result<ServerConfig> {
    let base = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let config = args.apply(base);

    if let Err(e) = config.validate() {
        anyhow::bail!("Invalid configuration: {}", e);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = load_config(&args)?;

    init_tracing(config.debug);
    tracing::info!(
        seed = config.seed,
        preview_rows = config.preview_rows,
        "starting nonparam on {}",
        config.bind_address()
    );

    server::serve(config).await
}
