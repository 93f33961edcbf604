//! CLI argument parsing for nonparam

use std::path::PathBuf;

use clap::Parser;

use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "nonparam")]
#[command(version)]
#[command(about = "Web service running non-parametric hypothesis tests", long_about = None)]
pub struct Cli {
    /// Interface to listen on (default: 0.0.0.0)
    #[arg(long, value_name = "HOST", env = "NONPARAM_HOST")]
    pub host: Option<String>,

    /// Port to listen on (default: 5000)
    #[arg(short, long, value_name = "PORT", env = "NONPARAM_PORT")]
    pub port: Option<u16>,

    /// Enable debug logging (TRACE level)
    #[arg(short, long, env = "NONPARAM_DEBUG")]
    pub debug: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the sample dataset
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Overlay explicitly given flags on top of `config`
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}
