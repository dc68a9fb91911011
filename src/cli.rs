use std::path::PathBuf;

use clap::Parser;
use tasknest_config::ServerConfig;

/// Server-rendered to-do list.
#[derive(Debug, Parser)]
#[command(name = "tasknest", version, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long)]
    pub bind: Option<String>,

    /// SQLite connection string
    #[arg(long)]
    pub database_url: Option<String>,

    /// Directory served under /assets
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the values already in `config`, which come from the environment.
    pub fn apply(self, config: ServerConfig) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind.unwrap_or(config.bind_addr),
            database_url: self.database_url.unwrap_or(config.database_url),
            assets_dir: self.assets_dir.unwrap_or(config.assets_dir),
            log_dir: config.log_dir,
        }
    }
}
