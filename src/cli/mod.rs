// CLI module for semey-api
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// semey-api - In-memory smart-city dashboard API
#[derive(Parser, Debug)]
#[command(name = "semey-api", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.semey-api/config.toml, optional)
    #[arg(long, short = 'c', env = "SEMEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on; overrides PORT and the config file
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Address to bind; overrides the config file
    #[arg(long)]
    pub host: Option<String>,
}
