//! Command line and environment configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "explorenow-server")]
#[command(author, version, about = "ExploreNow travel API server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5000", global = true)]
    pub bind: String,

    /// PostgreSQL connection string; in-memory storage when unset
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Directory of built frontend assets to serve
    #[arg(long, env = "STATIC_DIR", global = true)]
    pub static_dir: Option<PathBuf>,

    /// Lifetime of cached catalog responses
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 300, global = true)]
    pub cache_ttl_secs: u64,

    /// Average latency above which an endpoint is reported as slow
    #[arg(long, env = "SLOW_THRESHOLD_MS", default_value_t = 200, global = true)]
    pub slow_threshold_ms: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Write the sample catalog into the configured database
    Seed,
}

impl Cli {
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "explorenow_server=debug,tower_http=debug"
        } else {
            "explorenow_server=info,tower_http=info"
        }
    }
}
