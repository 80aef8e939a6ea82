//! Server configuration.
//!
//! Every option can be given as a command line flag or an environment variable.

use std::time::Duration;

use clap::Parser;

use crate::reaper::ReaperSettings;

#[derive(Debug, Clone, Parser)]
#[command(name = "roll-call-server", version, about = "Presence-gated group chat server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "ROLL_CALL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Seconds without a heartbeat before a participant is evicted
    #[arg(
        long,
        env = "ROLL_CALL_HEARTBEAT_TTL",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub heartbeat_ttl_secs: u64,

    /// Seconds between two presence sweeps
    #[arg(
        long,
        env = "ROLL_CALL_REAPER_PERIOD",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub reaper_period_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "ROLL_CALL_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn reaper_settings(&self) -> ReaperSettings {
        ReaperSettings {
            heartbeat_ttl: Duration::from_secs(self.heartbeat_ttl_secs),
            period: Duration::from_secs(self.reaper_period_secs),
        }
    }
}
