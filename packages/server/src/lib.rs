//! Presence-gated group chat server.
//!
//! Participants join under a name, keep themselves present with periodic
//! heartbeats, and exchange messages whose visibility depends on their
//! audience and kind. A background reaper evicts participants whose
//! heartbeat expired and announces their departure.

pub mod common;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod reaper;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
