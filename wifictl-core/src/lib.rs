//! Core library for the nmcli-backed Wi-Fi control channel.
//! This crate defines the runner trait and record types, the nmcli command
//! adapter, the `wifi_control` method channel and the HTTP transport that
//! hosts it. The backend (real nmcli or a simulated NetworkManager) is
//! selected by feature flags.

pub mod traits;
pub mod backends;
pub mod config;
pub mod wifi;
pub mod channel;
pub mod web_server;
pub mod factory;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
