//! linctl: a command-line client for the Linear project tracker.
//!
//! The library half holds the domain client ([`client::LinearClient`]), the
//! entity models, configuration loading and the command handlers. The binary
//! only parses arguments, sets up logging and dispatches.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;

pub use client::{ClientError, ErrorKind, LinearClient};
pub use config::ClientConfig;
