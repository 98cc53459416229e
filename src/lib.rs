//! TokenBoard: tracks token contract addresses, aggregates their 24h volume
//! across every known trading pair and publishes ranked snapshots.

pub mod apis;
pub mod arguments;
#[macro_use]
pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod scanner;
pub mod service;
pub mod storage;
pub mod types;
#[cfg(feature = "web")]
pub mod webserver;

pub use errors::{BoardError, BoardResult};
pub use service::TokenBoard;
