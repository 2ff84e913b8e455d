use std::fmt;

pub mod cerberus;
pub mod config;
mod http;
pub mod sheet;
mod sync_manager;

pub use config::{Config, SortOrder};
pub use sync_manager::*;

pub const DEFAULT_API_BASE_URL: &str = "https://cerberus.ather.io/api/v1";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub enum SyncError {
    Config(String),
    Request(String),
    Status(u16, String),
    Decode(String),
    Schema(String),
    EmptyTripLog(String),
    MissingDisplayId,
    Encode(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            SyncError::Request(msg) => write!(f, "request failed: {msg}"),
            SyncError::Status(status, what) => write!(f, "{what} answered with status {status}"),
            SyncError::Decode(msg) => write!(f, "response is not valid JSON: {msg}"),
            SyncError::Schema(msg) => write!(f, "unexpected response structure: {msg}"),
            SyncError::EmptyTripLog(scooter_id) => write!(f, "no trip logs for scooter {scooter_id}, check that the scooter id is correct"),
            SyncError::MissingDisplayId => f.write_str("scooter display id is missing"),
            SyncError::Encode(msg) => write!(f, "failed to encode ride: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}
