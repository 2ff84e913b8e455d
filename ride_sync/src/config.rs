use std::fmt;

use clap::ValueEnum;

use crate::DEFAULT_API_BASE_URL;

/// Everything one run needs. Built by the binary from flags and environment;
/// the library itself never reads the environment.
#[derive(Clone)]
pub struct Config {
    pub scooter_id: String,
    pub api_token: String,
    pub webhook_url: String,
    pub api_base_url: String,
    pub triplog_limit: u32,
    pub ride_limit: u32,
    pub sort: SortOrder,
}

impl Config {
    pub fn new(scooter_id: String, api_token: String, webhook_url: String) -> Self {
        Self {
            scooter_id,
            api_token,
            webhook_url,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            triplog_limit: 1,
            ride_limit: 20,
            sort: SortOrder::Desc,
        }
    }
}

// The token stays out of logs and panics.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("scooter_id", &self.scooter_id)
            .field("api_token", &"<redacted>")
            .field("webhook_url", &self.webhook_url)
            .field("api_base_url", &self.api_base_url)
            .field("triplog_limit", &self.triplog_limit)
            .field("ride_limit", &self.ride_limit)
            .field("sort", &self.sort)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_debug_hides_token() {
    let config = Config::new("scooter".into(), "very-secret".into(), "https://sheet.example/exec".into());
    let printed = format!("{config:?}");
    assert!(!printed.contains("very-secret"));
    assert!(printed.contains("scooter"));
    assert_eq!(config.sort.to_string(), "desc");
}
