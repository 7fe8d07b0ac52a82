use std::time::Duration;

use crate::errors::{CbrError, Result};

/// Public DailyInfo endpoint of the Bank of Russia.
pub const DEFAULT_ENDPOINT: &str = "http://www.cbr.ru/DailyInfoWebServ/DailyInfo.asmx";

/// Target namespace of every DailyInfo operation.
pub const DEFAULT_NAMESPACE: &str = "http://web.cbr.ru/";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for the HTTP transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CbrConfig {
    pub endpoint: String,
    pub namespace: String,
    pub request_timeout: Duration,
}

impl Default for CbrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl CbrConfig {
    /// Reads `CBR_ENDPOINT`, `CBR_NAMESPACE` and `CBR_REQUEST_TIMEOUT_MS`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let endpoint = lookup("CBR_ENDPOINT").unwrap_or(defaults.endpoint);
        let namespace = lookup("CBR_NAMESPACE").unwrap_or(defaults.namespace);
        let request_timeout = match lookup("CBR_REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| {
                    CbrError::Config(format!("CBR_REQUEST_TIMEOUT_MS is not a number: {}", raw))
                })?;
                Duration::from_millis(ms)
            }
            None => defaults.request_timeout,
        };
        Ok(Self {
            endpoint,
            namespace,
            request_timeout,
        })
    }
}
