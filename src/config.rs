//! Runtime configuration resolved from the environment.
//!
//! Precedence is always: explicit CLI value, then environment variable,
//! then the built-in default.

use std::str::FromStr;
use std::time::Duration;

use crate::{
    core::ResourceClient,
    error::{DashError, Result},
    feeds::{ESPN_SITE_BASE_URL, MLB_STATS_BASE_URL},
};

pub const ESPN_URL_ENV_VAR: &str = "SPORTS_DASH_ESPN_URL";
pub const MLB_URL_ENV_VAR: &str = "SPORTS_DASH_MLB_URL";
pub const POLL_SECS_ENV_VAR: &str = "SPORTS_DASH_POLL_SECS";
pub const PAGE_SIZE_ENV_VAR: &str = "SPORTS_DASH_PAGE_SIZE";
pub const TIMEOUT_SECS_ENV_VAR: &str = "SPORTS_DASH_TIMEOUT_SECS";

pub const DEFAULT_POLL_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub espn_base_url: String,
    pub mlb_base_url: String,
    pub poll_interval: Duration,
    pub page_size: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            espn_base_url: ESPN_SITE_BASE_URL.to_string(),
            mlb_base_url: MLB_STATS_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Parse a variable that must be a positive number. Unset gives `None`.
fn parse_positive<T>(var: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr + Default + PartialEq,
{
    let Some(value) = raw else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(v) if v != T::default() => Ok(Some(v)),
        _ => Err(DashError::InvalidConfig {
            var: var.to_string(),
            value,
        }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their
    /// defaults, unparsable or zero values are errors.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ESPN_URL_ENV_VAR) {
            config.espn_base_url = url;
        }
        if let Some(url) = lookup(MLB_URL_ENV_VAR) {
            config.mlb_base_url = url;
        }

        if let Some(secs) = parse_positive::<u64>(POLL_SECS_ENV_VAR, lookup(POLL_SECS_ENV_VAR))? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(size) = parse_positive::<usize>(PAGE_SIZE_ENV_VAR, lookup(PAGE_SIZE_ENV_VAR))? {
            config.page_size = size;
        }
        if let Some(secs) =
            parse_positive::<u64>(TIMEOUT_SECS_ENV_VAR, lookup(TIMEOUT_SECS_ENV_VAR))?
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Apply an explicit poll interval (seconds) from the command line.
    pub fn resolve_poll_interval(&self, cli_secs: Option<u64>) -> Result<Duration> {
        match cli_secs {
            Some(0) => Err(DashError::validation("--interval must be at least 1 second")),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(self.poll_interval),
        }
    }

    pub fn resolve_page_size(&self, cli_limit: Option<usize>) -> Result<usize> {
        match cli_limit {
            Some(0) => Err(DashError::validation("--limit must be at least 1")),
            Some(limit) => Ok(limit),
            None => Ok(self.page_size),
        }
    }

    pub fn espn_client(&self) -> Result<ResourceClient> {
        ResourceClient::new(&self.espn_base_url, self.request_timeout)
    }

    pub fn mlb_client(&self) -> Result<ResourceClient> {
        ResourceClient::new(&self.mlb_base_url, self.request_timeout)
    }
}
