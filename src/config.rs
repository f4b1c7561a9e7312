// Runtime configuration read from the environment.
//
// Variables (all optional)
// - TRIAGE_API_BASE_URL      backend root, default http://localhost:3000/api
// - TRIAGE_API_TOKEN         bearer token attached to backend requests
// - TRIAGE_ADMIN_EMAIL       identity sent with remark acknowledgements
// - TRIAGE_STATE_DIR         where view state is persisted, default .triage-state
// - TRIAGE_BIND_ADDR         listen address, default 0.0.0.0:8080
// - TRIAGE_FETCH_TIMEOUT_MS  backend request timeout, default 10000
// - TRIAGE_NEW_WINDOW_HOURS  age under which a report counts as new, default 24
// - TRIAGE_VIEWED_TTL_DAYS   how long viewed marks are kept, default 7
// - TRIAGE_RECENT_LIMIT      maximum reports in the recent list, default 10

use crate::modules::reports::core::classify::{
    ClassifyPolicy, DEFAULT_NEW_WINDOW_HOURS, DEFAULT_RECENT_LIMIT,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_VIEWED_TTL_DAYS: i64 = 7;
const MAX_SPAN_DAYS: i64 = 365 * 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub admin_email: String,
    pub state_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
    pub new_window: chrono::Duration,
    pub viewed_ttl: chrono::Duration,
    pub recent_limit: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            api_token: None,
            admin_email: "admin@localhost".to_string(),
            state_dir: PathBuf::from(".triage-state"),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            fetch_timeout: Duration::from_millis(10_000),
            new_window: chrono::Duration::hours(DEFAULT_NEW_WINDOW_HOURS),
            viewed_ttl: chrono::Duration::days(DEFAULT_VIEWED_TTL_DAYS),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl TriageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            api_base_url: var("TRIAGE_API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_token: var("TRIAGE_API_TOKEN"),
            admin_email: var("TRIAGE_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            state_dir: var("TRIAGE_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
            bind_addr: parse_or("TRIAGE_BIND_ADDR", var("TRIAGE_BIND_ADDR"), defaults.bind_addr)?,
            fetch_timeout: parse_or::<u64>(
                "TRIAGE_FETCH_TIMEOUT_MS",
                var("TRIAGE_FETCH_TIMEOUT_MS"),
                10_000,
            )
            .map(Duration::from_millis)?,
            new_window: span(
                "TRIAGE_NEW_WINDOW_HOURS",
                var("TRIAGE_NEW_WINDOW_HOURS"),
                DEFAULT_NEW_WINDOW_HOURS,
                chrono::Duration::try_hours,
            )?,
            viewed_ttl: span(
                "TRIAGE_VIEWED_TTL_DAYS",
                var("TRIAGE_VIEWED_TTL_DAYS"),
                DEFAULT_VIEWED_TTL_DAYS,
                chrono::Duration::try_days,
            )?,
            recent_limit: parse_or(
                "TRIAGE_RECENT_LIMIT",
                var("TRIAGE_RECENT_LIMIT"),
                defaults.recent_limit,
            )?,
        })
    }

    pub fn classify_policy(&self) -> ClassifyPolicy {
        ClassifyPolicy {
            new_window: self.new_window,
            recent_limit: self.recent_limit,
        }
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
            value,
        }),
    }
}

/// A positive count of `unit`s. It must also fit a span that can be subtracted from the
/// current time.
fn span(
    name: &'static str,
    raw: Option<String>,
    default: i64,
    unit: fn(i64) -> Option<chrono::Duration>,
) -> Result<chrono::Duration, ConfigError> {
    let value = parse_or(name, raw, default)?;
    let invalid = |reason: &str| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    if value <= 0 {
        return Err(invalid("must be greater than zero"));
    }
    let duration = unit(value).ok_or_else(|| invalid("is out of range"))?;
    if duration > chrono::Duration::days(MAX_SPAN_DAYS) {
        return Err(invalid("is out of range"));
    }
    Ok(duration)
}
