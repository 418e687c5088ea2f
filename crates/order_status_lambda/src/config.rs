use std::time::Duration;

use order_status_core::statement::{is_valid_table_name, WarehouseTarget, DEFAULT_ORDER_TABLE};

pub const CLUSTER_IDENTIFIER_VAR: &str = "REDSHIFT_CLUSTER_IDENTIFIER";
pub const DATABASE_VAR: &str = "REDSHIFT_DATABASE";
pub const DB_USER_VAR: &str = "REDSHIFT_DB_USER";
pub const ORDER_TABLE_VAR: &str = "ORDER_TRACKING_TABLE";
pub const POLL_INTERVAL_VAR: &str = "QUERY_POLL_INTERVAL_MS";
pub const MAX_WAIT_VAR: &str = "QUERY_MAX_WAIT_MS";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} must be a positive number of milliseconds, got '{value}'")]
    InvalidDuration { name: &'static str, value: String },
    #[error(
        "QUERY_POLL_INTERVAL_MS ({poll_interval_ms} ms) must not exceed QUERY_MAX_WAIT_MS ({max_wait_ms} ms)"
    )]
    PollIntervalExceedsMaxWait {
        poll_interval_ms: u128,
        max_wait_ms: u128,
    },
    #[error("ORDER_TRACKING_TABLE '{0}' is not a valid table name")]
    InvalidTable(String),
}

/// Bounds of the status poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

/// Deployment-time settings, loaded once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub target: WarehouseTarget,
    pub table: String,
    pub poll: PollPolicy,
}

impl WarehouseConfig {
    pub fn new(target: WarehouseTarget) -> Self {
        Self {
            target,
            table: DEFAULT_ORDER_TABLE.to_string(),
            poll: PollPolicy::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let target = WarehouseTarget {
            cluster_identifier: required(&lookup, CLUSTER_IDENTIFIER_VAR)?,
            database: required(&lookup, DATABASE_VAR)?,
            db_user: required(&lookup, DB_USER_VAR)?,
        };

        let table = lookup(ORDER_TABLE_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ORDER_TABLE.to_string());
        if !is_valid_table_name(&table) {
            return Err(ConfigError::InvalidTable(table));
        }

        let poll = PollPolicy {
            interval: duration_ms(&lookup, POLL_INTERVAL_VAR, DEFAULT_POLL_INTERVAL)?,
            max_wait: duration_ms(&lookup, MAX_WAIT_VAR, DEFAULT_MAX_WAIT)?,
        };
        if poll.interval > poll.max_wait {
            return Err(ConfigError::PollIntervalExceedsMaxWait {
                poll_interval_ms: poll.interval.as_millis(),
                max_wait_ms: poll.max_wait.as_millis(),
            });
        }

        Ok(Self {
            target,
            table,
            poll,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn duration_ms(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidDuration { name, value: raw }),
    }
}
