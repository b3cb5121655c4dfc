use anyhow::{Context, Result};
use charades_persistence::connection::DEFAULT_DATABASE_URL;
use charades_persistence::repositories::HISTORY_CAPACITY;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub history_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let history_capacity = match var("HISTORY_CAPACITY") {
            Some(raw) => {
                let capacity: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid HISTORY_CAPACITY: {:?}", raw))?;
                anyhow::ensure!(capacity > 0, "HISTORY_CAPACITY must be at least 1");
                capacity
            }
            None => HISTORY_CAPACITY,
        };

        Ok(Self {
            database_url,
            history_capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            history_capacity: HISTORY_CAPACITY,
        }
    }
}
