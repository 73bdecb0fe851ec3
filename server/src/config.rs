//! Server Configuration
//!
//! Read once from the environment at startup.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::repository::{StoreTarget, StoreTargetError};

pub const STORE_URL_VAR: &str = "TODO_STORE_URL";
pub const BIND_ADDR_VAR: &str = "TODO_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "TODO_STATIC_DIR";
pub const LOG_DIR_VAR: &str = "TODO_LOG_DIR";

pub const DEFAULT_STORE_URL: &str = "sqlite://todo-app.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TODO_BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        source: AddrParseError,
    },
    #[error("invalid TODO_STORE_URL: {0}")]
    Store(#[from] StoreTargetError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `None` when the store is explicitly disabled with an empty URL
    pub store: Option<StoreTarget>,
    pub bind_addr: SocketAddr,
    /// Compiled front end served for every non-API path
    pub static_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_url = lookup(STORE_URL_VAR).unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let store = if store_url.trim().is_empty() {
            None
        } else {
            Some(StoreTarget::parse(&store_url)?)
        };

        let bind_value = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_value
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let static_dir = lookup(STATIC_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            store,
            bind_addr,
            static_dir,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store, Some(StoreTarget::File(PathBuf::from("todo-app.db"))));
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.static_dir, None);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_empty_store_url_disables_store() {
        let config = ServerConfig::from_lookup(lookup_from(&[(STORE_URL_VAR, "")])).unwrap();
        assert_eq!(config.store, None);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (STORE_URL_VAR, "sqlite::memory:"),
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (STATIC_DIR_VAR, "dist"),
            (LOG_DIR_VAR, "/var/log/todo"),
        ]))
        .unwrap();
        assert_eq!(config.store, Some(StoreTarget::Memory));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/todo"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[(BIND_ADDR_VAR, "not an address")])),
            Err(ConfigError::BindAddr { .. })
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[(STORE_URL_VAR, "mongodb://localhost/todo")])),
            Err(ConfigError::Store(_))
        ));
    }
}
