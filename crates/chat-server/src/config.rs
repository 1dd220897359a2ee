//! Configuration for the relay HTTP server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `CHAT_BIND_ADDR`        (default: "0.0.0.0")
//! - `CHAT_PORT`             (default: "3000")
//! - `CHAT_STORE`            (default: "memory"; or "sqlite")
//! - `CHAT_DB_PATH`          (default: "chat.db")
//! - `CHAT_LOG_PATH`         (default: "messages.txt")
//! - `CHAT_TYPING_WINDOW_MS` (default: "3000")

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which storage backend holds room messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-lifetime map; messages vanish on restart.
    Memory,
    /// SQLite file at [`Config::db_path`].
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => bail!("unknown store kind {:?} (expected \"memory\" or \"sqlite\")", other),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on. `0` picks an ephemeral port.
    pub port: u16,

    /// Storage backend for messages.
    pub store: StoreKind,

    /// SQLite database file, used when `store` is [`StoreKind::Sqlite`].
    pub db_path: PathBuf,

    /// Append-only audit log, one line per accepted message.
    pub log_path: PathBuf,

    /// How long a typing ping stays visible.
    pub typing_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreKind::Memory,
            db_path: PathBuf::from("chat.db"),
            log_path: PathBuf::from("messages.txt"),
            typing_window: chat_core::DEFAULT_FRESHNESS_WINDOW,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults above.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let bind_addr = env::var("CHAT_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("CHAT_PORT", defaults.port)?;
        let store = read_env_or_default("CHAT_STORE", defaults.store)?;
        let db_path = env::var_os("CHAT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let log_path = env::var_os("CHAT_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);
        let window_ms = read_env_or_default(
            "CHAT_TYPING_WINDOW_MS",
            defaults.typing_window.as_millis() as u64,
        )?;

        Ok(Config {
            bind_addr,
            port,
            store,
            db_path,
            log_path,
            typing_window: Duration::from_millis(window_ms),
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value {:?} for {}", val, key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kind_parses_case_insensitively() {
        assert_eq!("memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert_eq!("SQLite".parse::<StoreKind>().unwrap(), StoreKind::Sqlite);
        assert!("mongo".parse::<StoreKind>().is_err());
    }

    #[test]
    fn defaults_match_the_browser_client() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.log_path, PathBuf::from("messages.txt"));
        assert_eq!(cfg.typing_window, Duration::from_millis(3000));
        assert_eq!(cfg.socket_addr_string(), "0.0.0.0:3000");
    }
}
