// crates/chat-client/src/config.rs

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the chat client.
///
/// Every field may be omitted from the TOML file; CLI flags win over
/// the file, the file wins over these defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub user_id: Option<String>,
    pub room: Option<String>,
    pub messages_interval_ms: u64,
    pub typing_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
            user_id: None,
            room: None,
            messages_interval_ms: 3000,
            typing_interval_ms: 1000,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Poll periods feed `tokio::time::interval`, which rejects zero.
    pub fn validate(&self) -> Result<()> {
        if self.messages_interval_ms == 0 {
            bail!("messages_interval_ms must be > 0");
        }
        if self.typing_interval_ms == 0 {
            bail!("typing_interval_ms must be > 0");
        }
        Ok(())
    }

    pub fn messages_interval(&self) -> Duration {
        Duration::from_millis(self.messages_interval_ms)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }
}

/// Room codes are trimmed and lowercased before use.
pub fn normalize_room(raw: &str) -> Result<String> {
    let room = raw.trim().to_lowercase();
    if room.is_empty() {
        bail!("Please enter a room code");
    }
    Ok(room)
}

/// A fresh `user_xxxxxxxx` identifier.
pub fn generate_user_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("user_{}", &id[..8])
}

/// Coarse device description sent with each message.
pub fn device_fingerprint() -> String {
    [
        std::env::consts::OS,
        std::env::consts::ARCH,
        concat!("chat-client/", env!("CARGO_PKG_VERSION")),
    ]
    .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ClientConfig::from_toml(
            r#"
            server_url = "http://chat.example:8080"
            room = "Lobby"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server_url, "http://chat.example:8080");
        assert_eq!(cfg.room.as_deref(), Some("Lobby"));
        assert_eq!(cfg.user_id, None);
        assert_eq!(cfg.messages_interval(), Duration::from_millis(3000));
        assert_eq!(cfg.typing_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "user_id = \"me\"\ntyping_interval_ms = 500\n").unwrap();

        let cfg = ClientConfig::load(&path).unwrap();
        assert_eq!(cfg.user_id.as_deref(), Some("me"));
        assert_eq!(cfg.typing_interval_ms, 500);
    }

    #[test]
    fn zero_poll_intervals_are_rejected() {
        let err = ClientConfig::from_toml("messages_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("messages_interval_ms"));

        let err = ClientConfig::from_toml("typing_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("typing_interval_ms"));

        assert!(ClientConfig::from_toml("typing_interval_ms = 1\n").is_ok());
    }

    #[test]
    fn room_is_trimmed_and_lowercased() {
        assert_eq!(normalize_room("  ChAoS ").unwrap(), "chaos");
        assert!(normalize_room("   ").is_err());
    }

    #[test]
    fn generated_ids_have_the_expected_shape() {
        let id = generate_user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), "user_".len() + 8);
        assert_ne!(id, generate_user_id());
    }

    #[test]
    fn fingerprint_names_the_platform() {
        let fp = device_fingerprint();
        assert!(fp.contains(std::env::consts::OS));
        assert!(fp.contains(" | chat-client/"));
    }
}
