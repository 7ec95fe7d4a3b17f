use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Settings a [`Connection`](crate::Connection) implementation is created from.
///
/// Missing fields fall back to the `MG_*` environment variables, then to the
/// defaults of a local Memgraph instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_encrypted")]
    pub encrypted: bool,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    /// Fetch result rows on demand rather than all at once.
    #[serde(default = "default_lazy")]
    pub lazy: bool,
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"))
}

fn default_host() -> String {
    env::var("MG_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
}

fn default_port() -> u16 {
    env::var("MG_PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(7687)
}

fn default_username() -> String {
    env::var("MG_USERNAME").unwrap_or_default()
}

fn default_password() -> String {
    env::var("MG_PASSWORD").unwrap_or_default()
}

fn default_encrypted() -> bool {
    env_flag("MG_ENCRYPT").unwrap_or(false)
}

fn default_client_name() -> String {
    env::var("MG_CLIENT_NAME").unwrap_or_else(|_| "graphmill".to_string())
}

fn default_lazy() -> bool {
    env_flag("MG_LAZY").unwrap_or(false)
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            encrypted: default_encrypted(),
            client_name: default_client_name(),
            lazy: default_lazy(),
        }
    }
}

impl ConnectionConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for [`wait_for_port`](crate::wait_for_port).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    pub delay: Duration,
    pub timeout: Duration,
    pub backoff: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            delay: Duration::from_millis(10),
            timeout: Duration::from_secs(5),
            backoff: 2.0,
        }
    }
}
