use crate::client::ClientOptions;
use crate::constants::{
    DEFAULT_ACCEPT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_CONTROL_PORT, DEFAULT_DEPTH,
    DEFAULT_PASSWORD, DEFAULT_RECONNECT_TIMEOUT, DEFAULT_RETRY_INTERVAL, DEFAULT_USER,
};
use crate::session::DataMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub data_mode: DataMode,
    pub active_address: Option<Ipv4Addr>, // Advertised in PORT, defaults to the control socket's address
    pub accept_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub reconnect_timeout_secs: u64,
    pub retry_interval_ms: u64,
    pub max_depth: i32,
    pub start_dir: Option<String>,
    pub json_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_CONTROL_PORT,
            user: String::from(DEFAULT_USER),
            password: String::from(DEFAULT_PASSWORD),
            data_mode: DataMode::Passive,
            active_address: None,
            accept_timeout_secs: DEFAULT_ACCEPT_TIMEOUT.as_secs(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            reconnect_timeout_secs: DEFAULT_RECONNECT_TIMEOUT.as_secs(),
            retry_interval_ms: DEFAULT_RETRY_INTERVAL.as_millis() as u64,
            max_depth: DEFAULT_DEPTH,
            start_dir: None,
            json_output: None,
        }
    }
}

impl ClientConfig {
    /// Reads the `[client]` table of a TOML file. Missing fields keep their defaults.
    pub fn load_from_file(path: &str) -> Result<ClientConfig> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;
        Ok(config.client)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            data_mode: self.data_mode,
            active_address: self.active_address,
            accept_timeout: Duration::from_secs(self.accept_timeout_secs),
            reconnect_timeout: Duration::from_secs(self.reconnect_timeout_secs),
            retry_interval: Duration::from_millis(self.retry_interval_ms),
        }
    }
}
