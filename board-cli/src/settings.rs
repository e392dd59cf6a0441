use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use board_client::Timeouts;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:1000";
pub const DEFAULT_TOKEN_FILE: &str = ".board_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub token_file: PathBuf,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server = normalize_server(
            non_blank(lookup("BOARD_SERVER")).unwrap_or_else(|| DEFAULT_SERVER.to_string()),
        );
        let token_file = non_blank(lookup("BOARD_TOKEN_FILE"))
            .unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string())
            .into();
        let log_level = non_blank(lookup("LOG_LEVEL"))
            .or_else(|| non_blank(lookup("RUST_LOG")))
            .unwrap_or_else(|| "warn".to_string());
        let connect_timeout_secs =
            parse_u64(&lookup, "BOARD_CONNECT_TIMEOUT_SECS", 5)?;
        let request_timeout_secs =
            parse_u64(&lookup, "BOARD_REQUEST_TIMEOUT_SECS", 15)?;

        Ok(Self {
            server,
            token_file,
            log_level,
            connect_timeout_secs,
            request_timeout_secs,
        })
    }

    /// Флаги командной строки важнее переменных окружения.
    pub fn with_overrides(mut self, server: Option<String>, token_file: Option<PathBuf>) -> Self {
        if let Some(server) = server {
            self.server = normalize_server(server);
        }
        if let Some(token_file) = token_file {
            self.token_file = token_file;
        }
        self
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn normalize_server(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
