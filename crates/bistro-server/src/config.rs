use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub query_timeout: Duration,
    // JSON object of collection name -> documents loaded at startup
    pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("SERVER_PORT is not a port number: {raw}"))?,
            None => 8080,
        };

        let timeout_secs = match lookup("QUERY_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("QUERY_TIMEOUT_SECONDS is not a whole number: {raw}"))?,
            None => 100,
        };
        if timeout_secs == 0 {
            anyhow::bail!("QUERY_TIMEOUT_SECONDS must be at least 1");
        }

        let seed_path = lookup("SEED_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            query_timeout: Duration::from_secs(timeout_secs),
            seed_path,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
