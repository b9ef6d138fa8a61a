use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "PRIMITIVE_BACKEND_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Address the WebSocket server listens on.
    pub bind: SocketAddr,
    /// Decimals used when writing numbers into generated scripts.
    pub decimals: usize,
    /// `tracing` filter directive, overridden by `RUST_LOG` when set.
    pub log_filter: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            decimals: 2,
            log_filter: "info".to_string(),
        }
    }
}

impl BackendConfig {
    /// Load from the file named by [`CONFIG_ENV`], or defaults if unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
