use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "gamer_config.json";
pub const CONFIG_PATH_ENV: &str = "CONNECT4_GAMER_CONFIG";
pub const DEFAULT_ENDPOINT: &str = "https://kevinalabs.com/connect4/back-end/index.php/getMoves";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GamerConfig {
    pub listen_addr: String,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl GamerConfig {
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(Self::path())?;
        Self::from_json(&config_str)
    }

    pub fn from_json(config_str: &str) -> anyhow::Result<Self> {
        let config: GamerConfig = serde_json::from_str(config_str)?;
        if config.scoring.timeout_secs == 0 {
            anyhow::bail!("scoring.timeout_secs must be at least 1");
        }
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::info!(path = %Self::path().display(), error = %e, "using default config");
                Self::default()
            }
        }
    }
}

impl Default for GamerConfig {
    fn default() -> Self {
        GamerConfig {
            listen_addr: "127.0.0.1:8080".to_string(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}
