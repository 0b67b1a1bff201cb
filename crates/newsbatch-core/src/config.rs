use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Interface language sent to the feed source (`hl`)
    #[serde(default = "default_hl")]
    pub hl: String,
    /// Geographic region sent to the feed source (`gl`)
    #[serde(default = "default_gl")]
    pub gl: String,
    /// Country/edition identifier sent to the feed source (`ceid`)
    #[serde(default = "default_ceid")]
    pub ceid: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// User-Agent header for feed requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Result cap for a single keyword search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hl: default_hl(),
            gl: default_gl(),
            ceid: default_ceid(),
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Result cap applied to every keyword in a batch
    #[serde(default = "default_per_keyword_cap")]
    pub per_keyword_cap: usize,
    /// Delay between keyword queries in milliseconds (0 = no pacing)
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            per_keyword_cap: default_per_keyword_cap(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

fn default_hl() -> String {
    "zh-TW".to_string()
}

fn default_gl() -> String {
    "TW".to_string()
}

fn default_ceid() -> String {
    "TW:zh-Hant".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_max_results() -> usize {
    50
}

fn default_per_keyword_cap() -> usize {
    30
}

fn default_pacing_ms() -> u64 {
    500
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newsbatch/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newsbatch")
            .join("config.toml")
    }
}
