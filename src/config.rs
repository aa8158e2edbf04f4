use serde::Deserialize;
use std::path::Path;

const CONFIG_FILE_PATH: &str = "data/config.toml";

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Config {
    pub account_delay_secs: u64,
    pub run_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_delay_secs: 5,
            run_interval_secs: 88_200, // 24.5 hours
        }
    }
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&cfg_str)?)
    }

    pub async fn read_default() -> Self {
        match Self::read_from_file(CONFIG_FILE_PATH).await {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to read {CONFIG_FILE_PATH}: {err}. Using defaults");
                Self::default()
            }
        }
    }
}
