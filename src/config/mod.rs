use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub simulator: SimulatorSettings,
    pub transcription: TranscriptionConfig,
    pub summarizer: SummarizerConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 7227, // RCAP on a phone keypad
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    pub enabled: bool,
    pub tick_interval_seconds: u64,
    /// A meeting advances on a tick when a uniform draw exceeds this.
    pub advance_threshold: f64,
    /// Per-tick chance of spawning an auto-generated demo meeting.
    pub spawn_chance: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_seconds: 3,
            advance_threshold: 0.7,
            spawn_chance: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// "mock" or "whisper-api"
    pub provider: String,
    pub model: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            model: None,
            api_endpoint: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// "mock" or "openai"
    pub provider: String,
    pub model: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            model: Some("gpt-4".to_string()),
            api_endpoint: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Seed the store with demo meetings on startup.
    pub seed_on_start: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed_on_start: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.simulator.enabled);
        assert_eq!(config.simulator.advance_threshold, 0.7);
        assert_eq!(config.transcription.provider, "mock");
        assert_eq!(config.summarizer.provider, "mock");
        assert!(config.demo.seed_on_start);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [simulator]
            advance_threshold = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.simulator.advance_threshold, 0.5);
        assert_eq!(config.simulator.tick_interval_seconds, 3);
        assert_eq!(config.api.port, 7227);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.api.port, config.api.port);
        assert_eq!(parsed.summarizer.model, config.summarizer.model);
    }
}
