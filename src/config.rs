//! Configuration for Burst FX

use serde::{Deserialize, Serialize};

use crate::style::BurstStyle;

pub const CONFIG_FILE: &str = "burst-fx.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed simulation period in milliseconds (~60 Hz).
    pub tick_ms: u64,
    /// Force every burst to one style. `None` keeps bursts randomized unless
    /// the trigger itself carries a hint.
    pub forced_style: Option<BurstStyle>,
    /// Per-frame alpha jitter on shimmering particles.
    pub shimmer_enabled: bool,
    /// Upper bound on the shared pool across all concurrent bursts.
    pub max_pool: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            forced_style: None,
            shimmer_enabled: true,
            max_pool: 10_000,
        }
    }
}

impl AppConfig {
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Load from disk, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(%err, path, "config not loaded, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_ms, 16);
        assert!(config.forced_style.is_none());
        assert!(config.shimmer_enabled);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AppConfig {
            tick_ms: 20,
            forced_style: Some(BurstStyle::Phoenix),
            shimmer_enabled: false,
            max_pool: 500,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tick_ms, 20);
        assert_eq!(back.forced_style, Some(BurstStyle::Phoenix));
        assert!(!back.shimmer_enabled);
        assert_eq!(back.max_pool, 500);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: AppConfig = serde_json::from_str(r#"{"forced_style":"matrix"}"#).unwrap();
        assert_eq!(back.forced_style, Some(BurstStyle::Matrix));
        assert_eq!(back.tick_ms, 16);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = AppConfig::load_or_default("/nonexistent/burst-fx.json");
        assert_eq!(config.tick_ms, 16);
    }
}
