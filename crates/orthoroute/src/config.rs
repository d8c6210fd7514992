use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::routing::types::RoutingConfig;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "orthoroute";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingDefaults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingDefaults {
    /// Extra search cost per bend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_penalty: Option<f64>,

    /// Move runs onto the center line after routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_line: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `orthoroute config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# orthoroute configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "routing.turn_penalty" => {
                let penalty: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid turn_penalty: {value}. Must be a number."))?;
                if !penalty.is_finite() || penalty < 0.0 {
                    anyhow::bail!("Invalid turn_penalty: {value}. Must be zero or positive.");
                }
                self.routing
                    .get_or_insert_with(RoutingDefaults::default)
                    .turn_penalty = Some(penalty);
            }
            "routing.center_line" => {
                let enabled = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!("Invalid center_line: {value}. Must be 'true' or 'false'."),
                };
                self.routing
                    .get_or_insert_with(RoutingDefaults::default)
                    .center_line = Some(enabled);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: routing.turn_penalty, routing.center_line"
            ),
        }
        Ok(())
    }

    /// Engine settings: file values layered over the defaults.
    pub fn routing_config(&self) -> RoutingConfig {
        let mut config = RoutingConfig::default();
        if let Some(routing) = &self.routing {
            if let Some(penalty) = routing.turn_penalty {
                config.turn_penalty = penalty;
            }
            if let Some(enabled) = routing.center_line {
                config.center_line = enabled;
            }
        }
        config
    }
}
