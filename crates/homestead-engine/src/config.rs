//! Engine configuration.
//!
//! Display options plus the gameplay config, loaded from a TOML file. Any
//! field left out of the file keeps its default.

use homestead_gameplay::FarmConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Configuration file read when `--config` is not given.
pub const CONFIG_FILE: &str = "homestead.toml";

/// How the farm is drawn after each command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print a JSON snapshot instead of the text view
    pub json: bool,
    /// Include the item list in the text view
    pub show_items: bool,
    /// Include the growth legend in the text view
    pub show_legend: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            json: false,
            show_items: true,
            show_legend: false,
        }
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display settings
    pub display: DisplayConfig,
    /// Gameplay settings
    pub farm: FarmConfig,
}

impl EngineConfig {
    /// Load configuration from a specific path.
    ///
    /// Returns the default config if the file doesn't exist, can't be parsed,
    /// or describes an inconsistent farm.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        let config: Self = match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                return Self::default();
            },
        };

        if let Err(e) = config.farm.validate() {
            warn!("Invalid farm config in {}: {e}", path.display());
            return Self::default();
        }

        info!("Loaded config from {}", path.display());
        config
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> io::Result<String> {
        toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
