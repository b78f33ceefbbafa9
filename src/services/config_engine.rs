// Tabshell Config Engine
// Manages shell options: loading, saving, updating individual values, and resetting to defaults.
// Options are stored as a JSON file at the platform-specific config path.

use std::env;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::platform;
use crate::types::errors::ConfigError;
use crate::types::options::ShellOptions;

/// Environment variable that points the engine at a specific options file.
pub const CONFIG_ENV_VAR: &str = "TABSHELL_CONFIG";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<ShellOptions, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn options(&self) -> &ShellOptions;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError>;
    fn reset(&mut self) -> Result<(), ConfigError>;
    fn config_path(&self) -> &str;
}

/// Config engine implementation that persists options as JSON on disk.
pub struct ConfigEngine {
    config_path: String,
    options: ShellOptions,
}

impl ConfigEngine {
    /// Creates a new ConfigEngine.
    ///
    /// Path resolution: `path_override`, then `$TABSHELL_CONFIG`, then
    /// `options.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| env::var(CONFIG_ENV_VAR).ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| {
                platform::get_config_dir()
                    .join("options.json")
                    .to_string_lossy()
                    .to_string()
            });

        Self {
            config_path,
            options: ShellOptions::default(),
        }
    }

    /// Consume the engine, keeping only the loaded options.
    pub fn into_options(self) -> ShellOptions {
        self.options
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// Loads options from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is an error. Keys absent
    /// from the file keep their default values.
    fn load(&mut self) -> Result<ShellOptions, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "no options file, using defaults");
            self.options = ShellOptions::default();
            return Ok(self.options.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read options file: {}", e)))?;

        let options: ShellOptions = serde_json::from_str(&content).map_err(|e| {
            ConfigError::Serialization(format!("Failed to parse options file: {}", e))
        })?;

        debug!(path = %self.config_path, "options loaded");
        self.options = options;
        Ok(self.options.clone())
    }

    /// Saves the current options, creating parent directories as needed.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.options).map_err(|e| {
            ConfigError::Serialization(format!("Failed to serialize options: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write options file: {}", e)))?;

        Ok(())
    }

    fn options(&self) -> &ShellOptions {
        &self.options
    }

    /// Updates a single option by dot-notation key path and saves.
    ///
    /// Keys use the on-disk (camelCase) names, e.g. `"controlHeight"` or
    /// `"surfaceDefaults.userAgent"`. The edited document is deserialized back
    /// into `ShellOptions`, so values of the wrong type are rejected.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::InvalidKey("Key cannot be empty".to_string()));
        }

        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return Err(ConfigError::InvalidKey(key.to_string())),
        };

        let mut document = serde_json::to_value(&self.options).map_err(|e| {
            ConfigError::Serialization(format!("Failed to serialize options: {}", e))
        })?;

        let mut current = &mut document;
        for part in parents {
            current = current
                .get_mut(*part)
                .ok_or_else(|| ConfigError::InvalidKey(format!("Key '{}' not found", key)))?;
        }
        match current {
            serde_json::Value::Object(map) if map.contains_key(*last) => {
                map.insert(last.to_string(), value);
            }
            serde_json::Value::Object(_) => {
                return Err(ConfigError::InvalidKey(format!("Key '{}' not found", key)));
            }
            _ => {
                return Err(ConfigError::InvalidKey(format!(
                    "Cannot navigate to key '{}': intermediate value is not an object",
                    key
                )));
            }
        }

        let mut updated: ShellOptions = serde_json::from_value(document).map_err(|e| {
            ConfigError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        updated.popup_override = self.options.popup_override.take();
        self.options = updated;

        self.save()
    }

    /// Restores default options and saves them.
    fn reset(&mut self) -> Result<(), ConfigError> {
        self.options = ShellOptions::default();
        self.save()
    }

    fn config_path(&self) -> &str {
        &self.config_path
    }
}
