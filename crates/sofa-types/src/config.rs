//! Runtime configuration loaded from `sofa.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SofaError};
use crate::input::{KeyBindings, KeyMap};

/// Top-level configuration. Every field has a default, so an empty file is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SofaConfig {
    /// Address the embedded region starts on; empty means "derive from the
    /// last saved address".
    pub home_address: String,
    /// Location of the persisted key-value store.
    pub store_path: PathBuf,
    /// Path extensions (without the dot) treated as directly playable.
    pub playable_extensions: Vec<String>,
    /// Raw key codes per remote signal.
    pub keys: KeyBindings,
}

impl Default for SofaConfig {
    fn default() -> Self {
        Self {
            home_address: String::new(),
            store_path: PathBuf::from("sofa-store.json"),
            playable_extensions: default_extensions(),
            keys: KeyBindings::default(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["mp4", "webm", "ogg"].iter().map(|s| s.to_string()).collect()
}

impl SofaConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: SofaConfig = toml::from_str(text)?;
        config.normalize()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Key map built from the configured bindings.
    pub fn key_map(&self) -> KeyMap {
        KeyMap::new(&self.keys)
    }

    /// Strip leading dots and lowercase the extension list.
    fn normalize(&mut self) -> Result<()> {
        let mut extensions = Vec::with_capacity(self.playable_extensions.len());
        for ext in &self.playable_extensions {
            let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() || ext.contains('/') {
                return Err(SofaError::Config(format!(
                    "invalid playable extension: {ext:?}"
                )));
            }
            extensions.push(ext);
        }
        self.playable_extensions = extensions;
        self.home_address = self.home_address.trim().to_string();
        Ok(())
    }
}
