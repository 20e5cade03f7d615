//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `LINGO_{PROVIDER}_API_KEY`
//! 2. Project-local: `.lingo/config.toml`
//! 3. Global: `~/.lingo/config.toml`

use crate::provider::AssetKind;
use lingo_core::{LingoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_audio_provider")]
    pub default_audio_provider: String,
    #[serde(default = "default_image_provider")]
    pub default_image_provider: String,
    /// Chat model used by the answer validator
    #[serde(default = "default_validation_model")]
    pub validation_model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_audio_provider: default_audio_provider(),
            default_image_provider: default_image_provider(),
            validation_model: default_validation_model(),
        }
    }
}

fn default_audio_provider() -> String {
    "elevenlabs".to_string()
}
fn default_image_provider() -> String {
    "openai".to_string()
}
fn default_validation_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl GenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = GenConfigFile::default();

        // Layer 1: Global config (~/.lingo/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.lingo/config.toml)
        let local_path = PathBuf::from(".lingo/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(GenConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(GenConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL for a provider (or its default)
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Get the default provider name for an asset kind
    pub fn default_provider(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Audio => &self.generation.default_audio_provider,
            AssetKind::Image => &self.generation.default_image_provider,
        }
    }

    /// Get the chat model name used by the answer validator
    pub fn validation_model(&self) -> &str {
        &self.generation.validation_model
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".lingo").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GenConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfigFile = toml::from_str(&content).map_err(|e| {
            LingoError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut GenConfigFile, overlay: GenConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            entry.enabled = provider.enabled;
        }

        if overlay.generation.default_audio_provider != default_audio_provider() {
            base.generation.default_audio_provider = overlay.generation.default_audio_provider;
        }
        if overlay.generation.default_image_provider != default_image_provider() {
            base.generation.default_image_provider = overlay.generation.default_image_provider;
        }
        if overlay.generation.validation_model != default_validation_model() {
            base.generation.validation_model = overlay.generation.validation_model;
        }
    }

    fn apply_env_overrides(config: &mut GenConfigFile) {
        let provider_names = ["elevenlabs", "openai"];
        for name in &provider_names {
            let env_key = format!("LINGO_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lingo_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        // Clear any env var that might interfere
        std::env::remove_var("LINGO_ELEVENLABS_API_KEY");

        let config_str = r#"
[providers.elevenlabs]
api_key = "test-key-123"
api_url = "https://api.example.com/tts"
enabled = true

[providers.openai]
api_key = "sk-test"
enabled = false

[generation]
default_audio_provider = "elevenlabs"
validation_model = "gpt-4o"
"#;
        let path = temp_config(config_str);
        let config = GenConfig::load_from_file(&path).unwrap();

        assert!(config.is_enabled("elevenlabs"));
        assert!(!config.is_enabled("openai"));
        assert_eq!(config.validation_model(), "gpt-4o");
        assert_eq!(
            config.api_url("elevenlabs"),
            Some("https://api.example.com/tts")
        );

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_var_override() {
        let config_str = r#"
[providers.openai]
api_key = "file-key"
"#;
        let path = temp_config(config_str);

        std::env::set_var("LINGO_OPENAI_API_KEY", "env-key-override");

        let config = GenConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api_key("openai"), Some("env-key-override"));

        std::env::remove_var("LINGO_OPENAI_API_KEY");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_default_providers() {
        let config = GenConfig {
            providers: HashMap::new(),
            generation: GenerationConfig::default(),
        };

        assert_eq!(config.default_provider(AssetKind::Audio), "elevenlabs");
        assert_eq!(config.default_provider(AssetKind::Image), "openai");
        assert_eq!(config.validation_model(), "gpt-4o-mini");
    }

    #[test]
    fn test_missing_provider_returns_none() {
        let config = GenConfig {
            providers: HashMap::new(),
            generation: GenerationConfig::default(),
        };
        assert_eq!(config.api_key("nonexistent"), None);
        assert!(config.is_enabled("nonexistent")); // defaults to true
    }
}
