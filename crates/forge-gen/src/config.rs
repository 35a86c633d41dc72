//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `FORGE_{PROVIDER}_API_KEY`
//! 2. Project-local: `.forge/config.toml`
//! 3. Global: `~/.forge/config.toml`

use forge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Providers whose API keys may come from the environment
const ENV_PROVIDERS: [&str; 1] = ["gemini"];
const MAX_PIXEL_RATIO: u32 = 8;

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// `[generation]` as written in a file; unset keys fall through to lower layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSection {
    pub provider: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub card_candidates: Option<u32>,
    pub tile_candidates: Option<u32>,
    pub history_limit: Option<usize>,
}

/// `[export]` as written in a file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSection {
    pub output_dir: Option<PathBuf>,
    pub pixel_ratio: Option<u32>,
    pub background: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub export: ExportSection,
}

/// Resolved generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub provider: String,
    pub text_model: String,
    pub image_model: String,
    pub card_candidates: u32,
    pub tile_candidates: u32,
    /// Maximum undo depth; `None` keeps every snapshot
    pub history_limit: Option<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            card_candidates: 4,
            tile_candidates: 4,
            history_limit: None,
        }
    }
}

/// Resolved export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub pixel_ratio: u32,
    pub background: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            pixel_ratio: 2,
            background: "#111827".to_string(),
        }
    }
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

impl ForgeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let global = Self::global_config_path();
        let local = PathBuf::from(".forge/config.toml");
        let layers: Vec<&Path> = global.iter().map(PathBuf::as_path).chain([local.as_path()]).collect();
        Self::load_layers(&layers)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut file = Self::load_file(path)?;
        Self::apply_env_overrides(&mut file);
        Ok(Self::resolve(file))
    }

    /// Merge the given files in order, later ones winning. Missing files are skipped.
    pub fn load_layers(paths: &[&Path]) -> Result<Self> {
        let mut config = ForgeConfigFile::default();
        for path in paths {
            if path.exists() {
                let layer = Self::load_file(path)?;
                Self::merge_into(&mut config, layer);
            }
        }
        Self::apply_env_overrides(&mut config);
        Ok(Self::resolve(config))
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
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".forge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ForgeConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ForgeError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut ForgeConfigFile, overlay: ForgeConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.enabled.is_some() {
                entry.enabled = provider.enabled;
            }
        }

        let (generation, over) = (&mut base.generation, overlay.generation);
        generation.provider = over.provider.or(generation.provider.take());
        generation.text_model = over.text_model.or(generation.text_model.take());
        generation.image_model = over.image_model.or(generation.image_model.take());
        generation.card_candidates = over.card_candidates.or(generation.card_candidates);
        generation.tile_candidates = over.tile_candidates.or(generation.tile_candidates);
        generation.history_limit = over.history_limit.or(generation.history_limit);

        let (export, over) = (&mut base.export, overlay.export);
        export.output_dir = over.output_dir.or(export.output_dir.take());
        export.pixel_ratio = over.pixel_ratio.or(export.pixel_ratio);
        export.background = over.background.or(export.background.take());
    }

    fn apply_env_overrides(config: &mut ForgeConfigFile) {
        for name in &ENV_PROVIDERS {
            let env_key = format!("FORGE_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }

    fn resolve(file: ForgeConfigFile) -> Self {
        let gen_defaults = GenerationConfig::default();
        let export_defaults = ExportConfig::default();
        let generation = file.generation;
        let export = file.export;

        ForgeConfig {
            providers: file.providers,
            generation: GenerationConfig {
                provider: generation.provider.unwrap_or(gen_defaults.provider),
                text_model: generation.text_model.unwrap_or(gen_defaults.text_model),
                image_model: generation.image_model.unwrap_or(gen_defaults.image_model),
                card_candidates: generation
                    .card_candidates
                    .unwrap_or(gen_defaults.card_candidates)
                    .max(1),
                tile_candidates: generation
                    .tile_candidates
                    .unwrap_or(gen_defaults.tile_candidates)
                    .max(1),
                history_limit: generation.history_limit,
            },
            export: ExportConfig {
                output_dir: export.output_dir.unwrap_or(export_defaults.output_dir),
                pixel_ratio: export
                    .pixel_ratio
                    .unwrap_or(export_defaults.pixel_ratio)
                    .clamp(1, MAX_PIXEL_RATIO),
                background: export.background.unwrap_or(export_defaults.background),
            },
        }
    }
}
