//! Layered settings for doclink.
//!
//! Three layers, later ones winning: built-in defaults, the
//! `.doclink/settings.toml` found by walking ancestor directories, and
//! `DL_`-prefixed environment variables. Env vars use double underscores
//! for nesting: `DL_FETCH__DEPTH=1` sets `fetch.depth`, `DL_DEBUG=true`
//! sets `debug`.

use crate::parsing::Language;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".doclink";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Settings schema version
    #[serde(default = "schema_version")]
    pub version: u32,

    /// Directory containing the .doclink folder, when one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    #[serde(default)]
    pub debug: bool,

    /// Per-language enablement and extension overrides, keyed by
    /// [`Language::config_key`]
    #[serde(default = "language_defaults")]
    pub languages: HashMap<String, LanguageConfig>,

    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguageConfig {
    #[serde(default = "enabled_default")]
    pub enabled: bool,

    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FetchConfig {
    /// Clone depth; None keeps full history so any revision stays
    /// reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<i32>,

    #[serde(default = "enabled_default")]
    pub download_tags: bool,
}

fn schema_version() -> u32 {
    1
}

fn enabled_default() -> bool {
    true
}

fn language_defaults() -> HashMap<String, LanguageConfig> {
    [Language::Java, Language::Go, Language::Python]
        .into_iter()
        .map(|lang| {
            let config = LanguageConfig {
                enabled: true,
                extensions: lang.extensions().iter().map(|e| e.to_string()).collect(),
            };
            (lang.config_key().to_string(), config)
        })
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: schema_version(),
            workspace_root: None,
            debug: false,
            languages: language_defaults(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            depth: None,
            download_tags: true,
        }
    }
}

impl Settings {
    /// Load settings from all layers, using the nearest ancestor
    /// `.doclink/settings.toml` when one exists
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::settings_file_path()
            .unwrap_or_else(|| Path::new(SETTINGS_DIR).join(SETTINGS_FILE));

        let mut settings = Self::figment_for(&config_path)?;
        if settings.workspace_root.is_none() {
            settings.workspace_root = Self::workspace_root();
        }
        Ok(settings)
    }

    /// Load settings from an explicit TOML file (env layer still applies)
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment_for(path.as_ref())
    }

    fn figment_for(toml_path: &Path) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed("DL_").map(|key| {
                // FETCH__DEPTH -> fetch.depth
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    fn settings_file_path() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Nearest ancestor of the current directory containing `.doclink`
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|dir| dir.join(SETTINGS_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Write a default settings file under `<dir>/.doclink/`
    pub fn init_config_file(dir: &Path, force: bool) -> std::io::Result<PathBuf> {
        let config_dir = dir.join(SETTINGS_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join(SETTINGS_FILE);
        if config_path.exists() && !force {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                ),
            ));
        }

        let content = toml::to_string_pretty(&Settings::default())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(config_path)
    }
}
