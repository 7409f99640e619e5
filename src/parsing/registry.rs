//! Language registry: resolves files to parsers.
//!
//! Languages are compiled in but individually switchable through
//! settings, so "available" and "enabled" are separate questions. All
//! lookups go by file extension; nothing outside this module hardcodes
//! a language dispatch.

use std::sync::{Arc, LazyLock, Mutex};
use thiserror::Error;

use super::SourceParser;
use crate::Settings;
use crate::error::ExtractResult;

/// Identifier of a registered language, matching its settings.toml key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageId(&'static str);

impl LanguageId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("no language registered under '{0}' (run 'doclink languages' to see what this build supports)")]
    LanguageNotFound(LanguageId),

    #[error("language '{0}' is disabled; set languages.{0}.enabled = true in .doclink/settings.toml")]
    LanguageDisabled(LanguageId),

    #[error("could not build the {language} parser: {reason}")]
    ParserCreationFailed {
        language: LanguageId,
        reason: String,
    },
}

/// One registered language: identity, extensions, and parser factory
pub trait LanguageDefinition: Send + Sync {
    fn id(&self) -> LanguageId;

    /// Display name, e.g. "Java"
    fn name(&self) -> &'static str;

    /// Claimed file extensions, without the leading dot
    fn extensions(&self) -> &'static [&'static str];

    fn create_parser(&self, settings: &Settings) -> ExtractResult<Box<dyn SourceParser>>;

    fn default_enabled(&self) -> bool {
        true
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        match settings.languages.get(self.id().as_str()) {
            Some(config) => config.enabled,
            None => self.default_enabled(),
        }
    }
}

/// The set of compiled-in languages. Three entries, so lookups are
/// linear scans rather than maps.
pub struct LanguageRegistry {
    languages: Vec<Arc<dyn LanguageDefinition>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
        }
    }

    pub fn register(&mut self, definition: Arc<dyn LanguageDefinition>) {
        self.languages.push(definition);
    }

    #[must_use]
    pub fn get(&self, id: LanguageId) -> Option<&dyn LanguageDefinition> {
        self.languages
            .iter()
            .find(|def| def.id() == id)
            .map(Arc::as_ref)
    }

    /// Resolve a file extension to its language; a leading dot is tolerated
    #[must_use]
    pub fn get_by_extension(&self, extension: &str) -> Option<&dyn LanguageDefinition> {
        let ext = extension.strip_prefix('.').unwrap_or(extension);
        self.languages
            .iter()
            .find(|def| def.extensions().contains(&ext))
            .map(Arc::as_ref)
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &dyn LanguageDefinition> {
        self.languages.iter().map(Arc::as_ref)
    }

    pub fn iter_enabled<'a>(
        &'a self,
        settings: &'a Settings,
    ) -> impl Iterator<Item = &'a dyn LanguageDefinition> {
        self.iter_all().filter(|def| def.is_enabled(settings))
    }

    #[must_use]
    pub fn is_available(&self, id: LanguageId) -> bool {
        self.get(id).is_some()
    }

    /// Build a parser, refusing when the language is unknown or disabled
    pub fn create_parser(
        &self,
        id: LanguageId,
        settings: &Settings,
    ) -> Result<Box<dyn SourceParser>, RegistryError> {
        let def = self.get(id).ok_or(RegistryError::LanguageNotFound(id))?;
        if !def.is_enabled(settings) {
            return Err(RegistryError::LanguageDisabled(id));
        }

        def.create_parser(settings)
            .map_err(|e| RegistryError::ParserCreationFailed {
                language: id,
                reason: e.to_string(),
            })
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: LazyLock<Mutex<LanguageRegistry>> = LazyLock::new(|| {
    let mut registry = LanguageRegistry::new();
    super::java::register(&mut registry);
    super::go::register(&mut registry);
    super::python::register(&mut registry);
    Mutex::new(registry)
});

/// The process-wide registry with every compiled-in language
pub fn get_registry() -> &'static Mutex<LanguageRegistry> {
    &REGISTRY
}
