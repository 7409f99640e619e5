//! Supported languages and extension detection.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source languages this build can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Java,
    Go,
    Python,
}

/// (language, display name, settings key, extensions)
const TABLE: &[(Language, &str, &str, &[&str])] = &[
    (Language::Java, "Java", "java", &["java"]),
    (Language::Go, "Go", "go", &["go"]),
    (Language::Python, "Python", "python", &["py", "pyi"]),
];

impl Language {
    fn row(&self) -> &'static (Language, &'static str, &'static str, &'static [&'static str]) {
        TABLE
            .iter()
            .find(|(lang, ..)| lang == self)
            .expect("every variant has a table row")
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        TABLE
            .iter()
            .find(|(_, _, _, exts)| exts.contains(&ext.as_str()))
            .map(|(lang, ..)| *lang)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.row().3
    }

    /// Key under `[languages.*]` in settings.toml
    pub fn config_key(&self) -> &'static str {
        self.row().2
    }

    pub fn name(&self) -> &'static str {
        self.row().1
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
