//! Python language definition and registration

use crate::Settings;
use crate::error::ExtractResult;
use crate::parsing::{LanguageDefinition, LanguageId, LanguageRegistry, SourceParser};
use std::sync::Arc;

use super::PythonParser;

/// Python language definition
pub struct PythonLanguage;

impl LanguageDefinition for PythonLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::new("python")
    }

    fn name(&self) -> &'static str {
        "Python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyi"]
    }

    fn create_parser(&self, _settings: &Settings) -> ExtractResult<Box<dyn SourceParser>> {
        let parser = PythonParser::new()?;
        Ok(Box::new(parser))
    }
}

/// Register Python with the registry
pub(crate) fn register(registry: &mut LanguageRegistry) {
    registry.register(Arc::new(PythonLanguage));
}
