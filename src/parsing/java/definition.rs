//! Java language definition and registration

use crate::Settings;
use crate::error::ExtractResult;
use crate::parsing::{LanguageDefinition, LanguageId, LanguageRegistry, SourceParser};
use std::sync::Arc;

use super::JavaParser;

/// Java language definition
pub struct JavaLanguage;

impl LanguageDefinition for JavaLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::new("java")
    }

    fn name(&self) -> &'static str {
        "Java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn create_parser(&self, _settings: &Settings) -> ExtractResult<Box<dyn SourceParser>> {
        let parser = JavaParser::new()?;
        Ok(Box::new(parser))
    }
}

/// Register Java with the registry
pub(crate) fn register(registry: &mut LanguageRegistry) {
    registry.register(Arc::new(JavaLanguage));
}
