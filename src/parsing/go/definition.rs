//! Go language definition and registration

use crate::Settings;
use crate::error::ExtractResult;
use crate::parsing::{LanguageDefinition, LanguageId, LanguageRegistry, SourceParser};
use std::sync::Arc;

use super::GoParser;

/// Go language definition
pub struct GoLanguage;

impl LanguageDefinition for GoLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::new("go")
    }

    fn name(&self) -> &'static str {
        "Go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn create_parser(&self, _settings: &Settings) -> ExtractResult<Box<dyn SourceParser>> {
        let parser = GoParser::new()?;
        Ok(Box::new(parser))
    }
}

/// Register Go with the registry
pub(crate) fn register(registry: &mut LanguageRegistry) {
    registry.register(Arc::new(GoLanguage));
}
