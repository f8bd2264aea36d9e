//! Swagger document wrapper

use gc_validator_gen_common::{GeneratorError, Result};
use serde_json::{Map, Value};

/// A Swagger document known to carry a `definitions` object
///
/// The document is kept as raw JSON: definition nodes are interpreted by
/// the converter, which needs both the open-ended keyword set and stable
/// node addresses for cycle detection.
#[derive(Debug, Clone)]
pub struct SwaggerSpec {
    document: Value,
}

impl SwaggerSpec {
    /// Wrap a parsed document after checking its top-level shape
    pub fn from_value(document: Value) -> Result<Self> {
        definitions_of(&document)?;
        Ok(Self { document })
    }

    /// The `definitions` object
    pub fn definitions(&self) -> &Map<String, Value> {
        match self.document.get("definitions") {
            Some(Value::Object(definitions)) => definitions,
            _ => unreachable!("checked in SwaggerSpec::from_value"),
        }
    }

    /// Look up a definition node by name
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.definitions().get(name)
    }

    /// Definition names in document order
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.definitions().keys().map(String::as_str)
    }

    /// Swagger version string, if the document declares one
    pub fn swagger_version(&self) -> Option<&str> {
        self.document.get("swagger").and_then(Value::as_str)
    }
}

/// Check the top-level shape of a spec document and borrow its definitions
pub(crate) fn definitions_of(document: &Value) -> Result<&Map<String, Value>> {
    let root = document.as_object().ok_or(GeneratorError::SpecTypeInvalid)?;
    match root.get("definitions") {
        Some(Value::Object(definitions)) => Ok(definitions),
        _ => Err(GeneratorError::SpecMissingDefinitions),
    }
}
