//! Swagger spec file parser

use super::converter::convert_definition;
use super::types::SwaggerSpec;
use gc_validator_gen_common::{GeneratorError, Result, ValidatorDocument};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Swagger specification parser
///
/// Reads a Genesys Cloud platform API spec and converts its definitions to
/// MongoDB validators.
#[derive(Debug)]
pub struct SwaggerParser {
    /// Loaded Swagger spec
    spec: SwaggerSpec,
}

impl SwaggerParser {
    /// Load a Swagger spec from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SwaggerParser::from_file("publicapi-v2-latest.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a Swagger spec from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;

        Self::from_value(document)
    }

    /// Use an already parsed document, e.g. one fetched by the loader
    pub fn from_value(document: Value) -> Result<Self> {
        let spec = SwaggerSpec::from_value(document)?;
        debug!(
            definitions = spec.definitions().len(),
            "loaded Swagger specification"
        );
        Ok(Self { spec })
    }

    /// Convert one definition to a validator
    pub fn convert(&self, definition_name: &str) -> Result<ValidatorDocument> {
        convert_definition(self.spec.definitions(), definition_name)
    }

    /// Convert a definition whose name comes from untyped JSON input
    pub fn convert_value_name(&self, definition_name: &Value) -> Result<ValidatorDocument> {
        let name = definition_name
            .as_str()
            .ok_or(GeneratorError::DefinitionNameTypeInvalid)?;
        self.convert(name)
    }

    /// Convert every definition, in document order
    ///
    /// A failing definition does not stop the others.
    pub fn convert_all(&self) -> Vec<(String, Result<ValidatorDocument>)> {
        self.spec
            .definition_names()
            .map(|name| {
                let result = self.convert(name);
                if let Err(ref e) = result {
                    warn!(definition = name, error = %e, "definition could not be converted");
                }
                (name.to_string(), result)
            })
            .collect()
    }

    /// Definition names in document order
    pub fn definition_names(&self) -> Vec<&str> {
        self.spec.definition_names().collect()
    }

    /// Get reference to the underlying spec
    pub fn spec(&self) -> &SwaggerSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_validator_gen_common::ErrorKind;

    #[test]
    fn test_parse_minimal_swagger() {
        let swagger_json = r##"{
            "swagger": "2.0",
            "info": { "title": "PureCloud Platform API", "version": "v2" },
            "paths": {},
            "definitions": {
                "Queue": {
                    "type": "object",
                    "properties": { "id": { "type": "string" } }
                }
            }
        }"##;

        let parser = SwaggerParser::from_json(swagger_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.spec.swagger_version(), Some("2.0"));
        assert_eq!(parser.definition_names(), vec!["Queue"]);
        assert!(parser.convert("Queue").is_ok());
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = SwaggerParser::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GeneratorError::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_convert_all_reports_each_definition() {
        let parser = SwaggerParser::from_json(
            r##"{
                "definitions": {
                    "Good": { "type": "string", "format": "uri" },
                    "Bad": { "type": "string", "format": "byte" }
                }
            }"##,
        )
        .unwrap();

        let results = parser.convert_all();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "Good");
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, "Bad");
        assert!(matches!(
            results[1].1,
            Err(GeneratorError::FormatValueInvalid(_))
        ));
    }
}
