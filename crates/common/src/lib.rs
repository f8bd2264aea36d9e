//! Common types and utilities for gc-validator-gen
//!
//! This crate contains the shared error type and the validator intermediate
//! representation used across the parser, loader, and CLI components.

mod validator;

pub use validator::{
    AdditionalProperties, BsonType, StorageType, ValidatorDocument, ValidatorSchema,
};

use thiserror::Error;

/// Errors that can occur while loading a spec or generating validators
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid Genesys Cloud platform API specification type, it must be an object")]
    SpecTypeInvalid,

    #[error("The Genesys Cloud platform API specification is missing the \"definitions\" property")]
    SpecMissingDefinitions,

    #[error("Invalid Genesys Cloud platform API definition name type, it must be a string")]
    DefinitionNameTypeInvalid,

    #[error("The definition \"{0}\" was not found in the Genesys Cloud platform API specification")]
    DefinitionNotFound(String),

    #[error("Invalid Genesys Cloud platform API definition type, it must be an object")]
    DefinitionTypeInvalid,

    #[error("The definition \"format\" property value \"{0}\" is not valid")]
    FormatValueInvalid(String),

    #[error("The definition \"type\" property value \"{0}\" is not valid")]
    TypePropertyInvalid(String),

    #[error("The definition property \"{0}\" is not valid")]
    DefinitionPropertyInvalid(String),

    #[error("The definition \"additionalProperties\" value must be an object or a boolean")]
    AdditionalPropertiesTypeInvalid,

    #[error("The URI \"{0}\" is not a valid definition URI")]
    DefinitionUriInvalid(String),

    #[error("The Genesys Cloud region \"{0}\" is not valid")]
    RegionInvalid(String),

    #[error("The timeout must be greater than zero")]
    TimeoutOutOfBounds,

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Genesys Cloud services error: {0}")]
    Protocol(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad category of a [`GeneratorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller handed over something that is not a spec or not a definition
    InputShape,
    /// The spec uses a construct outside the supported Swagger dialect
    Dialect,
    /// Invalid region or loader settings
    Configuration,
    /// The HTTP request itself failed
    Transport,
    /// The server answered, but not with a usable spec
    Protocol,
    /// Local file or JSON decoding failure
    Io,
}

impl GeneratorError {
    /// Classify this error
    ///
    /// A `$ref` pointing at a missing definition is still reported as
    /// [`GeneratorError::DefinitionNotFound`], which is grouped with the
    /// input-shape faults.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SpecTypeInvalid
            | Self::SpecMissingDefinitions
            | Self::DefinitionNameTypeInvalid
            | Self::DefinitionNotFound(_)
            | Self::DefinitionTypeInvalid => ErrorKind::InputShape,
            Self::FormatValueInvalid(_)
            | Self::TypePropertyInvalid(_)
            | Self::DefinitionPropertyInvalid(_)
            | Self::AdditionalPropertiesTypeInvalid
            | Self::DefinitionUriInvalid(_) => ErrorKind::Dialect,
            Self::RegionInvalid(_) | Self::TimeoutOutOfBounds => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Parse(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(GeneratorError::SpecTypeInvalid.kind(), ErrorKind::InputShape);
        assert_eq!(
            GeneratorError::DefinitionNotFound("Queue".to_string()).kind(),
            ErrorKind::InputShape
        );
        assert_eq!(
            GeneratorError::FormatValueInvalid("byte".to_string()).kind(),
            ErrorKind::Dialect
        );
        assert_eq!(
            GeneratorError::AdditionalPropertiesTypeInvalid.kind(),
            ErrorKind::Dialect
        );
        assert_eq!(
            GeneratorError::RegionInvalid("mars-1".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            GeneratorError::Protocol("status 500".to_string()).kind(),
            ErrorKind::Protocol
        );
    }

    #[test]
    fn test_error_messages_carry_payload() {
        let err = GeneratorError::DefinitionPropertyInvalid("discriminator".to_string());
        assert!(err.to_string().contains("\"discriminator\""));

        let err = GeneratorError::DefinitionNotFound("NoDefinition".to_string());
        assert!(err.to_string().contains("NoDefinition"));
    }
}
