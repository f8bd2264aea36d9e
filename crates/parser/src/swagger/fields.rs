//! Definition keyword table
//!
//! Every keyword a Genesys Cloud definition node may carry, and what the
//! converter does with it. Keywords not listed here are rejected.

/// What the converter does with a definition keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHandler {
    /// Dropped from the validator
    Ignore,
    /// Copied to the validator unchanged
    Passthrough,
    /// `type`, mapped to `bsonType` together with `format` and `allowEmptyValue`
    Type,
    /// `properties`, each value resolved recursively
    Properties,
    /// `items`, resolved recursively
    Items,
    /// `additionalProperties`, a boolean or a nested definition
    AdditionalProperties,
    /// `$ref`, inlined from `#/definitions/<name>`
    Reference,
}

const FIELD_TABLE: &[(&str, FieldHandler)] = &[
    ("type", FieldHandler::Type),
    // consumed by the `type` handler
    ("format", FieldHandler::Ignore),
    ("allowEmptyValue", FieldHandler::Ignore),
    ("properties", FieldHandler::Properties),
    ("items", FieldHandler::Items),
    ("additionalProperties", FieldHandler::AdditionalProperties),
    ("$ref", FieldHandler::Reference),
    ("minimum", FieldHandler::Passthrough),
    ("maximum", FieldHandler::Passthrough),
    ("minItems", FieldHandler::Passthrough),
    ("maxItems", FieldHandler::Passthrough),
    ("minLength", FieldHandler::Passthrough),
    ("maxLength", FieldHandler::Passthrough),
    ("pattern", FieldHandler::Passthrough),
    ("required", FieldHandler::Passthrough),
    ("uniqueItems", FieldHandler::Passthrough),
    ("enum", FieldHandler::Passthrough),
    ("description", FieldHandler::Passthrough),
    ("readOnly", FieldHandler::Ignore),
    ("position", FieldHandler::Ignore),
    ("example", FieldHandler::Ignore),
    ("x-genesys-entity-type", FieldHandler::Ignore),
    ("x-genesys-search-fields", FieldHandler::Ignore),
];

impl FieldHandler {
    /// Handler for a definition keyword, `None` if the keyword is unsupported
    pub fn for_key(key: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, handler)| *handler)
    }

    /// All supported keywords
    pub fn known_keys() -> impl Iterator<Item = &'static str> {
        FIELD_TABLE.iter().map(|(name, _)| *name)
    }
}
