//! MongoDB `$jsonSchema` validator representation
//!
//! The output side of the conversion. Only the keywords the converter
//! interprets get dedicated fields; constraint keywords that are copied
//! verbatim from the source definition live in [`ValidatorSchema::constraints`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// BSON storage type token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Object,
    Array,
    String,
    Double,
    Long,
    Int,
    Bool,
    Date,
    Null,
}

impl StorageType {
    /// The alias MongoDB uses for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Object => "object",
            StorageType::Array => "array",
            StorageType::String => "string",
            StorageType::Double => "double",
            StorageType::Long => "long",
            StorageType::Int => "int",
            StorageType::Bool => "bool",
            StorageType::Date => "date",
            StorageType::Null => "null",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `bsonType` keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BsonType {
    Single(StorageType),
    Multiple(Vec<StorageType>),
}

impl BsonType {
    /// `[storage, "null"]`
    pub fn nullable(storage: StorageType) -> Self {
        BsonType::Multiple(vec![storage, StorageType::Null])
    }
}

impl From<StorageType> for BsonType {
    fn from(storage: StorageType) -> Self {
        BsonType::Single(storage)
    }
}

/// Value of the `additionalProperties` keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<ValidatorSchema>),
}

/// One node of a validator tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bson_type: Option<BsonType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ValidatorSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ValidatorSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    /// Pass-through keywords (`minimum`, `enum`, `required`, `description`, ...)
    #[serde(flatten)]
    pub constraints: Map<String, Value>,
}

impl ValidatorSchema {
    /// Placeholder substituted where a reference cycle is cut
    ///
    /// Accepts any embedded document at that point.
    pub fn permissive() -> Self {
        Self {
            bson_type: Some(BsonType::Single(StorageType::Object)),
            additional_properties: Some(AdditionalProperties::Allowed(true)),
            ..Self::default()
        }
    }

    /// Copy every keyword set on `other` into `self`, replacing existing ones
    pub fn merge(&mut self, other: ValidatorSchema) {
        if other.bson_type.is_some() {
            self.bson_type = other.bson_type;
        }
        if other.properties.is_some() {
            self.properties = other.properties;
        }
        if other.items.is_some() {
            self.items = other.items;
        }
        if other.additional_properties.is_some() {
            self.additional_properties = other.additional_properties;
        }
        self.constraints.extend(other.constraints);
    }

    /// Look up a resolved property by name
    pub fn property(&self, name: &str) -> Option<&ValidatorSchema> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }
}

/// Top-level validator, ready to be passed as a collection `validator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorDocument {
    #[serde(rename = "$jsonSchema")]
    pub json_schema: ValidatorSchema,
}

impl ValidatorDocument {
    pub fn new(json_schema: ValidatorSchema) -> Self {
        Self { json_schema }
    }

    /// Render as a `serde_json::Value`
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
