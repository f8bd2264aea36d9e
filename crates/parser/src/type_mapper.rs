//! Type mapping from Swagger data types to BSON storage types
//!
//! Maps a definition's `type`/`format` pair to the `bsonType` MongoDB
//! validates against. Both tables are closed: anything not listed is an error.

use gc_validator_gen_common::{BsonType, GeneratorError, Result, StorageType};
use serde_json::{Map, Value};

/// Maps Swagger `type`/`format` values to [`BsonType`]
pub struct BsonTypeMapper;

impl BsonTypeMapper {
    /// Map a Swagger `format` value to its storage type
    ///
    /// # Examples
    /// ```
    /// use gc_validator_gen_parser::BsonTypeMapper;
    /// use gc_validator_gen_common::StorageType;
    ///
    /// assert_eq!(BsonTypeMapper::map_format("date-time"), Some(StorageType::Date));
    /// assert_eq!(BsonTypeMapper::map_format("int32"), Some(StorageType::Int));
    /// assert_eq!(BsonTypeMapper::map_format("byte"), None);
    /// ```
    pub fn map_format(format: &str) -> Option<StorageType> {
        match format {
            "date-time" | "local-date-time" => Some(StorageType::Date),
            "date" | "local-time" | "uri" | "url" => Some(StorageType::String),
            "float" | "double" => Some(StorageType::Double),
            "int32" => Some(StorageType::Int),
            "int64" => Some(StorageType::Long),
            _ => None,
        }
    }

    /// Map a Swagger `type` value to its storage type
    ///
    /// # Examples
    /// ```
    /// use gc_validator_gen_parser::BsonTypeMapper;
    /// use gc_validator_gen_common::StorageType;
    ///
    /// assert_eq!(BsonTypeMapper::map_type("integer"), Some(StorageType::Long));
    /// assert_eq!(BsonTypeMapper::map_type("boolean"), Some(StorageType::Bool));
    /// assert_eq!(BsonTypeMapper::map_type("file"), None);
    /// ```
    pub fn map_type(data_type: &str) -> Option<StorageType> {
        match data_type {
            "object" => Some(StorageType::Object),
            "array" => Some(StorageType::Array),
            "string" => Some(StorageType::String),
            "number" => Some(StorageType::Double),
            "integer" => Some(StorageType::Long),
            "boolean" => Some(StorageType::Bool),
            _ => None,
        }
    }

    /// Compute the `bsonType` of a definition node that carries `type`
    ///
    /// `format` takes precedence over `type`. When `allowEmptyValue` is
    /// present, whatever its value, `null` is accepted as well.
    pub fn map_definition(definition: &Map<String, Value>) -> Result<BsonType> {
        let storage = match definition.get("format") {
            Some(format) => format
                .as_str()
                .and_then(Self::map_format)
                .ok_or_else(|| GeneratorError::FormatValueInvalid(describe(format)))?,
            None => {
                let data_type = definition.get("type").unwrap_or(&Value::Null);
                data_type
                    .as_str()
                    .and_then(Self::map_type)
                    .ok_or_else(|| GeneratorError::TypePropertyInvalid(describe(data_type)))?
            }
        };

        if definition.contains_key("allowEmptyValue") {
            Ok(BsonType::nullable(storage))
        } else {
            Ok(BsonType::Single(storage))
        }
    }
}

/// Render an offending value for an error message
///
/// Strings are reported bare, anything else as JSON.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
