//! Converts Swagger definitions to MongoDB `$jsonSchema` validators

use super::fields::FieldHandler;
use super::types::definitions_of;
use crate::type_mapper::{describe, BsonTypeMapper};
use gc_validator_gen_common::{
    AdditionalProperties, GeneratorError, Result, ValidatorDocument, ValidatorSchema,
};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, trace};

static DEFINITION_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#/definitions/([A-Za-z0-9_]+)$").expect("definition URI pattern is valid")
});

/// Generate the validator for one definition of a spec document
///
/// References are inlined. A reference that leads back to a definition
/// already being expanded is replaced by a permissive
/// `{bsonType: "object", additionalProperties: true}` node.
///
/// # Example
/// ```
/// use gc_validator_gen_parser::generate_validator;
/// use serde_json::json;
///
/// let spec = json!({
///     "definitions": {
///         "Queue": {
///             "type": "object",
///             "properties": {
///                 "id": { "type": "string" },
///                 "memberCount": { "type": "integer" }
///             }
///         }
///     }
/// });
///
/// let validator = generate_validator(&spec, "Queue").unwrap();
/// assert_eq!(
///     validator.to_value().unwrap(),
///     json!({
///         "$jsonSchema": {
///             "bsonType": "object",
///             "properties": {
///                 "id": { "bsonType": "string" },
///                 "memberCount": { "bsonType": "long" }
///             }
///         }
///     })
/// );
/// ```
pub fn generate_validator(spec: &Value, definition_name: &str) -> Result<ValidatorDocument> {
    let definitions = definitions_of(spec)?;
    convert_definition(definitions, definition_name)
}

/// Same as [`generate_validator`], for a definition name that comes from
/// untyped JSON input
pub fn generate_validator_for(spec: &Value, definition_name: &Value) -> Result<ValidatorDocument> {
    let definitions = definitions_of(spec)?;
    let name = definition_name
        .as_str()
        .ok_or(GeneratorError::DefinitionNameTypeInvalid)?;
    convert_definition(definitions, name)
}

pub(crate) fn convert_definition(
    definitions: &Map<String, Value>,
    definition_name: &str,
) -> Result<ValidatorDocument> {
    let root = definitions
        .get(definition_name)
        .ok_or_else(|| GeneratorError::DefinitionNotFound(definition_name.to_string()))?;

    let mut resolver = DefinitionResolver::new(definitions);
    let json_schema = resolver.resolve(root)?;
    debug_assert!(resolver.stack.is_empty());

    Ok(ValidatorDocument::new(json_schema))
}

/// Identity of a definition node within the borrowed spec document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

impl NodeId {
    fn of(node: &Value) -> Self {
        NodeId(node as *const Value as usize)
    }
}

/// Recursive definition walker, one per conversion
struct DefinitionResolver<'a> {
    definitions: &'a Map<String, Value>,
    /// Nodes on the current expansion path
    stack: Vec<NodeId>,
}

impl<'a> DefinitionResolver<'a> {
    fn new(definitions: &'a Map<String, Value>) -> Self {
        Self {
            definitions,
            stack: Vec::new(),
        }
    }

    fn resolve(&mut self, node: &'a Value) -> Result<ValidatorSchema> {
        let definition = node
            .as_object()
            .ok_or(GeneratorError::DefinitionTypeInvalid)?;

        let id = NodeId::of(node);
        if self.stack.contains(&id) {
            debug!(depth = self.stack.len(), "breaking definition reference cycle");
            return Ok(ValidatorSchema::permissive());
        }

        self.stack.push(id);
        let resolved = self.resolve_fields(definition);
        self.stack.pop();

        resolved
    }

    fn resolve_fields(&mut self, definition: &'a Map<String, Value>) -> Result<ValidatorSchema> {
        let mut schema = ValidatorSchema::default();

        for (key, value) in definition {
            let handler = FieldHandler::for_key(key)
                .ok_or_else(|| GeneratorError::DefinitionPropertyInvalid(key.clone()))?;

            match handler {
                FieldHandler::Ignore => {}
                FieldHandler::Passthrough => {
                    schema.constraints.insert(key.clone(), value.clone());
                }
                FieldHandler::Type => {
                    schema.bson_type = Some(BsonTypeMapper::map_definition(definition)?);
                }
                FieldHandler::Properties => {
                    schema.properties = Some(self.resolve_properties(value)?);
                }
                FieldHandler::Items => {
                    schema.items = Some(Box::new(self.resolve(value)?));
                }
                FieldHandler::AdditionalProperties => {
                    schema.additional_properties = Some(self.resolve_additional(value)?);
                }
                FieldHandler::Reference => {
                    let target = self.lookup_reference(value)?;
                    let referenced = self.resolve(target)?;
                    schema.merge(referenced);
                }
            }
        }

        Ok(schema)
    }

    fn resolve_properties(
        &mut self,
        properties: &'a Value,
    ) -> Result<IndexMap<String, ValidatorSchema>> {
        let properties = properties
            .as_object()
            .ok_or(GeneratorError::DefinitionTypeInvalid)?;

        let mut resolved = IndexMap::with_capacity(properties.len());
        for (name, property) in properties {
            resolved.insert(name.clone(), self.resolve(property)?);
        }
        Ok(resolved)
    }

    fn resolve_additional(&mut self, value: &'a Value) -> Result<AdditionalProperties> {
        match value {
            Value::Bool(allowed) => Ok(AdditionalProperties::Allowed(*allowed)),
            Value::Object(_) => Ok(AdditionalProperties::Schema(Box::new(self.resolve(value)?))),
            _ => Err(GeneratorError::AdditionalPropertiesTypeInvalid),
        }
    }

    fn lookup_reference(&self, reference: &Value) -> Result<&'a Value> {
        let uri = reference
            .as_str()
            .ok_or_else(|| GeneratorError::DefinitionUriInvalid(describe(reference)))?;

        let name = DEFINITION_URI
            .captures(uri)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| GeneratorError::DefinitionUriInvalid(uri.to_string()))?;

        trace!(reference = uri, "inlining definition");

        self.definitions
            .get(name)
            .ok_or_else(|| GeneratorError::DefinitionNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_validator_gen_common::StorageType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn convert(spec: &Value, name: &str) -> Value {
        generate_validator(spec, name).unwrap().to_value().unwrap()
    }

    #[test]
    fn test_identity_types() {
        for data_type in ["object", "array", "string"] {
            let spec = json!({ "definitions": { "Node": { "type": data_type } } });
            assert_eq!(
                convert(&spec, "Node"),
                json!({ "$jsonSchema": { "bsonType": data_type } })
            );
        }
    }

    #[test]
    fn test_passthrough_and_ignored_fields() {
        let spec = json!({
            "definitions": {
                "Page": {
                    "type": "object",
                    "description": "A page",
                    "required": ["pageSize"],
                    "readOnly": true,
                    "position": 3,
                    "example": { "pageSize": 25 },
                    "x-genesys-entity-type": "page",
                    "x-genesys-search-fields": { "fields": [] },
                    "properties": {
                        "pageSize": {
                            "type": "integer",
                            "format": "int32",
                            "minimum": 1,
                            "maximum": 500
                        },
                        "state": {
                            "type": "string",
                            "enum": ["active", "inactive"],
                            "minLength": 1,
                            "maxLength": 20,
                            "pattern": "^[a-z]+$"
                        },
                        "tags": {
                            "type": "array",
                            "minItems": 0,
                            "maxItems": 10,
                            "uniqueItems": true,
                            "items": { "type": "string" }
                        }
                    }
                }
            }
        });

        assert_eq!(
            convert(&spec, "Page"),
            json!({
                "$jsonSchema": {
                    "bsonType": "object",
                    "description": "A page",
                    "required": ["pageSize"],
                    "properties": {
                        "pageSize": { "bsonType": "int", "minimum": 1, "maximum": 500 },
                        "state": {
                            "bsonType": "string",
                            "enum": ["active", "inactive"],
                            "minLength": 1,
                            "maxLength": 20,
                            "pattern": "^[a-z]+$"
                        },
                        "tags": {
                            "bsonType": "array",
                            "minItems": 0,
                            "maxItems": 10,
                            "uniqueItems": true,
                            "items": { "bsonType": "string" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_self_reference_is_cut() {
        let spec = json!({
            "definitions": {
                "A": {
                    "type": "object",
                    "properties": { "self": { "$ref": "#/definitions/A" } }
                }
            }
        });

        let validator = generate_validator(&spec, "A").unwrap();
        assert_eq!(
            validator.json_schema.property("self"),
            Some(&ValidatorSchema::permissive())
        );
    }

    #[test]
    fn test_mutual_reference_is_cut() {
        let spec = json!({
            "definitions": {
                "Parent": {
                    "type": "object",
                    "properties": { "child": { "$ref": "#/definitions/Child" } }
                },
                "Child": {
                    "type": "object",
                    "properties": { "parent": { "$ref": "#/definitions/Parent" } }
                }
            }
        });

        assert_eq!(
            convert(&spec, "Parent"),
            json!({
                "$jsonSchema": {
                    "bsonType": "object",
                    "properties": {
                        "child": {
                            "bsonType": "object",
                            "properties": {
                                "parent": { "bsonType": "object", "additionalProperties": true }
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_repeated_reference_is_not_a_cycle() {
        let spec = json!({
            "definitions": {
                "Entity": {
                    "type": "object",
                    "properties": { "id": { "type": "string" } }
                },
                "Pair": {
                    "type": "object",
                    "properties": {
                        "left": { "$ref": "#/definitions/Entity" },
                        "right": { "$ref": "#/definitions/Entity" }
                    }
                }
            }
        });

        let validator = generate_validator(&spec, "Pair").unwrap();
        let expected = generate_validator(&spec, "Entity").unwrap().json_schema;
        assert_eq!(validator.json_schema.property("left"), Some(&expected));
        assert_eq!(validator.json_schema.property("right"), Some(&expected));
    }

    #[test]
    fn test_structural_twins_are_distinct_nodes() {
        // D1 and D2 are equal as JSON but are different nodes
        let spec = json!({
            "definitions": {
                "D1": {
                    "type": "object",
                    "properties": { "n": { "$ref": "#/definitions/D2" } }
                },
                "D2": {
                    "type": "object",
                    "properties": { "n": { "$ref": "#/definitions/D2" } }
                }
            }
        });

        assert_eq!(
            convert(&spec, "D1"),
            json!({
                "$jsonSchema": {
                    "bsonType": "object",
                    "properties": {
                        "n": {
                            "bsonType": "object",
                            "properties": {
                                "n": { "bsonType": "object", "additionalProperties": true }
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_additional_properties() {
        let spec = json!({
            "definitions": {
                "Labels": {
                    "type": "object",
                    "additionalProperties": { "type": "string", "format": "date-time" }
                },
                "Open": { "type": "object", "additionalProperties": false }
            }
        });

        assert_eq!(
            convert(&spec, "Labels"),
            json!({
                "$jsonSchema": {
                    "bsonType": "object",
                    "additionalProperties": { "bsonType": "date" }
                }
            })
        );
        assert_eq!(
            convert(&spec, "Open"),
            json!({ "$jsonSchema": { "bsonType": "object", "additionalProperties": false } })
        );

        let bad = json!({
            "definitions": { "Bad": { "type": "object", "additionalProperties": "yes" } }
        });
        assert!(matches!(
            generate_validator(&bad, "Bad"),
            Err(GeneratorError::AdditionalPropertiesTypeInvalid)
        ));
    }

    #[test]
    fn test_reference_siblings_are_merged() {
        let spec = json!({
            "definitions": {
                "Division": { "type": "object", "description": "A division" },
                "Holder": {
                    "type": "object",
                    "properties": {
                        "division": {
                            "description": "Owning division",
                            "$ref": "#/definitions/Division"
                        }
                    }
                }
            }
        });

        let validator = generate_validator(&spec, "Holder").unwrap();
        let division = validator.json_schema.property("division").unwrap();
        assert_eq!(division.bson_type, Some(StorageType::Object.into()));
        assert_eq!(division.constraints["description"], json!("A division"));
    }

    #[test]
    fn test_dialect_faults() {
        let spec = json!({
            "definitions": {
                "UnknownField": { "type": "object", "discriminator": "kind" },
                "BadUri": { "$ref": "#/components/schemas/Queue" },
                "BadUriName": { "$ref": "#/definitions/Queue-Ref" },
                "NumericRef": { "$ref": 42 },
                "MissingTarget": { "$ref": "#/definitions/Nowhere" },
                "NotAnObject": { "type": "object", "properties": { "id": "string" } },
                "BadProperties": { "type": "object", "properties": ["id"] }
            }
        });

        assert!(matches!(
            generate_validator(&spec, "UnknownField"),
            Err(GeneratorError::DefinitionPropertyInvalid(k)) if k == "discriminator"
        ));
        assert!(matches!(
            generate_validator(&spec, "BadUri"),
            Err(GeneratorError::DefinitionUriInvalid(u)) if u == "#/components/schemas/Queue"
        ));
        assert!(matches!(
            generate_validator(&spec, "BadUriName"),
            Err(GeneratorError::DefinitionUriInvalid(_))
        ));
        assert!(matches!(
            generate_validator(&spec, "NumericRef"),
            Err(GeneratorError::DefinitionUriInvalid(u)) if u == "42"
        ));
        assert!(matches!(
            generate_validator(&spec, "MissingTarget"),
            Err(GeneratorError::DefinitionNotFound(n)) if n == "Nowhere"
        ));
        assert!(matches!(
            generate_validator(&spec, "NotAnObject"),
            Err(GeneratorError::DefinitionTypeInvalid)
        ));
        assert!(matches!(
            generate_validator(&spec, "BadProperties"),
            Err(GeneratorError::DefinitionTypeInvalid)
        ));
    }

    #[test]
    fn test_input_shape_faults() {
        assert!(matches!(
            generate_validator(&json!("swagger"), "Queue"),
            Err(GeneratorError::SpecTypeInvalid)
        ));
        assert!(matches!(
            generate_validator(&json!({ "paths": {} }), "Queue"),
            Err(GeneratorError::SpecMissingDefinitions)
        ));

        let spec = json!({ "definitions": { "Queue": { "type": "object" } } });
        assert!(matches!(
            generate_validator(&spec, "NoDefinition"),
            Err(GeneratorError::DefinitionNotFound(n)) if n == "NoDefinition"
        ));
        for name in [json!(1234), json!(true), json!(["Queue"]), json!({ "definition": "Queue" })] {
            assert!(matches!(
                generate_validator_for(&spec, &name),
                Err(GeneratorError::DefinitionNameTypeInvalid)
            ));
        }
        assert!(generate_validator_for(&spec, &json!("Queue")).is_ok());
    }

    #[test]
    fn test_root_must_be_object() {
        let spec = json!({ "definitions": { "Broken": "object" } });
        assert!(matches!(
            generate_validator(&spec, "Broken"),
            Err(GeneratorError::DefinitionTypeInvalid)
        ));
    }
}
