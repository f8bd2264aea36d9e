//! Swagger parsing and validator generation
//!
//! This crate turns definitions from the Genesys Cloud platform API spec
//! into MongoDB `$jsonSchema` validators (`ValidatorDocument`).
//!
//! ## Conversion Strategy
//!
//! Each definition node is walked depth-first:
//! - `type` (with `format` and `allowEmptyValue`) becomes `bsonType`
//! - `properties`, `items` and `additionalProperties` are converted recursively
//! - `$ref: "#/definitions/<name>"` is inlined
//! - constraint keywords (`minimum`, `enum`, `required`, ...) are copied as-is
//!
//! A reference back to a definition that is already being expanded is cut
//! and replaced by `{bsonType: "object", additionalProperties: true}`.
//! Unknown keywords, types and formats are errors.

pub mod swagger;
mod type_mapper;

pub use swagger::{generate_validator, generate_validator_for, SwaggerParser, SwaggerSpec};
pub use type_mapper::BsonTypeMapper;
