//! Swagger 2.0 definition parser
//!
//! Converts definitions from the Genesys Cloud platform API spec (Swagger 2.0)
//! into MongoDB `$jsonSchema` validators.
//!
//! ## Spec Sources
//! - From the cloud: `https://api.<region domain>/api/v2/docs/swagger`
//! - From disk: a previously saved `publicapi-v2-latest.json`
//!
//! ## Usage
//! ```rust,ignore
//! use gc_validator_gen_parser::swagger::SwaggerParser;
//!
//! let parser = SwaggerParser::from_file("publicapi-v2-latest.json")?;
//! let validator = parser.convert("Queue")?;
//! ```

mod converter;
mod fields;
mod parser;
mod types;

pub use converter::{generate_validator, generate_validator_for};
pub use fields::FieldHandler;
pub use parser::SwaggerParser;
pub use types::SwaggerSpec;
