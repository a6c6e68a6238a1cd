pub mod components;
pub mod operation;
pub mod pointer;
pub mod ref_resolve;
pub mod schema;
pub mod security;
pub mod spec;
pub mod visit;

use crate::error::ParseError;
use spec::OpenApiDocument;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiDocument, ParseError> {
    let spec: OpenApiDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiDocument, ParseError> {
    let spec: OpenApiDocument = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Convert an already-deserialized JSON value into an OpenAPI document.
pub fn from_value(value: serde_json::Value) -> Result<OpenApiDocument, ParseError> {
    let spec: OpenApiDocument = serde_json::from_value(value)?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &OpenApiDocument) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}
