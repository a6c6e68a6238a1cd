use indexmap::IndexMap;
use serde::Serialize;

use super::schema::Schema;
use crate::parse::operation::CodeSample;
use crate::parse::security::SecurityRequirement;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Parse the lowercase key used in a path item.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "get" => HttpMethod::Get,
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "delete" => HttpMethod::Delete,
            "patch" => HttpMethod::Patch,
            "options" => HttpMethod::Options,
            "head" => HttpMethod::Head,
            "trace" => HttpMethod::Trace,
            _ => return None,
        })
    }
}

/// One HTTP method bound to one path template.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    /// The declared `operationId`, or one derived from method and path.
    pub id: String,
    /// Whether `id` was derived rather than declared.
    pub derived_id: bool,
    /// URL-safe anchor for documentation pages.
    pub slug: String,
    pub method: HttpMethod,
    pub path: String,
    /// JSON Pointer of the operation in the source document.
    pub location: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: IndexMap<String, Response>,
    pub deprecated: bool,
    pub security: Option<Vec<SecurityRequirement>>,
    pub code_samples: Vec<CodeSample>,
}

impl Operation {
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A resolved path/query/header/cookie parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub deprecated: bool,
    pub description: Option<String>,
    pub schema: Option<Schema>,
    pub example: Option<serde_json::Value>,
}

/// Schema and examples for one media type.
#[derive(Debug, Clone, Serialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
    pub example: Option<serde_json::Value>,
    pub examples: IndexMap<String, serde_json::Value>,
}

/// A resolved request body.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: IndexMap<String, MediaType>,
}

/// A resolved response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub description: String,
    pub content: IndexMap<String, MediaType>,
    pub headers: IndexMap<String, Header>,
}

/// A resolved response header.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub schema: Option<Schema>,
    pub example: Option<serde_json::Value>,
}

impl Response {
    /// The `application/json` schema, falling back to the first media type.
    pub fn primary_schema(&self) -> Option<&Schema> {
        self.content
            .get("application/json")
            .or_else(|| self.content.first().map(|(_, mt)| mt))
            .and_then(|mt| mt.schema.as_ref())
    }
}
