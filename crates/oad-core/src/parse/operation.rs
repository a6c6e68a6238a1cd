use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::{ParameterOrRef, RequestBodyOrRef, ResponseOrRef};
use super::security::SecurityRequirement;

/// One entry under `paths`. Parameters here apply to every method below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub delete: Option<Operation>,
    pub patch: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Declared operations with their lowercase method, always in the order
    /// get, post, put, delete, patch, options, head, trace.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("post", &self.post),
            ("put", &self.put),
            ("delete", &self.delete),
            ("patch", &self.patch),
            ("options", &self.options),
            ("head", &self.head),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    pub request_body: Option<RequestBodyOrRef>,
    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,
    #[serde(default)]
    pub deprecated: bool,
    /// `None` inherits the document default; `Some(vec![])` opts out.
    pub security: Option<Vec<SecurityRequirement>>,
    #[serde(rename = "x-codeSamples", default)]
    pub code_samples: Vec<CodeSample>,
}

/// `x-codeSamples` entry shown next to an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSample {
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub source: String,
}
