use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unresolved reference `{pointer}` at {location}")]
    Unresolved { pointer: String, location: String },

    #[error("circular reference: {}", chain.join(" -> "))]
    Circular { chain: Vec<String> },

    #[error("invalid reference format `{pointer}` at {location}")]
    InvalidRefFormat { pointer: String, location: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("conflicting definitions of `{subject}` at {location}: {first} vs {second}")]
    SchemaConflict {
        location: String,
        subject: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// A fatal problem that aborts building a document model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("conflicting definitions of `{subject}` at {location}: {first} vs {second}")]
    SchemaConflict {
        location: String,
        subject: String,
        first: String,
        second: String,
    },

    #[error("duplicate operationId `{operation_id}` at {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: String,
        second: String,
    },
}

impl From<NormalizeError> for BuildError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Resolve(e) => BuildError::Resolve(e),
            NormalizeError::SchemaConflict {
                location,
                subject,
                first,
                second,
            } => BuildError::SchemaConflict {
                location,
                subject,
                first,
                second,
            },
        }
    }
}

/// What kind of entity a query was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Operation,
    Schema,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Operation => f.write_str("operation"),
            EntityKind::Schema => f.write_str("schema"),
        }
    }
}

/// A query against a built model missed. This is an expected outcome
/// (stale links, typos), not a failure of the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
