//! Load an OpenAPI 3.x description, resolve its references, normalize its
//! schemas and expose a read-only document model for documentation tools.

pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod transform;
pub mod validate;

pub use model::{DocumentModel, DocumentStore};
pub use transform::{Build, BuildOptions, build, build_with_options};
pub use validate::{IssueKind, ValidationIssue, validate};
