//! Document checks that report every problem instead of stopping at the
//! first one.

mod checks;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse::spec::OpenApiDocument;

/// What went wrong. The fatal kinds are the ones that make a build fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    UnresolvedReference,
    CircularReference,
    SchemaConflict,
    DuplicateOperationId,
    MissingPathParameter,
    UndeclaredPathParameter,
    OptionalPathParameter,
    DuplicateParameter,
    NonExhaustiveDiscriminator,
    MissingOperationId,
    MissingDescription,
    UnknownTag,
}

impl IssueKind {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IssueKind::UnresolvedReference
                | IssueKind::CircularReference
                | IssueKind::SchemaConflict
                | IssueKind::DuplicateOperationId
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::UnresolvedReference => "unresolved_reference",
            IssueKind::CircularReference => "circular_reference",
            IssueKind::SchemaConflict => "schema_conflict",
            IssueKind::DuplicateOperationId => "duplicate_operation_id",
            IssueKind::MissingPathParameter => "missing_path_parameter",
            IssueKind::UndeclaredPathParameter => "undeclared_path_parameter",
            IssueKind::OptionalPathParameter => "optional_path_parameter",
            IssueKind::DuplicateParameter => "duplicate_parameter",
            IssueKind::NonExhaustiveDiscriminator => "non_exhaustive_discriminator",
            IssueKind::MissingOperationId => "missing_operation_id",
            IssueKind::MissingDescription => "missing_description",
            IssueKind::UnknownTag => "unknown_tag",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding, anchored at a JSON Pointer into the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub location: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.is_fatal() { "error" } else { "warning" };
        write!(
            f,
            "{} [{}] {}: {}",
            severity, self.kind, self.location, self.message
        )
    }
}

/// Run every check, fatal and non-fatal.
///
/// Fatal issues come first (references, schema graph, operation ids), then
/// the lint findings. The same problem reached from several places is
/// reported once.
pub fn validate(spec: &OpenApiDocument) -> Vec<ValidationIssue> {
    let mut issues = Issues::default();
    checks::references(spec, &mut issues);
    checks::schema_graph(spec, &mut issues);
    checks::operation_ids(spec, &mut issues);
    for issue in lint(spec) {
        issues.push(issue);
    }
    issues.into_vec()
}

/// Only the non-fatal checks. These never stop a build.
pub fn lint(spec: &OpenApiDocument) -> Vec<ValidationIssue> {
    let mut issues = Issues::default();
    checks::path_parameters(spec, &mut issues);
    checks::discriminators(spec, &mut issues);
    checks::documentation(spec, &mut issues);
    checks::tags(spec, &mut issues);
    issues.into_vec()
}

/// Ordered, de-duplicated issue list.
#[derive(Default)]
pub(crate) struct Issues {
    list: Vec<ValidationIssue>,
}

impl Issues {
    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        if !self.list.contains(&issue) {
            self.list.push(issue);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<ValidationIssue> {
        self.list
    }
}
