use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::operation::Operation;
use super::schema::{Schema, SchemaRef};
use crate::error::{BuildError, EntityKind, QueryError};
use crate::parse::pointer::parse_component_ref;
use crate::parse::security::SecurityScheme;
use crate::parse::spec::{Info, Server, Tag, TagGroup};

/// Everything the builder hands over to become a [`DocumentModel`].
#[derive(Debug, Clone)]
pub(crate) struct ModelParts {
    pub info: Info,
    pub servers: Vec<Server>,
    pub tags: Vec<Tag>,
    pub tag_groups: Vec<TagGroup>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    pub operations: Vec<Operation>,
    pub schemas: IndexMap<String, Arc<Schema>>,
    pub default_tag: String,
    pub ungrouped: String,
}

/// An immutable, fully resolved view of one API description.
///
/// Operations keep document order (paths in declaration order, methods in
/// the fixed `get, post, put, delete, patch, options, head, trace` order).
/// Component schemas are shared: every lookup of the same name returns the
/// same `Arc`.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    info: Info,
    servers: Vec<Server>,
    tags: Vec<Tag>,
    tag_groups: Vec<TagGroup>,
    security_schemes: IndexMap<String, SecurityScheme>,
    operations: Vec<Operation>,
    operation_index: HashMap<String, usize>,
    schemas: IndexMap<String, Arc<Schema>>,
    pub(crate) default_tag: String,
    pub(crate) ungrouped: String,
}

impl DocumentModel {
    /// Index the parts. Two operations sharing an id is fatal.
    pub(crate) fn from_parts(parts: ModelParts) -> Result<Self, BuildError> {
        let mut operation_index = HashMap::with_capacity(parts.operations.len());
        for (i, op) in parts.operations.iter().enumerate() {
            if let Some(&prev) = operation_index.get(&op.id) {
                let first: &Operation = &parts.operations[prev];
                return Err(BuildError::DuplicateOperationId {
                    operation_id: op.id.clone(),
                    first: first.location.clone(),
                    second: op.location.clone(),
                });
            }
            operation_index.insert(op.id.clone(), i);
        }

        Ok(Self {
            info: parts.info,
            servers: parts.servers,
            tags: parts.tags,
            tag_groups: parts.tag_groups,
            security_schemes: parts.security_schemes,
            operations: parts.operations,
            operation_index,
            schemas: parts.schemas,
            default_tag: parts.default_tag,
            ungrouped: parts.ungrouped,
        })
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Tags declared at the top level, in declaration order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag_groups(&self) -> &[TagGroup] {
        &self.tag_groups
    }

    pub fn security_schemes(&self) -> &IndexMap<String, SecurityScheme> {
        &self.security_schemes
    }

    /// Component schemas in declaration order.
    pub fn schemas(&self) -> &IndexMap<String, Arc<Schema>> {
        &self.schemas
    }

    pub fn list_operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn get_operation_by_id(&self, id: &str) -> Result<&Operation, QueryError> {
        self.operation_index
            .get(id)
            .map(|&i| &self.operations[i])
            .ok_or_else(|| QueryError::NotFound {
                kind: EntityKind::Operation,
                key: id.to_string(),
            })
    }

    pub fn get_schema_by_name(&self, name: &str) -> Result<&Arc<Schema>, QueryError> {
        self.schemas.get(name).ok_or_else(|| QueryError::NotFound {
            kind: EntityKind::Schema,
            key: name.to_string(),
        })
    }

    /// Follow a lazy link to the shared component it names.
    pub fn resolve(&self, link: &SchemaRef) -> Result<&Arc<Schema>, QueryError> {
        self.get_schema_by_name(&link.name)
    }

    /// Look up a component schema by `#/components/schemas/{name}` pointer.
    pub fn resolve_pointer(&self, pointer: &str) -> Result<&Arc<Schema>, QueryError> {
        match parse_component_ref(pointer) {
            Some(r) if r.section == "schemas" => self.get_schema_by_name(&r.name),
            _ => Err(QueryError::NotFound {
                kind: EntityKind::Schema,
                key: pointer.to_string(),
            }),
        }
    }

    /// Description of a declared tag.
    pub fn tag_description(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .and_then(|t| t.description.as_deref())
    }
}
