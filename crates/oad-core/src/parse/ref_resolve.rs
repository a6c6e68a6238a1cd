use std::collections::HashMap;

use indexmap::IndexMap;

use super::components::{Components, Header, OrRef, Parameter, RequestBody, Response};
use super::pointer::{component_pointer, parse_component_ref};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiDocument;
use crate::error::ResolveError;

/// The component a `$ref` chain ended at.
#[derive(Debug)]
pub struct Resolved<'a, T> {
    /// Name of the concrete component (the last link of an alias chain).
    pub name: &'a str,
    pub node: &'a T,
}

impl<T> Clone for Resolved<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolved<'_, T> {}

/// Resolves `$ref` pointers against the `components` of a document.
///
/// Aliases (components that are themselves `$ref`s) are followed until a
/// concrete definition is reached; a chain that comes back to a pointer it
/// already visited is reported as [`ResolveError::Circular`]. Schema lookups
/// are cached by pointer string, so repeated lookups hand back the same node.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
    schema_cache: HashMap<String, Resolved<'a, Schema>>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiDocument) -> Self {
        Self {
            components: spec.components.as_ref(),
            schema_cache: HashMap::new(),
        }
    }

    /// Resolve a schema pointer. `location` is where the `$ref` was found and
    /// is only used for error context.
    pub fn resolve_schema(
        &mut self,
        pointer: &str,
        location: &str,
    ) -> Result<Resolved<'a, Schema>, ResolveError> {
        if let Some(hit) = self.schema_cache.get(pointer) {
            return Ok(*hit);
        }
        let resolved = follow(
            "schemas",
            self.components.map(|c| &c.schemas),
            pointer,
            location,
        )?;
        self.schema_cache.insert(pointer.to_string(), resolved);
        Ok(resolved)
    }

    pub fn resolve_parameter(
        &self,
        pointer: &str,
        location: &str,
    ) -> Result<Resolved<'a, Parameter>, ResolveError> {
        follow(
            "parameters",
            self.components.map(|c| &c.parameters),
            pointer,
            location,
        )
    }

    pub fn resolve_request_body(
        &self,
        pointer: &str,
        location: &str,
    ) -> Result<Resolved<'a, RequestBody>, ResolveError> {
        follow(
            "requestBodies",
            self.components.map(|c| &c.request_bodies),
            pointer,
            location,
        )
    }

    pub fn resolve_response(
        &self,
        pointer: &str,
        location: &str,
    ) -> Result<Resolved<'a, Response>, ResolveError> {
        follow(
            "responses",
            self.components.map(|c| &c.responses),
            pointer,
            location,
        )
    }

    pub fn resolve_header(
        &self,
        pointer: &str,
        location: &str,
    ) -> Result<Resolved<'a, Header>, ResolveError> {
        follow(
            "headers",
            self.components.map(|c| &c.headers),
            pointer,
            location,
        )
    }

    /// A schema component exactly as declared, alias or not.
    pub fn component_schema(&self, name: &str) -> Option<&'a SchemaOrRef> {
        self.components.and_then(|c| c.schemas.get(name))
    }

    /// Names of all schema components in declaration order.
    pub fn component_schema_names(&self) -> Vec<&'a str> {
        self.components
            .map(|c| c.schemas.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

fn follow<'a, T>(
    section: &str,
    table: Option<&'a IndexMap<String, OrRef<T>>>,
    pointer: &str,
    location: &str,
) -> Result<Resolved<'a, T>, ResolveError> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = pointer.to_string();
    let mut at = location.to_string();

    loop {
        if chain.contains(&current) {
            chain.push(current);
            return Err(ResolveError::Circular { chain });
        }

        let target = parse_component_ref(&current)
            .filter(|r| r.section == section)
            .ok_or_else(|| ResolveError::InvalidRefFormat {
                pointer: current.clone(),
                location: at.clone(),
            })?;

        let (name, entry) = table
            .and_then(|t| t.get_key_value(target.name.as_str()))
            .ok_or_else(|| ResolveError::Unresolved {
                pointer: current.clone(),
                location: at.clone(),
            })?;

        match entry {
            OrRef::Item(node) => {
                return Ok(Resolved {
                    name: name.as_str(),
                    node,
                });
            }
            OrRef::Ref { ref_path: next } => {
                at = component_pointer(section, name);
                chain.push(std::mem::replace(&mut current, next.to_string()));
            }
        }
    }
}
