//! Flat walks over a raw document, yielding every schema node and every
//! `$ref` together with its JSON Pointer location.

use indexmap::IndexMap;

use super::components::{
    HeaderOrRef, MediaType, ParameterOrRef, RequestBodyOrRef, ResponseOrRef,
};
use super::operation::Operation;
use super::pointer::{ROOT, child};
use super::schema::{AdditionalProperties, SchemaOrRef};
use super::spec::OpenApiDocument;

/// A `$ref` occurrence and the component section it has to point into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    pub location: String,
    pub section: &'static str,
    pub pointer: String,
}

/// Discriminator mapping values may be bare component names.
pub fn mapping_pointer(value: &str) -> String {
    if value.starts_with('#') || value.contains('/') {
        value.to_string()
    } else {
        super::pointer::component_pointer("schemas", value)
    }
}

#[derive(Default)]
struct Walker<'a> {
    schemas: Vec<(String, &'a SchemaOrRef)>,
    refs: Vec<RefSite>,
}

impl<'a> Walker<'a> {
    fn walk(spec: &'a OpenApiDocument) -> Self {
        let mut w = Walker::default();

        if let Some(ref components) = spec.components {
            let base = child(ROOT, "components");
            let section = child(&base, "schemas");
            for (name, schema) in &components.schemas {
                w.schema(child(&section, name), schema);
            }
            let section = child(&base, "parameters");
            for (name, param) in &components.parameters {
                w.parameter(child(&section, name), param);
            }
            let section = child(&base, "requestBodies");
            for (name, body) in &components.request_bodies {
                w.request_body(child(&section, name), body);
            }
            let section = child(&base, "responses");
            for (name, resp) in &components.responses {
                w.response(child(&section, name), resp);
            }
            let section = child(&base, "headers");
            for (name, header) in &components.headers {
                w.header(child(&section, name), header);
            }
        }

        let paths = child(ROOT, "paths");
        for (path, item) in &spec.paths {
            let path_loc = child(&paths, path);
            let params_loc = child(&path_loc, "parameters");
            for (i, p) in item.parameters.iter().enumerate() {
                w.parameter(child(&params_loc, &i.to_string()), p);
            }
            for (method, op) in item.operations() {
                w.operation(child(&path_loc, method), op);
            }
        }

        w
    }

    fn operation(&mut self, loc: String, op: &'a Operation) {
        let params_loc = child(&loc, "parameters");
        for (i, p) in op.parameters.iter().enumerate() {
            self.parameter(child(&params_loc, &i.to_string()), p);
        }
        if let Some(ref body) = op.request_body {
            self.request_body(child(&loc, "requestBody"), body);
        }
        let responses_loc = child(&loc, "responses");
        for (status, resp) in &op.responses {
            self.response(child(&responses_loc, status), resp);
        }
    }

    fn parameter(&mut self, loc: String, param: &'a ParameterOrRef) {
        match param {
            ParameterOrRef::Ref { ref_path } => self.reference(loc, "parameters", ref_path),
            ParameterOrRef::Item(p) => {
                if let Some(ref s) = p.schema {
                    self.schema(child(&loc, "schema"), s);
                }
            }
        }
    }

    fn request_body(&mut self, loc: String, body: &'a RequestBodyOrRef) {
        match body {
            RequestBodyOrRef::Ref { ref_path } => self.reference(loc, "requestBodies", ref_path),
            RequestBodyOrRef::Item(rb) => self.content(&loc, &rb.content),
        }
    }

    fn response(&mut self, loc: String, resp: &'a ResponseOrRef) {
        match resp {
            ResponseOrRef::Ref { ref_path } => self.reference(loc, "responses", ref_path),
            ResponseOrRef::Item(r) => {
                let headers_loc = child(&loc, "headers");
                for (name, header) in &r.headers {
                    self.header(child(&headers_loc, name), header);
                }
                self.content(&loc, &r.content);
            }
        }
    }

    fn header(&mut self, loc: String, header: &'a HeaderOrRef) {
        match header {
            HeaderOrRef::Ref { ref_path } => self.reference(loc, "headers", ref_path),
            HeaderOrRef::Item(h) => {
                if let Some(ref s) = h.schema {
                    self.schema(child(&loc, "schema"), s);
                }
            }
        }
    }

    fn content(&mut self, loc: &str, content: &'a IndexMap<String, MediaType>) {
        let content_loc = child(loc, "content");
        for (media, mt) in content {
            if let Some(ref s) = mt.schema {
                self.schema(child(&child(&content_loc, media), "schema"), s);
            }
        }
    }

    fn reference(&mut self, location: String, section: &'static str, pointer: &str) {
        self.refs.push(RefSite {
            location,
            section,
            pointer: pointer.to_string(),
        });
    }

    fn schema(&mut self, loc: String, node: &'a SchemaOrRef) {
        let schema = match node {
            SchemaOrRef::Ref { ref_path } => {
                self.reference(loc.clone(), "schemas", ref_path);
                self.schemas.push((loc, node));
                return;
            }
            SchemaOrRef::Item(schema) => schema,
        };

        let props_loc = child(&loc, "properties");
        for (name, prop) in &schema.properties {
            self.schema(child(&props_loc, name), prop);
        }
        if let Some(ref items) = schema.items {
            self.schema(child(&loc, "items"), items);
        }
        if let Some(AdditionalProperties::Schema(ref extra)) = schema.additional_properties {
            self.schema(child(&loc, "additionalProperties"), extra);
        }
        for (keyword, members) in [
            ("allOf", &schema.all_of),
            ("oneOf", &schema.one_of),
            ("anyOf", &schema.any_of),
        ] {
            let members_loc = child(&loc, keyword);
            for (i, member) in members.iter().enumerate() {
                self.schema(child(&members_loc, &i.to_string()), member);
            }
        }
        if let Some(ref d) = schema.discriminator {
            let mapping_loc = child(&child(&loc, "discriminator"), "mapping");
            for (tag, target) in &d.mapping {
                self.reference(child(&mapping_loc, tag), "schemas", &mapping_pointer(target));
            }
        }

        self.schemas.push((loc, node));
    }
}

/// Every schema node of the document (components and inline), children
/// before their parent.
pub fn schema_sites(spec: &OpenApiDocument) -> Vec<(String, &SchemaOrRef)> {
    Walker::walk(spec).schemas
}

/// Every `$ref` of the document, including discriminator mapping pointers.
pub fn ref_sites(spec: &OpenApiDocument) -> Vec<RefSite> {
    Walker::walk(spec).refs
}
