use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use crate::error::{NormalizeError, ResolveError};
use crate::model::schema::{
    ArraySchema, Constraints, ObjectSchema, Primitive, PrimitiveSchema, Schema, SchemaKind,
    SchemaRef, UnionMode, UnionSchema, VariantSchema,
};
use crate::parse::pointer::{child, component_pointer, parse_component_ref};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{
    AdditionalProperties, Discriminator, ExclusiveBound, Schema as RawSchema, SchemaOrRef,
    SchemaType, TypeSet,
};
use crate::parse::spec::OpenApiDocument;
use crate::parse::visit::mapping_pointer;

/// Turns raw schemas into normalized [`Schema`] nodes.
///
/// Component schemas are normalized once and shared as `Arc`s. References in
/// properties, items, additionalProperties and oneOf/anyOf members stay lazy
/// (`SchemaKind::Ref`); only `allOf` members are expanded, and a cycle made of
/// such expansions is a [`ResolveError::Circular`].
pub struct SchemaNormalizer<'a> {
    resolver: RefResolver<'a>,
    components: IndexMap<String, Arc<Schema>>,
    expanding: Vec<String>,
}

impl<'a> SchemaNormalizer<'a> {
    pub fn new(spec: &'a OpenApiDocument) -> Self {
        Self {
            resolver: RefResolver::new(spec),
            components: IndexMap::new(),
            expanding: Vec::new(),
        }
    }

    pub fn resolver(&mut self) -> &mut RefResolver<'a> {
        &mut self.resolver
    }

    /// Normalize every component schema in declaration order.
    pub fn normalize_components(&mut self) -> Result<(), NormalizeError> {
        for name in self.resolver.component_schema_names() {
            self.component(name)?;
        }
        Ok(())
    }

    /// The normalized component `name`, normalizing it on first use.
    pub fn component(&mut self, name: &str) -> Result<Arc<Schema>, NormalizeError> {
        if let Some(done) = self.components.get(name) {
            return Ok(Arc::clone(done));
        }

        let pointer = component_pointer("schemas", name);
        if let Some(pos) = self.expanding.iter().position(|n| n == name) {
            let mut chain: Vec<String> = self.expanding[pos..]
                .iter()
                .map(|n| component_pointer("schemas", n))
                .collect();
            chain.push(pointer);
            return Err(ResolveError::Circular { chain }.into());
        }

        let raw = self
            .resolver
            .component_schema(name)
            .ok_or_else(|| ResolveError::Unresolved {
                pointer: pointer.clone(),
                location: pointer.clone(),
            })?;

        self.expanding.push(name.to_string());
        let result = self.normalize(raw, &pointer);
        self.expanding.pop();

        let schema = Arc::new(result?);
        debug!("normalized component {} as {}", name, schema.type_label());
        self.components.insert(name.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Hand over the normalized components in declaration order.
    pub fn into_components(mut self) -> IndexMap<String, Arc<Schema>> {
        let mut ordered = IndexMap::with_capacity(self.components.len());
        for name in self.resolver.component_schema_names() {
            if let Some(schema) = self.components.swap_remove(name) {
                ordered.insert(name.to_string(), schema);
            }
        }
        ordered
    }

    /// Normalize a schema or reference found at `location`.
    pub fn normalize(
        &mut self,
        node: &SchemaOrRef,
        location: &str,
    ) -> Result<Schema, NormalizeError> {
        match node {
            SchemaOrRef::Ref { ref_path } => {
                Ok(Schema::new(SchemaKind::Ref(self.link(ref_path, location)?)))
            }
            SchemaOrRef::Item(raw) => self.normalize_schema(raw, location),
        }
    }

    /// Check that `pointer` resolves and return a lazy link to it.
    fn link(&mut self, pointer: &str, location: &str) -> Result<SchemaRef, NormalizeError> {
        let resolved = self.resolver.resolve_schema(pointer, location)?;
        let name = parse_component_ref(pointer)
            .map(|r| r.name)
            .unwrap_or_else(|| resolved.name.to_string());
        Ok(SchemaRef {
            name,
            pointer: pointer.to_string(),
        })
    }

    /// Resolve `pointer` and return the normalized component it ends at.
    fn expand(&mut self, pointer: &str, location: &str) -> Result<Arc<Schema>, NormalizeError> {
        let resolved = self.resolver.resolve_schema(pointer, location)?;
        self.component(resolved.name)
    }

    fn normalize_schema(
        &mut self,
        raw: &RawSchema,
        location: &str,
    ) -> Result<Schema, NormalizeError> {
        let mut schema = Schema {
            title: raw.title.clone(),
            description: raw.description.clone(),
            nullable: raw.nullable.unwrap_or(false),
            read_only: raw.read_only.unwrap_or(false),
            write_only: raw.write_only.unwrap_or(false),
            deprecated: raw.deprecated.unwrap_or(false),
            default_value: raw.default_value.clone(),
            example: raw.example.clone(),
            kind: SchemaKind::Any,
        };

        if let Some(TypeSet::Multiple(types)) = &raw.schema_type {
            if types.len() > 1 && types.contains(&SchemaType::Null) {
                schema.nullable = true;
            }
        }

        if !raw.all_of.is_empty() {
            let merged = self.merge_all_of(raw, location)?;
            schema.kind = merged.kind;
            if schema.title.is_none() {
                schema.title = merged.title;
            }
            if schema.description.is_none() {
                schema.description = merged.description;
            }
        } else if !raw.one_of.is_empty() {
            schema.kind = self.composition(
                UnionMode::OneOf,
                &raw.one_of,
                raw.discriminator.as_ref(),
                location,
            )?;
        } else if !raw.any_of.is_empty() {
            schema.kind = self.composition(
                UnionMode::AnyOf,
                &raw.any_of,
                raw.discriminator.as_ref(),
                location,
            )?;
        } else {
            schema.kind = self.typed_kind(raw, location)?;
        }

        Ok(schema)
    }

    fn typed_kind(&mut self, raw: &RawSchema, location: &str) -> Result<SchemaKind, NormalizeError> {
        match &raw.schema_type {
            Some(TypeSet::Single(t)) => self.kind_for(t, raw, location),
            Some(TypeSet::Multiple(types)) => {
                let non_null: Vec<&SchemaType> =
                    types.iter().filter(|t| **t != SchemaType::Null).collect();
                match non_null.as_slice() {
                    [] => Ok(primitive(Primitive::Null, raw)),
                    [single] => self.kind_for(single, raw, location),
                    many => {
                        let mut members = Vec::with_capacity(many.len());
                        for t in many {
                            members.push(Schema::new(self.kind_for(t, raw, location)?));
                        }
                        Ok(SchemaKind::Union(UnionSchema {
                            mode: UnionMode::AnyOf,
                            members,
                            shared: None,
                        }))
                    }
                }
            }
            None => {
                if !raw.properties.is_empty() || raw.additional_properties.is_some() {
                    self.object(raw, location)
                } else if raw.items.is_some() {
                    self.array(raw, location)
                } else if let Some(p) = infer_primitive(raw) {
                    Ok(primitive(p, raw))
                } else {
                    Ok(SchemaKind::Any)
                }
            }
        }
    }

    fn kind_for(
        &mut self,
        t: &SchemaType,
        raw: &RawSchema,
        location: &str,
    ) -> Result<SchemaKind, NormalizeError> {
        Ok(match t {
            SchemaType::String => primitive(Primitive::String, raw),
            SchemaType::Number => primitive(Primitive::Number, raw),
            SchemaType::Integer => primitive(Primitive::Integer, raw),
            SchemaType::Boolean => primitive(Primitive::Boolean, raw),
            SchemaType::Null => primitive(Primitive::Null, raw),
            SchemaType::Array => self.array(raw, location)?,
            SchemaType::Object => self.object(raw, location)?,
        })
    }

    fn object(&mut self, raw: &RawSchema, location: &str) -> Result<SchemaKind, NormalizeError> {
        let props_loc = child(location, "properties");
        let mut properties = IndexMap::with_capacity(raw.properties.len());
        for (name, prop) in &raw.properties {
            let prop = self.normalize(prop, &child(&props_loc, name))?;
            properties.insert(name.clone(), prop);
        }

        let additional_properties = match &raw.additional_properties {
            Some(AdditionalProperties::Schema(s)) => Some(Box::new(
                self.normalize(s, &child(location, "additionalProperties"))?,
            )),
            Some(AdditionalProperties::Bool(true)) => Some(Box::new(Schema::default())),
            Some(AdditionalProperties::Bool(false)) | None => None,
        };

        Ok(SchemaKind::Object(ObjectSchema {
            properties,
            required: raw.required.clone(),
            additional_properties,
        }))
    }

    fn array(&mut self, raw: &RawSchema, location: &str) -> Result<SchemaKind, NormalizeError> {
        let items = match &raw.items {
            Some(items) => self.normalize(items, &child(location, "items"))?,
            None => Schema::default(),
        };
        Ok(SchemaKind::Array(ArraySchema {
            items: Box::new(items),
            min_items: raw.min_items,
            max_items: raw.max_items,
            unique_items: raw.unique_items.unwrap_or(false),
        }))
    }

    fn composition(
        &mut self,
        mode: UnionMode,
        members: &[SchemaOrRef],
        discriminator: Option<&Discriminator>,
        location: &str,
    ) -> Result<SchemaKind, NormalizeError> {
        let members_loc = child(location, mode.as_str());

        let Some(d) = discriminator else {
            let mut out = Vec::with_capacity(members.len());
            for (i, member) in members.iter().enumerate() {
                out.push(self.normalize(member, &child(&members_loc, &i.to_string()))?);
            }
            return Ok(SchemaKind::Union(UnionSchema {
                mode,
                members: out,
                shared: None,
            }));
        };

        let mapping_loc = child(&child(location, "discriminator"), "mapping");
        let mut variants: IndexMap<String, SchemaRef> = IndexMap::new();
        for (tag, target) in &d.mapping {
            let link = self.link(&mapping_pointer(target), &child(&mapping_loc, tag))?;
            variants.insert(tag.clone(), link);
        }

        let mut untagged = Vec::new();
        for (i, member) in members.iter().enumerate() {
            let member_loc = child(&members_loc, &i.to_string());
            match member {
                SchemaOrRef::Ref { ref_path } => {
                    let link = self.link(ref_path, &member_loc)?;
                    if !variants.values().any(|v| v.name == link.name) {
                        // Without a mapping entry the tag value is the component name.
                        variants.entry(link.name.clone()).or_insert(link);
                    }
                }
                SchemaOrRef::Item(_) => untagged.push(self.normalize(member, &member_loc)?),
            }
        }

        Ok(SchemaKind::Variant(VariantSchema {
            property_name: d.property_name.clone(),
            variants,
            untagged,
            shared: None,
        }))
    }

    fn merge_all_of(&mut self, raw: &RawSchema, location: &str) -> Result<Schema, NormalizeError> {
        let all_of_loc = child(location, "allOf");

        if raw.all_of.len() == 1 && raw.properties.is_empty() {
            return self.normalize(&raw.all_of[0], &child(&all_of_loc, "0"));
        }

        let mut acc = MergeAccumulator::default();
        for (i, part) in raw.all_of.iter().enumerate() {
            let part_loc = child(&all_of_loc, &i.to_string());
            let part = self.normalize(part, &part_loc)?;
            self.absorb(&mut acc, &part, &part_loc, &mut Vec::new())?;
        }

        if !raw.properties.is_empty() {
            let own = Schema::new(self.object(raw, location)?);
            self.absorb(&mut acc, &own, location, &mut Vec::new())?;
        }

        Ok(acc.finish())
    }

    /// Fold one `allOf` part into the accumulator, expanding references.
    fn absorb(
        &mut self,
        acc: &mut MergeAccumulator,
        part: &Schema,
        location: &str,
        seen: &mut Vec<String>,
    ) -> Result<(), NormalizeError> {
        let Some(link) = part.as_link() else {
            return acc.absorb(part, location, &mut |a, b| self.compatible(a, b, location));
        };

        if seen.contains(&link.pointer) {
            seen.push(link.pointer.clone());
            return Err(ResolveError::Circular {
                chain: std::mem::take(seen),
            }
            .into());
        }
        seen.push(link.pointer.clone());

        let target = self.expand(&link.pointer, location)?;
        acc.absorb_metadata(part);
        self.absorb(acc, &target, location, seen)
    }

    /// Whether two definitions of one field agree once links are followed.
    fn compatible(
        &mut self,
        a: &Schema,
        b: &Schema,
        location: &str,
    ) -> Result<bool, NormalizeError> {
        if let (Some(x), Some(y)) = (a.as_link(), b.as_link()) {
            if x.name == y.name {
                return Ok(true);
            }
        }
        let (Some(a), Some(b)) = (self.concrete(a, location)?, self.concrete(b, location)?) else {
            return Ok(true);
        };
        Ok(match (&a.kind, &b.kind) {
            (SchemaKind::Any, _) | (_, SchemaKind::Any) => true,
            (SchemaKind::Primitive(x), SchemaKind::Primitive(y)) => {
                x.primitive.accepts(y.primitive)
            }
            (SchemaKind::Array(x), SchemaKind::Array(y)) => {
                self.compatible(&x.items, &y.items, location)?
            }
            (x, y) => std::mem::discriminant(x) == std::mem::discriminant(y),
        })
    }

    /// Follow lazy links to the shape they name. `None` when that shape is
    /// still being built further up the stack, so it cannot be compared yet.
    fn concrete(
        &mut self,
        schema: &Schema,
        location: &str,
    ) -> Result<Option<Arc<Schema>>, NormalizeError> {
        let mut current = Arc::new(schema.clone());
        let mut seen: Vec<&str> = Vec::new();
        loop {
            let Some(pointer) = current.as_link().map(|l| l.pointer.clone()) else {
                return Ok(Some(current));
            };
            let name = self.resolver.resolve_schema(&pointer, location)?.name;
            if seen.contains(&name) || self.expanding.iter().any(|n| n == name) {
                return Ok(None);
            }
            seen.push(name);
            current = match self.component(name) {
                Ok(target) => target,
                Err(NormalizeError::Resolve(ResolveError::Circular { .. })) => return Ok(None),
                Err(e) => return Err(e),
            };
        }
    }
}

type Compatible<'c> = dyn FnMut(&Schema, &Schema) -> Result<bool, NormalizeError> + 'c;

/// Running result of an `allOf` merge.
#[derive(Default)]
struct MergeAccumulator {
    title: Option<String>,
    description: Option<String>,
    properties: IndexMap<String, Schema>,
    required: Vec<String>,
    additional_properties: Option<Box<Schema>>,
    primitive: Option<PrimitiveSchema>,
    object_seen: bool,
    /// A oneOf/anyOf part; the merged fields become its shared fields.
    choice: Option<SchemaKind>,
}

impl MergeAccumulator {
    fn absorb_metadata(&mut self, part: &Schema) {
        if self.title.is_none() {
            self.title = part.title.clone();
        }
        if self.description.is_none() {
            self.description = part.description.clone();
        }
    }

    fn label(&self) -> String {
        match (&self.choice, &self.primitive) {
            (Some(choice), _) => Schema::new(choice.clone()).type_label(),
            (None, Some(p)) => p.primitive.as_str().to_string(),
            (None, None) if self.object_seen => "object".to_string(),
            (None, None) => "any".to_string(),
        }
    }

    fn absorb(
        &mut self,
        part: &Schema,
        location: &str,
        compatible: &mut Compatible<'_>,
    ) -> Result<(), NormalizeError> {
        self.absorb_metadata(part);

        match &part.kind {
            SchemaKind::Any => Ok(()),
            SchemaKind::Object(obj) => {
                if self.primitive.is_some() {
                    return Err(conflict(location, "allOf", &self.label(), "object"));
                }
                self.object_seen = true;
                self.absorb_fields(obj, location, compatible)
            }
            SchemaKind::Variant(_) | SchemaKind::Union(_) => {
                if self.primitive.is_some() || self.choice.is_some() {
                    return Err(conflict(location, "allOf", &self.label(), &part.type_label()));
                }
                let mut choice = part.kind.clone();
                if let Some(shared) = take_shared(&mut choice) {
                    self.absorb_fields(&shared, location, compatible)?;
                }
                self.choice = Some(choice);
                Ok(())
            }
            SchemaKind::Primitive(p) => {
                if self.object_seen || self.choice.is_some() {
                    return Err(conflict(location, "allOf", &self.label(), p.primitive.as_str()));
                }
                match &mut self.primitive {
                    None => {
                        self.primitive = Some(p.clone());
                        Ok(())
                    }
                    Some(existing) if existing.primitive == p.primitive => {
                        existing.constraints.merge(&p.constraints);
                        Ok(())
                    }
                    Some(existing) => Err(conflict(
                        location,
                        "allOf",
                        existing.primitive.as_str(),
                        p.primitive.as_str(),
                    )),
                }
            }
            _ => Err(conflict(location, "allOf", &self.label(), &part.type_label())),
        }
    }

    fn absorb_fields(
        &mut self,
        obj: &ObjectSchema,
        location: &str,
        compatible: &mut Compatible<'_>,
    ) -> Result<(), NormalizeError> {
        let props_loc = child(location, "properties");
        for (name, prop) in &obj.properties {
            let Some(existing) = self.properties.get_mut(name) else {
                self.properties.insert(name.clone(), prop.clone());
                continue;
            };
            if !compatible(existing, prop)? {
                return Err(conflict(
                    &child(&props_loc, name),
                    name,
                    &existing.type_label(),
                    &prop.type_label(),
                ));
            }
            if matches!(prop.kind, SchemaKind::Any) {
                if prop.description.is_some() {
                    existing.description = prop.description.clone();
                }
            } else {
                *existing = prop.clone();
            }
        }
        for name in &obj.required {
            if !self.required.contains(name) {
                self.required.push(name.clone());
            }
        }
        if obj.additional_properties.is_some() {
            self.additional_properties = obj.additional_properties.clone();
        }
        Ok(())
    }

    fn finish(self) -> Schema {
        let fields = ObjectSchema {
            properties: self.properties,
            required: self.required,
            additional_properties: self.additional_properties,
        };
        let kind = if let Some(mut choice) = self.choice {
            let shared = (!fields.properties.is_empty()
                || !fields.required.is_empty()
                || fields.additional_properties.is_some())
            .then_some(fields);
            match &mut choice {
                SchemaKind::Variant(v) => v.shared = shared,
                SchemaKind::Union(u) => u.shared = shared,
                _ => {}
            }
            choice
        } else if self.object_seen {
            SchemaKind::Object(fields)
        } else if let Some(p) = self.primitive {
            SchemaKind::Primitive(p)
        } else {
            SchemaKind::Any
        };
        Schema {
            title: self.title,
            description: self.description,
            ..Schema::new(kind)
        }
    }
}

fn take_shared(kind: &mut SchemaKind) -> Option<ObjectSchema> {
    match kind {
        SchemaKind::Variant(v) => v.shared.take(),
        SchemaKind::Union(u) => u.shared.take(),
        _ => None,
    }
}

fn conflict(location: &str, subject: &str, first: &str, second: &str) -> NormalizeError {
    NormalizeError::SchemaConflict {
        location: location.to_string(),
        subject: subject.to_string(),
        first: first.to_string(),
        second: second.to_string(),
    }
}

fn primitive(p: Primitive, raw: &RawSchema) -> SchemaKind {
    SchemaKind::Primitive(PrimitiveSchema {
        primitive: p,
        constraints: constraints(raw),
    })
}

fn constraints(raw: &RawSchema) -> Constraints {
    let (minimum, exclusive_minimum) = bounds(raw.minimum, raw.exclusive_minimum);
    let (maximum, exclusive_maximum) = bounds(raw.maximum, raw.exclusive_maximum);
    Constraints {
        format: raw.format.clone(),
        enum_values: raw.enum_values.clone(),
        const_value: raw.const_value.clone(),
        minimum,
        maximum,
        exclusive_minimum,
        exclusive_maximum,
        min_length: raw.min_length,
        max_length: raw.max_length,
        pattern: raw.pattern.clone(),
    }
}

/// Split a limit into its inclusive and exclusive form. A 3.0 boolean flag
/// moves the limit over to the exclusive side.
fn bounds(limit: Option<f64>, exclusive: Option<ExclusiveBound>) -> (Option<f64>, Option<f64>) {
    match exclusive {
        Some(ExclusiveBound::Value(v)) => (limit, Some(v)),
        Some(ExclusiveBound::Flag(true)) => (None, limit),
        Some(ExclusiveBound::Flag(false)) | None => (limit, None),
    }
}

/// Untyped schemas with `enum` or `const` take the type of their values.
fn infer_primitive(raw: &RawSchema) -> Option<Primitive> {
    let sample = raw.enum_values.first().or(raw.const_value.as_ref())?;
    Some(match sample {
        serde_json::Value::String(_) => Primitive::String,
        serde_json::Value::Bool(_) => Primitive::Boolean,
        serde_json::Value::Null => Primitive::Null,
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => Primitive::Integer,
        serde_json::Value::Number(_) => Primitive::Number,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn spec(components: &str) -> OpenApiDocument {
        let yaml = format!(
            "openapi: 3.0.0\ninfo:\n  title: T\n  version: '1'\npaths: {{}}\ncomponents:\n  schemas:\n{}",
            components
        );
        parse::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_object_properties_keep_refs_lazy() {
        let spec = spec(
            r#"
    Node:
      type: object
      required: [value]
      properties:
        value: { type: string }
        children:
          type: array
          items: { $ref: '#/components/schemas/Node' }
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);
        let node = n.component("Node").unwrap();
        let SchemaKind::Object(obj) = &node.kind else {
            panic!("expected object, got {}", node.type_label());
        };
        assert!(obj.is_required("value"));
        assert_eq!(obj.properties["children"].type_label(), "array<ref:Node>");
    }

    #[test]
    fn test_single_all_of_collapses_to_link() {
        let spec = spec(
            r#"
    Money: { type: number, format: float }
    Price:
      description: Unit price
      allOf:
        - $ref: '#/components/schemas/Money'
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);
        let price = n.component("Price").unwrap();
        assert_eq!(price.type_label(), "ref:Money");
        assert_eq!(price.description.as_deref(), Some("Unit price"));
    }

    #[test]
    fn test_all_of_compatible_redefinition_refines() {
        let spec = spec(
            r#"
    Base:
      type: object
      properties:
        kind: { type: string }
    Child:
      allOf:
        - $ref: '#/components/schemas/Base'
        - type: object
          required: [kind]
          properties:
            kind: { type: string, enum: [CHILD] }
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);
        let child = n.component("Child").unwrap();
        let SchemaKind::Object(obj) = &child.kind else {
            panic!("expected object");
        };
        let SchemaKind::Primitive(kind) = &obj.properties["kind"].kind else {
            panic!("expected primitive");
        };
        assert_eq!(kind.constraints.enum_values, vec![serde_json::json!("CHILD")]);
        assert_eq!(obj.required, vec!["kind".to_string()]);
    }

    #[test]
    fn test_type_array_with_null_is_nullable() {
        let spec = spec(
            r#"
    MaybeName:
      type: [string, 'null']
      maxLength: 40
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);
        let s = n.component("MaybeName").unwrap();
        assert!(s.nullable);
        let SchemaKind::Primitive(p) = &s.kind else {
            panic!("expected primitive");
        };
        assert_eq!(p.primitive, Primitive::String);
        assert_eq!(p.constraints.max_length, Some(40));
    }

    #[test]
    fn test_exclusive_bounds_both_dialects() {
        let spec = spec(
            r#"
    Percent:
      type: number
      minimum: 0
      exclusiveMinimum: true
      maximum: 100
    Ratio:
      type: number
      exclusiveMaximum: 1
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);

        let percent = n.component("Percent").unwrap();
        let SchemaKind::Primitive(p) = &percent.kind else {
            panic!("expected primitive");
        };
        assert_eq!(p.constraints.minimum, None);
        assert_eq!(p.constraints.exclusive_minimum, Some(0.0));
        assert_eq!(p.constraints.maximum, Some(100.0));
        assert_eq!(p.constraints.exclusive_maximum, None);

        let ratio = n.component("Ratio").unwrap();
        let SchemaKind::Primitive(r) = &ratio.kind else {
            panic!("expected primitive");
        };
        assert_eq!(r.constraints.exclusive_maximum, Some(1.0));
    }

    #[test]
    fn test_enum_without_type_is_inferred() {
        let spec = spec("    Frequency:\n      enum: [DAILY, MONTHLY]\n");
        let mut n = SchemaNormalizer::new(&spec);
        assert_eq!(n.component("Frequency").unwrap().type_label(), "string");
    }

    #[test]
    fn test_all_of_primitive_and_object_conflict() {
        let spec = spec(
            r#"
    Id: { type: string }
    Broken:
      allOf:
        - $ref: '#/components/schemas/Id'
        - type: object
          properties:
            x: { type: string }
"#,
        );
        let mut n = SchemaNormalizer::new(&spec);
        let err = n.component("Broken").unwrap_err();
        assert!(matches!(err, NormalizeError::SchemaConflict { .. }));
    }
}
