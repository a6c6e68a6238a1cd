use indexmap::IndexMap;
use serde::Serialize;

/// A normalized schema node.
///
/// References to named components stay as [`SchemaKind::Ref`] links; the
/// shared component itself lives once in the document model.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub write_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    pub kind: SchemaKind,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Short type label used in conflict messages and compatibility checks,
    /// e.g. `string`, `array<ref:Pet>`, `object`.
    pub fn type_label(&self) -> String {
        match &self.kind {
            SchemaKind::Any => "any".to_string(),
            SchemaKind::Primitive(p) => p.primitive.as_str().to_string(),
            SchemaKind::Object(_) => "object".to_string(),
            SchemaKind::Array(a) => format!("array<{}>", a.items.type_label()),
            SchemaKind::Ref(r) => format!("ref:{}", r.name),
            SchemaKind::Variant(v) => format!("variant<{}>", v.property_name),
            SchemaKind::Union(u) => u.mode.as_str().to_string(),
        }
    }

    pub fn as_link(&self) -> Option<&SchemaRef> {
        match &self.kind {
            SchemaKind::Ref(r) => Some(r),
            _ => None,
        }
    }
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// No type information (or metadata only).
    #[default]
    Any,
    Primitive(PrimitiveSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
    /// Lazy link to a named component.
    Ref(SchemaRef),
    /// Tagged union selected by a discriminator property.
    Variant(VariantSchema),
    /// Untagged oneOf / anyOf.
    Union(UnionSchema),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Integer => "integer",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
        }
    }

    /// Whether two definitions of one field agree on the primitive. An
    /// `integer` counts as a `number`.
    pub fn accepts(self, other: Primitive) -> bool {
        use Primitive::{Integer, Number};
        self == other || matches!((self, other), (Integer, Number) | (Number, Integer))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveSchema {
    pub primitive: Primitive,
    #[serde(flatten)]
    pub constraints: Constraints,
}

/// Validation keywords kept verbatim as documentation metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Constraints {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(&mut self, other: &Constraints) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        take!(
            format,
            const_value,
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            min_length,
            max_length,
            pattern
        );
        if !other.enum_values.is_empty() {
            self.enum_values = other.enum_values.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
}

impl ObjectSchema {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArraySchema {
    pub items: Box<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique_items: bool,
}

/// A link to a named component schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaRef {
    pub name: String,
    pub pointer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSchema {
    pub property_name: String,
    /// Tag value → member component, in mapping order then implicit tags.
    pub variants: IndexMap<String, SchemaRef>,
    /// Inline members that cannot carry a tag.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub untagged: Vec<Schema>,
    /// Fields every variant carries, from `allOf` parts next to the choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<ObjectSchema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnionMode {
    OneOf,
    AnyOf,
}

impl UnionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnionMode::OneOf => "oneOf",
            UnionMode::AnyOf => "anyOf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionSchema {
    pub mode: UnionMode,
    pub members: Vec<Schema>,
    /// Fields every member carries, from `allOf` parts next to the choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<ObjectSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(p: Primitive) -> Schema {
        Schema::new(SchemaKind::Primitive(PrimitiveSchema {
            primitive: p,
            constraints: Constraints::default(),
        }))
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(primitive(Primitive::String).type_label(), "string");
        let arr = Schema::new(SchemaKind::Array(ArraySchema {
            items: Box::new(Schema::new(SchemaKind::Ref(SchemaRef {
                name: "Pet".into(),
                pointer: "#/components/schemas/Pet".into(),
            }))),
            min_items: None,
            max_items: None,
            unique_items: false,
        }));
        assert_eq!(arr.type_label(), "array<ref:Pet>");
    }

    #[test]
    fn test_integer_refines_number() {
        assert!(Primitive::Number.accepts(Primitive::Integer));
        assert!(Primitive::Integer.accepts(Primitive::Number));
        assert!(!Primitive::String.accepts(Primitive::Integer));
        assert!(Primitive::Boolean.accepts(Primitive::Boolean));
    }

    #[test]
    fn test_constraints_merge_overlays_set_fields() {
        let mut base = Constraints {
            format: Some("uuid".into()),
            min_length: Some(1),
            ..Default::default()
        };
        base.merge(&Constraints {
            min_length: Some(14),
            pattern: Some("\\d+".into()),
            ..Default::default()
        });
        assert_eq!(base.format.as_deref(), Some("uuid"));
        assert_eq!(base.min_length, Some(14));
        assert_eq!(base.pattern.as_deref(), Some("\\d+"));
    }
}
