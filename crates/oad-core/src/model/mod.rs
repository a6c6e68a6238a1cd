pub mod document;
pub mod grouping;
pub mod operation;
pub mod schema;
pub mod store;

pub use document::DocumentModel;
pub use grouping::{NavGroup, TagSection};
pub use operation::{
    Header, HttpMethod, MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response,
};
pub use schema::{
    ArraySchema, Constraints, ObjectSchema, Primitive, PrimitiveSchema, Schema, SchemaKind,
    SchemaRef, UnionMode, UnionSchema, VariantSchema,
};
pub use store::DocumentStore;
