use indexmap::IndexMap;
use log::{debug, info, warn};

use super::naming::{derive_operation_id, slugify};
use super::normalizer::SchemaNormalizer;
use crate::error::{BuildError, NormalizeError};
use crate::model::document::{DocumentModel, ModelParts};
use crate::model::operation::{
    Header, HttpMethod, MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response,
};
use crate::parse::components::{
    HeaderOrRef, MediaType as RawMediaType, Parameter as RawParameter,
    ParameterLocation as RawParameterLocation, ParameterOrRef, RequestBodyOrRef, ResponseOrRef,
};
use crate::parse::operation::Operation as RawOperation;
use crate::parse::pointer::{ROOT, child, component_pointer};
use crate::parse::spec::OpenApiDocument;
use crate::validate::{self, IssueKind, ValidationIssue};

/// Options controlling how a document model is built.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Group name for operations without tags.
    pub default_tag: String,
    /// Navigation group name for tags no `x-tagGroups` entry lists.
    pub ungrouped: String,
    /// Issue kinds to drop from the build report. Fatal problems still fail
    /// the build.
    pub suppress: Vec<IssueKind>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_tag: "default".to_string(),
            ungrouped: "Other".to_string(),
            suppress: Vec::new(),
        }
    }
}

/// A successfully built model and the non-fatal issues found on the way.
#[derive(Debug, Clone)]
pub struct Build {
    pub model: DocumentModel,
    pub issues: Vec<ValidationIssue>,
}

/// Build a document model with default options.
pub fn build(spec: &OpenApiDocument) -> Result<Build, BuildError> {
    build_with_options(spec, &BuildOptions::default())
}

/// Build a document model.
///
/// Pipeline:
/// 1. Normalize every component schema (resolving every schema `$ref` they hold)
/// 2. Resolve the other component sections, whether operations use them or not
/// 3. Collect operations, resolving parameters, bodies and responses
/// 4. Index operations by id
/// 5. Lint for non-fatal issues
pub fn build_with_options(
    spec: &OpenApiDocument,
    options: &BuildOptions,
) -> Result<Build, BuildError> {
    let mut normalizer = SchemaNormalizer::new(spec);

    // Phase 1: components
    normalizer.normalize_components()?;
    check_component_sections(spec, &mut normalizer)?;

    // Phase 2: operations
    let operations = collect_operations(spec, &mut normalizer)?;
    debug!("collected {} operations", operations.len());

    // Phase 3: index
    let model = DocumentModel::from_parts(ModelParts {
        info: spec.info.clone(),
        servers: spec.servers.clone(),
        tags: spec.tags.clone(),
        tag_groups: spec.tag_groups.clone(),
        security_schemes: spec
            .components
            .as_ref()
            .map(|c| c.security_schemes.clone())
            .unwrap_or_default(),
        operations,
        schemas: normalizer.into_components(),
        default_tag: options.default_tag.clone(),
        ungrouped: options.ungrouped.clone(),
    })?;

    // Phase 4: lint
    let issues: Vec<ValidationIssue> = validate::lint(spec)
        .into_iter()
        .filter(|issue| !options.suppress.contains(&issue.kind))
        .collect();
    for issue in &issues {
        warn!("{}", issue);
    }

    info!(
        "built `{}`: {} operations, {} schemas, {} issues",
        model.info().title,
        model.list_operations().len(),
        model.schemas().len(),
        issues.len()
    );

    Ok(Build { model, issues })
}

fn collect_operations(
    spec: &OpenApiDocument,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Vec<Operation>, NormalizeError> {
    let mut operations = Vec::new();
    let paths_loc = child(ROOT, "paths");

    for (path, item) in &spec.paths {
        let path_loc = child(&paths_loc, path);
        let inherited = resolve_parameters(
            &item.parameters,
            &child(&path_loc, "parameters"),
            normalizer,
        )?;

        for (key, op) in item.operations() {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let op_loc = child(&path_loc, key);
            operations.push(build_operation(
                method,
                path,
                op,
                op_loc,
                &inherited,
                normalizer,
            )?);
        }
    }

    Ok(operations)
}

/// Reusable parameters, bodies, responses and headers must resolve even when
/// no operation refers to them.
fn check_component_sections(
    spec: &OpenApiDocument,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<(), NormalizeError> {
    let Some(components) = &spec.components else {
        return Ok(());
    };
    let base = child(ROOT, "components");

    let section = child(&base, "parameters");
    for (name, param) in &components.parameters {
        resolve_parameter(param, &child(&section, name), normalizer)?;
    }
    let section = child(&base, "requestBodies");
    for (name, body) in &components.request_bodies {
        resolve_request_body(body, &child(&section, name), normalizer)?;
    }
    let section = child(&base, "responses");
    for (name, resp) in &components.responses {
        resolve_response(resp, &child(&section, name), normalizer)?;
    }
    let section = child(&base, "headers");
    for (name, header) in &components.headers {
        resolve_header(header, &child(&section, name), normalizer)?;
    }
    Ok(())
}

fn build_operation(
    method: HttpMethod,
    path: &str,
    op: &RawOperation,
    location: String,
    inherited: &[Parameter],
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Operation, NormalizeError> {
    let (id, derived_id) = match &op.operation_id {
        Some(id) => (id.clone(), false),
        None => {
            let id = derive_operation_id(method.as_str(), path);
            debug!("derived operation id `{}` for {} {}", id, method.as_str(), path);
            (id, true)
        }
    };

    let own = resolve_parameters(&op.parameters, &child(&location, "parameters"), normalizer)?;
    let parameters = merge_parameters(inherited, own);

    let request_body = match &op.request_body {
        Some(body) => Some(resolve_request_body(
            body,
            &child(&location, "requestBody"),
            normalizer,
        )?),
        None => None,
    };

    let responses_loc = child(&location, "responses");
    let mut responses = IndexMap::with_capacity(op.responses.len());
    for (status, resp) in &op.responses {
        let resp = resolve_response(resp, &child(&responses_loc, status), normalizer)?;
        responses.insert(status.clone(), resp);
    }

    Ok(Operation {
        slug: slugify(&id),
        id,
        derived_id,
        method,
        path: path.to_string(),
        location,
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        request_body,
        responses,
        deprecated: op.deprecated,
        security: op.security.clone(),
        code_samples: op.code_samples.clone(),
    })
}

/// Operation parameters override path-level ones with the same name and
/// location; everything else is appended in declaration order.
fn merge_parameters(inherited: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged = inherited.to_vec();
    for param in own {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }
    merged
}

fn resolve_parameters(
    params: &[ParameterOrRef],
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Vec<Parameter>, NormalizeError> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| resolve_parameter(param, &child(location, &i.to_string()), normalizer))
        .collect()
}

fn resolve_parameter(
    param: &ParameterOrRef,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Parameter, NormalizeError> {
    let (raw, raw_loc) = match param {
        ParameterOrRef::Ref { ref_path } => {
            let resolved = normalizer.resolver().resolve_parameter(ref_path, location)?;
            (
                resolved.node,
                component_pointer("parameters", resolved.name),
            )
        }
        ParameterOrRef::Item(p) => (p, location.to_string()),
    };
    convert_parameter(raw, &raw_loc, normalizer)
}

fn convert_parameter(
    raw: &RawParameter,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Parameter, NormalizeError> {
    let schema = match &raw.schema {
        Some(s) => Some(normalizer.normalize(s, &child(location, "schema"))?),
        None => None,
    };
    Ok(Parameter {
        name: raw.name.clone(),
        location: match raw.location {
            RawParameterLocation::Path => ParameterLocation::Path,
            RawParameterLocation::Query => ParameterLocation::Query,
            RawParameterLocation::Header => ParameterLocation::Header,
            RawParameterLocation::Cookie => ParameterLocation::Cookie,
        },
        required: raw.required,
        deprecated: raw.deprecated.unwrap_or(false),
        description: raw.description.clone(),
        schema,
        example: raw.example.clone(),
    })
}

fn resolve_request_body(
    body: &RequestBodyOrRef,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<RequestBody, NormalizeError> {
    let (raw, raw_loc) = match body {
        RequestBodyOrRef::Ref { ref_path } => {
            let resolved = normalizer.resolver().resolve_request_body(ref_path, location)?;
            (
                resolved.node,
                component_pointer("requestBodies", resolved.name),
            )
        }
        RequestBodyOrRef::Item(rb) => (rb, location.to_string()),
    };
    Ok(RequestBody {
        description: raw.description.clone(),
        required: raw.required,
        content: convert_content(&raw.content, &raw_loc, normalizer)?,
    })
}

fn resolve_response(
    resp: &ResponseOrRef,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Response, NormalizeError> {
    let (raw, raw_loc) = match resp {
        ResponseOrRef::Ref { ref_path } => {
            let resolved = normalizer.resolver().resolve_response(ref_path, location)?;
            (resolved.node, component_pointer("responses", resolved.name))
        }
        ResponseOrRef::Item(r) => (r, location.to_string()),
    };
    let headers_loc = child(&raw_loc, "headers");
    let mut headers = IndexMap::with_capacity(raw.headers.len());
    for (name, header) in &raw.headers {
        let header = resolve_header(header, &child(&headers_loc, name), normalizer)?;
        headers.insert(name.clone(), header);
    }
    Ok(Response {
        description: raw.description.clone(),
        content: convert_content(&raw.content, &raw_loc, normalizer)?,
        headers,
    })
}

fn resolve_header(
    header: &HeaderOrRef,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<Header, NormalizeError> {
    let (raw, raw_loc) = match header {
        HeaderOrRef::Ref { ref_path } => {
            let resolved = normalizer.resolver().resolve_header(ref_path, location)?;
            (resolved.node, component_pointer("headers", resolved.name))
        }
        HeaderOrRef::Item(h) => (h, location.to_string()),
    };
    let schema = match &raw.schema {
        Some(s) => Some(normalizer.normalize(s, &child(&raw_loc, "schema"))?),
        None => None,
    };
    Ok(Header {
        description: raw.description.clone(),
        required: raw.required,
        deprecated: raw.deprecated.unwrap_or(false),
        schema,
        example: raw.example.clone(),
    })
}

fn convert_content(
    content: &IndexMap<String, RawMediaType>,
    location: &str,
    normalizer: &mut SchemaNormalizer<'_>,
) -> Result<IndexMap<String, MediaType>, NormalizeError> {
    let content_loc = child(location, "content");
    let mut out = IndexMap::with_capacity(content.len());
    for (media, mt) in content {
        let schema = match &mt.schema {
            Some(s) => Some(normalizer.normalize(s, &child(&child(&content_loc, media), "schema"))?),
            None => None,
        };
        out.insert(
            media.clone(),
            MediaType {
                schema,
                example: mt.example.clone(),
                examples: mt.examples.clone(),
            },
        );
    }
    Ok(out)
}
