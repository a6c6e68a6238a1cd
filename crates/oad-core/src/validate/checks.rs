use std::collections::{HashMap, HashSet};

use super::{IssueKind, Issues, ValidationIssue};
use crate::error::{NormalizeError, ResolveError};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::components::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::pointer::{ROOT, child};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiDocument;
use crate::parse::visit::{mapping_pointer, ref_sites, schema_sites};
use crate::transform::naming::derive_operation_id;
use crate::transform::normalizer::SchemaNormalizer;

struct OperationSite<'a> {
    path: &'a str,
    method: &'static str,
    location: String,
    item: &'a PathItem,
    op: &'a Operation,
}

fn operation_sites(spec: &OpenApiDocument) -> Vec<OperationSite<'_>> {
    let paths_loc = child(ROOT, "paths");
    let mut sites = Vec::new();
    for (path, item) in &spec.paths {
        let path_loc = child(&paths_loc, path);
        for (method, op) in item.operations() {
            sites.push(OperationSite {
                path,
                method,
                location: child(&path_loc, method),
                item,
                op,
            });
        }
    }
    sites
}

fn resolve_issue(err: &ResolveError) -> ValidationIssue {
    match err {
        ResolveError::Unresolved { pointer, location } => ValidationIssue::new(
            IssueKind::UnresolvedReference,
            location.as_str(),
            format!("`{}` does not resolve", pointer),
        ),
        ResolveError::InvalidRefFormat { pointer, location } => ValidationIssue::new(
            IssueKind::UnresolvedReference,
            location.as_str(),
            format!("`{}` is not a local component reference", pointer),
        ),
        ResolveError::Circular { chain } => {
            let cycle = canonical_cycle(chain);
            ValidationIssue::new(
                IssueKind::CircularReference,
                cycle.first().cloned().unwrap_or_default(),
                format!("reference cycle: {}", cycle.join(" -> ")),
            )
        }
    }
}

fn normalize_issue(err: &NormalizeError) -> ValidationIssue {
    match err {
        NormalizeError::SchemaConflict {
            location,
            subject,
            first,
            second,
        } => ValidationIssue::new(
            IssueKind::SchemaConflict,
            location.as_str(),
            format!("`{}` is defined as both {} and {}", subject, first, second),
        ),
        NormalizeError::Resolve(e) => resolve_issue(e),
    }
}

/// The repeating part of a chain, rotated to start at its smallest pointer,
/// so the same cycle found from different entry points reads the same.
fn canonical_cycle(chain: &[String]) -> Vec<String> {
    let Some(last) = chain.last() else {
        return Vec::new();
    };
    let start = chain.iter().position(|p| p == last).unwrap_or(0);
    let mut cycle: Vec<String> = chain[start..chain.len() - 1].to_vec();
    if cycle.is_empty() {
        return chain.to_vec();
    }
    let min = cycle
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle.rotate_left(min);
    cycle.push(cycle[0].clone());
    cycle
}

/// Every `$ref` must land on a component of the right section.
pub(super) fn references(spec: &OpenApiDocument, issues: &mut Issues) {
    let mut resolver = RefResolver::new(spec);
    for site in ref_sites(spec) {
        let result = match site.section {
            "schemas" => resolver
                .resolve_schema(&site.pointer, &site.location)
                .map(|_| ()),
            "parameters" => resolver
                .resolve_parameter(&site.pointer, &site.location)
                .map(|_| ()),
            "requestBodies" => resolver
                .resolve_request_body(&site.pointer, &site.location)
                .map(|_| ()),
            "responses" => resolver
                .resolve_response(&site.pointer, &site.location)
                .map(|_| ()),
            "headers" => resolver
                .resolve_header(&site.pointer, &site.location)
                .map(|_| ()),
            _ => Ok(()),
        };
        if let Err(e) = result {
            issues.push(resolve_issue(&e));
        }
    }
}

/// Normalize every component and inline schema, collecting eager cycles and
/// `allOf` conflicts.
pub(super) fn schema_graph(spec: &OpenApiDocument, issues: &mut Issues) {
    let mut normalizer = SchemaNormalizer::new(spec);
    for name in normalizer.resolver().component_schema_names() {
        if let Err(e) = normalizer.component(name) {
            issues.push(normalize_issue(&e));
        }
    }

    let components = child(&child(ROOT, "components"), "schemas");
    for (location, node) in schema_sites(spec) {
        if location.starts_with(&components) {
            continue;
        }
        if let Err(e) = normalizer.normalize(node, &location) {
            issues.push(normalize_issue(&e));
        }
    }
}

/// Operation ids, declared or derived, must be unique.
pub(super) fn operation_ids(spec: &OpenApiDocument, issues: &mut Issues) {
    let mut seen: HashMap<String, String> = HashMap::new();
    for site in operation_sites(spec) {
        let id = match &site.op.operation_id {
            Some(id) => id.clone(),
            None => derive_operation_id(site.method, site.path),
        };
        match seen.get(&id) {
            Some(first) => issues.push(ValidationIssue::new(
                IssueKind::DuplicateOperationId,
                site.location.as_str(),
                format!("operationId `{}` is already used at {}", id, first),
            )),
            None => {
                seen.insert(id, site.location);
            }
        }
    }
}

/// Names of the `{...}` variables of a path template.
fn template_names(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

fn lookup<'a>(resolver: &RefResolver<'a>, param: &'a ParameterOrRef, location: &str) -> Option<&'a Parameter> {
    match param {
        ParameterOrRef::Ref { ref_path } => resolver
            .resolve_parameter(ref_path, location)
            .ok()
            .map(|r| r.node),
        ParameterOrRef::Item(p) => Some(p),
    }
}

/// Path templates and path parameters must agree, path parameters must be
/// required, and a parameter list may not repeat a (name, location) pair.
pub(super) fn path_parameters(spec: &OpenApiDocument, issues: &mut Issues) {
    let resolver = RefResolver::new(spec);
    let paths_loc = child(ROOT, "paths");

    for site in operation_sites(spec) {
        let template = template_names(site.path);
        let lists = [
            (
                &site.item.parameters,
                child(&child(&paths_loc, site.path), "parameters"),
            ),
            (&site.op.parameters, child(&site.location, "parameters")),
        ];

        let mut effective: Vec<(&Parameter, String)> = Vec::new();
        for (list, list_loc) in &lists {
            let mut in_list: Vec<(&str, &ParameterLocation)> = Vec::new();
            for (i, param) in list.iter().enumerate() {
                let loc = child(list_loc, &i.to_string());
                let Some(p) = lookup(&resolver, param, &loc) else {
                    continue;
                };
                let key = (p.name.as_str(), &p.location);
                if in_list.contains(&key) {
                    issues.push(ValidationIssue::new(
                        IssueKind::DuplicateParameter,
                        loc.as_str(),
                        format!("parameter `{}` is declared more than once", p.name),
                    ));
                    continue;
                }
                in_list.push(key);

                match effective
                    .iter_mut()
                    .find(|(e, _)| e.name == p.name && e.location == p.location)
                {
                    Some(slot) => *slot = (p, loc),
                    None => effective.push((p, loc)),
                }
            }
        }

        for name in &template {
            let declared = effective
                .iter()
                .any(|(p, _)| p.location == ParameterLocation::Path && p.name == *name);
            if !declared {
                issues.push(ValidationIssue::new(
                    IssueKind::MissingPathParameter,
                    site.location.as_str(),
                    format!("path variable `{}` has no matching path parameter", name),
                ));
            }
        }

        for (p, loc) in &effective {
            if p.location != ParameterLocation::Path {
                continue;
            }
            if !template.contains(&p.name.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::UndeclaredPathParameter,
                    loc.as_str(),
                    format!("path parameter `{}` does not appear in `{}`", p.name, site.path),
                ));
            }
            if !p.required {
                issues.push(ValidationIssue::new(
                    IssueKind::OptionalPathParameter,
                    loc.as_str(),
                    format!("path parameter `{}` must be required", p.name),
                ));
            }
        }
    }
}

/// A discriminator with an explicit mapping should name every referenced
/// member.
pub(super) fn discriminators(spec: &OpenApiDocument, issues: &mut Issues) {
    for (location, node) in schema_sites(spec) {
        let Some(raw) = node.as_item() else {
            continue;
        };
        let Some(d) = &raw.discriminator else {
            continue;
        };
        if d.mapping.is_empty() {
            continue;
        }

        let (keyword, members) = if raw.one_of.is_empty() {
            ("anyOf", &raw.any_of)
        } else {
            ("oneOf", &raw.one_of)
        };
        let mapped: Vec<String> = d.mapping.values().map(|v| mapping_pointer(v)).collect();
        let members_loc = child(&location, keyword);

        for (i, member) in members.iter().enumerate() {
            let Some(pointer) = member.ref_path() else {
                continue;
            };
            if !mapped.iter().any(|m| m == pointer) {
                issues.push(ValidationIssue::new(
                    IssueKind::NonExhaustiveDiscriminator,
                    child(&members_loc, &i.to_string()),
                    format!(
                        "`{}` has no entry in the `{}` discriminator mapping",
                        pointer, d.property_name
                    ),
                ));
            }
        }
    }
}

/// Operations should carry an operationId and a summary or description.
pub(super) fn documentation(spec: &OpenApiDocument, issues: &mut Issues) {
    for site in operation_sites(spec) {
        if site.op.operation_id.is_none() {
            issues.push(ValidationIssue::new(
                IssueKind::MissingOperationId,
                site.location.as_str(),
                format!(
                    "{} {} has no operationId; `{}` is derived",
                    site.method.to_uppercase(),
                    site.path,
                    derive_operation_id(site.method, site.path)
                ),
            ));
        }

        let blank = |s: &Option<String>| s.as_deref().is_none_or(|s| s.trim().is_empty());
        if blank(&site.op.summary) && blank(&site.op.description) {
            issues.push(ValidationIssue::new(
                IssueKind::MissingDescription,
                site.location.as_str(),
                "operation has neither summary nor description",
            ));
        }
    }
}

/// Tags listed in `x-tagGroups` should be declared or used.
pub(super) fn tags(spec: &OpenApiDocument, issues: &mut Issues) {
    let mut known: HashSet<&str> = spec.tags.iter().map(|t| t.name.as_str()).collect();
    for site in operation_sites(spec) {
        known.extend(site.op.tags.iter().map(String::as_str));
    }

    let groups_loc = child(ROOT, "x-tagGroups");
    for (gi, group) in spec.tag_groups.iter().enumerate() {
        let tags_loc = child(&child(&groups_loc, &gi.to_string()), "tags");
        for (ti, tag) in group.tags.iter().enumerate() {
            if !known.contains(tag.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::UnknownTag,
                    child(&tags_loc, &ti.to_string()),
                    format!("tag group `{}` lists unknown tag `{}`", group.name, tag),
                ));
            }
        }
    }
}
