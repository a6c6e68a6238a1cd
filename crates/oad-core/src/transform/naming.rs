use std::borrow::Cow;

use heck::{ToKebabCase, ToPascalCase};

/// URL-safe anchor for an operation id or tag name.
///
/// `listPositions` becomes `list-positions`, `Profit & Losses` becomes
/// `profit-losses`.
pub fn slugify(name: &str) -> String {
    let words = words(name);
    if words.is_empty() {
        return "unnamed".to_string();
    }
    words.to_kebab_case()
}

/// Fallback id for an operation without `operationId`, built from a verb
/// and the literal path segments.
///
/// | route                        | id                  |
/// |------------------------------|---------------------|
/// | `GET /users`                 | `listUsers`         |
/// | `GET /users/{userId}`        | `getUser`           |
/// | `POST /users`                | `createUsers`       |
/// | `PUT /users/{userId}`        | `updateUser`        |
/// | `GET /users/{id}/messages`   | `listUsersMessages` |
pub fn derive_operation_id(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let targets_item = segments.last().is_some_and(|s| is_template(s));
    let resources: Vec<&str> = segments.into_iter().filter(|s| !is_template(s)).collect();

    let method = method.to_ascii_lowercase();
    let verb = match method.as_str() {
        "get" if targets_item => "get",
        "get" => "list",
        "post" => "create",
        "put" => "update",
        "delete" | "patch" | "options" | "head" | "trace" => method.as_str(),
        _ => "call",
    };

    let last = resources.len().saturating_sub(1);
    let nouns = resources.iter().enumerate().map(|(i, part)| {
        let noun = if targets_item && i == last {
            singular(part)
        } else {
            Cow::Borrowed(*part)
        };
        words(&noun).to_pascal_case()
    });
    std::iter::once(verb.to_string()).chain(nouns).collect()
}

fn is_template(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// English plural stripping, good enough for resource names.
fn singular(word: &str) -> Cow<'_, str> {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        return Cow::Owned(format!("{stem}y"));
    }
    if ["sses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        return Cow::Borrowed(&word[..word.len() - 2]);
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => Cow::Borrowed(stem),
        _ => Cow::Borrowed(word),
    }
}

/// Alphanumeric runs of `name` separated by single spaces.
fn words(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
