//! JSON Pointer helpers for `$ref` targets and issue locations.

/// Root of every location pointer.
pub const ROOT: &str = "#";

/// A `$ref` that points at `#/components/{section}/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef<'a> {
    pub section: &'a str,
    pub name: String,
}

/// Parse a local component pointer. Returns `None` for external references,
/// pointers outside `components`, or pointers that go deeper than a component.
pub fn parse_component_ref(pointer: &str) -> Option<ComponentRef<'_>> {
    let stripped = pointer.strip_prefix("#/components/")?;
    let (section, name) = stripped.split_once('/')?;
    if section.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(ComponentRef {
        section,
        name: unescape_segment(name),
    })
}

/// Build the pointer of a named component.
pub fn component_pointer(section: &str, name: &str) -> String {
    format!("#/components/{}/{}", section, escape_segment(name))
}

/// Append one segment to a location pointer.
pub fn child(base: &str, segment: &str) -> String {
    format!("{}/{}", base, escape_segment(segment))
}

/// Escape a pointer segment (`~` → `~0`, `/` → `~1`).
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Decode a pointer segment (`~1` → `/`, `~0` → `~`).
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_ref() {
        let r = parse_component_ref("#/components/schemas/SecurityDto").unwrap();
        assert_eq!(r.section, "schemas");
        assert_eq!(r.name, "SecurityDto");
    }

    #[test]
    fn test_parse_component_ref_escaped() {
        let r = parse_component_ref("#/components/schemas/a~1b~0c").unwrap();
        assert_eq!(r.name, "a/b~c");
    }

    #[test]
    fn test_parse_component_ref_rejects_other_forms() {
        assert!(parse_component_ref("other.yaml#/components/schemas/Foo").is_none());
        assert!(parse_component_ref("#/definitions/Foo").is_none());
        assert!(parse_component_ref("#/components/schemas/Foo/properties/id").is_none());
        assert!(parse_component_ref("#/components/schemas/").is_none());
    }

    #[test]
    fn test_child_escapes_paths() {
        let loc = child("#/paths", "/portfolios/{portfolioId}");
        assert_eq!(loc, "#/paths/~1portfolios~1{portfolioId}");
        assert_eq!(child(&loc, "get"), "#/paths/~1portfolios~1{portfolioId}/get");
    }

    #[test]
    fn test_component_pointer_round_trips() {
        let pointer = component_pointer("schemas", "API Key/v1");
        let parsed = parse_component_ref(&pointer).unwrap();
        assert_eq!(parsed.name, "API Key/v1");
    }
}
