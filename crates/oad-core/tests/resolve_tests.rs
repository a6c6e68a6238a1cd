use oad_core::error::ResolveError;
use oad_core::parse;
use oad_core::parse::ref_resolve::RefResolver;
use oad_core::parse::spec::OpenApiDocument;
use oad_core::parse::visit::ref_sites;

const GORILA: &str = include_str!("fixtures/gorila.yaml");

fn aliases() -> OpenApiDocument {
    parse::from_yaml(
        r#"
openapi: 3.0.0
info: { title: Aliases, version: '1' }
paths: {}
components:
  schemas:
    Money:
      type: number
      format: float
    Price:
      $ref: '#/components/schemas/Money'
    Cost:
      $ref: '#/components/schemas/Price'
    Ping:
      $ref: '#/components/schemas/Pong'
    Pong:
      $ref: '#/components/schemas/Ping'
"#,
    )
    .unwrap()
}

#[test]
fn resolve_same_pointer_reuses_node() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let mut resolver = RefResolver::new(&spec);

    let first = resolver
        .resolve_schema("#/components/schemas/SecurityDto", "#/a")
        .unwrap();
    let second = resolver
        .resolve_schema("#/components/schemas/SecurityDto", "#/b")
        .unwrap();
    assert_eq!(first.name, "SecurityDto");
    assert!(std::ptr::eq(first.node, second.node));
}

#[test]
fn resolve_follows_alias_chain() {
    let spec = aliases();
    let mut resolver = RefResolver::new(&spec);
    let resolved = resolver
        .resolve_schema("#/components/schemas/Cost", "#/x")
        .unwrap();
    assert_eq!(resolved.name, "Money");
    assert_eq!(resolved.node.format.as_deref(), Some("float"));
}

#[test]
fn resolve_alias_cycle_is_circular() {
    let spec = aliases();
    let mut resolver = RefResolver::new(&spec);
    let err = resolver
        .resolve_schema("#/components/schemas/Ping", "#/x")
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Circular {
            chain: vec![
                "#/components/schemas/Ping".to_string(),
                "#/components/schemas/Pong".to_string(),
                "#/components/schemas/Ping".to_string(),
            ]
        }
    );
}

#[test]
fn resolve_missing_component() {
    let spec = aliases();
    let mut resolver = RefResolver::new(&spec);
    let err = resolver
        .resolve_schema("#/components/schemas/Nope", "#/paths/~1x/get")
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Unresolved {
            pointer: "#/components/schemas/Nope".to_string(),
            location: "#/paths/~1x/get".to_string(),
        }
    );
}

#[test]
fn resolve_rejects_foreign_pointers() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let mut resolver = RefResolver::new(&spec);

    for pointer in [
        "#/definitions/SecurityDto",
        "other.yaml#/components/schemas/SecurityDto",
        "#/components/parameters/Limit",
    ] {
        let err = resolver.resolve_schema(pointer, "#/x").unwrap_err();
        assert!(
            matches!(err, ResolveError::InvalidRefFormat { .. }),
            "{pointer} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn resolve_other_sections() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let resolver = RefResolver::new(&spec);

    let param = resolver
        .resolve_parameter("#/components/parameters/PortfolioId", "#/x")
        .unwrap();
    assert_eq!(param.name, "PortfolioId");
    assert_eq!(param.node.name, "portfolioId");
    assert!(param.node.required);

    let resp = resolver
        .resolve_response("#/components/responses/Unauthorized", "#/x")
        .unwrap();
    assert_eq!(resp.node.description, "Missing or invalid API key");

    assert!(
        resolver
            .resolve_request_body("#/components/requestBodies/Nope", "#/x")
            .is_err()
    );
}

#[test]
fn every_gorila_ref_resolves() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let mut resolver = RefResolver::new(&spec);
    let sites = ref_sites(&spec);
    assert!(!sites.is_empty());

    for site in sites {
        let ok = match site.section {
            "schemas" => resolver.resolve_schema(&site.pointer, &site.location).is_ok(),
            "parameters" => resolver.resolve_parameter(&site.pointer, &site.location).is_ok(),
            "responses" => resolver.resolve_response(&site.pointer, &site.location).is_ok(),
            other => panic!("unexpected section {other} at {}", site.location),
        };
        assert!(ok, "{} at {} should resolve", site.pointer, site.location);
    }
}

#[test]
fn ref_sites_include_discriminator_mapping() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let mapping_site = ref_sites(&spec).into_iter().find(|s| {
        s.location
            == "#/paths/~1portfolios~1{portfolioId}~1transactions/post/requestBody/content/application~1json/schema/discriminator/mapping/COME_COTAS"
    });
    assert_eq!(
        mapping_site.map(|s| s.pointer),
        Some("#/components/schemas/TransactionComeCotasCreateDto".to_string())
    );
}
