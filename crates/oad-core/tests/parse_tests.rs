use oad_core::error::ParseError;
use oad_core::parse;
use oad_core::parse::schema::{SchemaOrRef, SchemaType, TypeSet};
use oad_core::parse::security::{ApiKeyLocation, SecurityScheme};

const GORILA: &str = include_str!("fixtures/gorila.yaml");

#[test]
fn parse_gorila_yaml() {
    let spec = parse::from_yaml(GORILA).expect("should parse gorila.yaml");
    assert_eq!(spec.openapi, "3.0.0");
    assert_eq!(spec.info.title, "Gorila | Core API");
    assert_eq!(spec.info.version, "Preview");
    assert_eq!(spec.paths.len(), 9);
    assert_eq!(spec.tags.len(), 8);
    assert_eq!(spec.servers[0].url, "https://core.gorila.com.br");

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 23);
    assert_eq!(components.parameters.len(), 2);
    assert_eq!(components.responses.len(), 1);
}

#[test]
fn parse_security_schemes() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let components = spec.components.unwrap();
    match &components.security_schemes["API Key"] {
        SecurityScheme::ApiKey { name, location, .. } => {
            assert_eq!(name, "authorization");
            assert_eq!(*location, ApiKeyLocation::Header);
        }
        other => panic!("expected apiKey scheme, got {other:?}"),
    }

    let yaml = r#"
openapi: 3.0.0
info: { title: T, version: '1' }
paths: {}
components:
  securitySchemes:
    bearer:
      type: http
      scheme: bearer
      bearerFormat: JWT
      description: Access token
    oauth:
      type: oauth2
      flows:
        clientCredentials:
          tokenUrl: https://auth.example.com/token
          scopes: { read: Read access }
"#;
    let components = parse::from_yaml(yaml).unwrap().components.unwrap();
    assert_eq!(
        components.security_schemes["bearer"].description(),
        Some("Access token")
    );
    match &components.security_schemes["oauth"] {
        SecurityScheme::OAuth2 { flows, .. } => {
            let flow = &flows["clientCredentials"];
            assert_eq!(flow.token_url.as_deref(), Some("https://auth.example.com/token"));
            assert_eq!(flow.scopes["read"], "Read access");
        }
        other => panic!("expected oauth2 scheme, got {other:?}"),
    }
}

#[test]
fn parse_tag_groups() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let names: Vec<&str> = spec.tag_groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Root Resources", "Portfolio Resources", "Position Resources"]
    );
    assert_eq!(
        spec.tag_groups[1].tags,
        vec!["Profit & Losses", "Positions", "Transactions"]
    );
}

#[test]
fn parse_code_samples() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let post = spec.paths["/portfolios/{portfolioId}/transactions"]
        .post
        .as_ref()
        .expect("should have POST");
    assert_eq!(post.operation_id.as_deref(), Some("Create Transaction"));
    assert_eq!(post.code_samples.len(), 2);
    assert_eq!(post.code_samples[0].lang, "cURL");
    assert!(post.code_samples[0].label.is_none());
    assert_eq!(post.code_samples[1].label.as_deref(), Some("Windows"));
}

#[test]
fn parse_path_item_method_order() {
    let spec = parse::from_yaml(GORILA).unwrap();
    let methods: Vec<&str> = spec.paths["/portfolios/{portfolioId}/transactions/{transactionId}"]
        .operations()
        .map(|(method, _)| method)
        .collect();
    assert_eq!(methods, vec!["get", "delete"]);

    let methods: Vec<&str> = spec.paths["/portfolios"]
        .operations()
        .map(|(method, _)| method)
        .collect();
    assert_eq!(methods, vec!["get", "post"]);
}

#[test]
fn parse_json_and_value() {
    let json = r#"{
        "openapi": "3.1.0",
        "info": { "title": "Json", "version": "1" },
        "paths": { "/ping": { "get": { "responses": { "200": { "description": "pong" } } } } }
    }"#;
    let from_text = parse::from_json(json).unwrap();
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    let from_value = parse::from_value(value).unwrap();
    assert_eq!(from_text, from_value);
    assert_eq!(from_text.paths.len(), 1);
}

#[test]
fn parse_type_array() {
    let yaml = r#"
openapi: 3.1.0
info: { title: T, version: '1' }
paths: {}
components:
  schemas:
    MaybeName:
      type: [string, 'null']
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let components = spec.components.unwrap();
    match &components.schemas["MaybeName"] {
        SchemaOrRef::Item(s) => assert_eq!(
            s.schema_type,
            Some(TypeSet::Multiple(vec![SchemaType::String, SchemaType::Null]))
        ),
        _ => panic!("expected inline schema"),
    }
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(matches!(result, Err(ParseError::UnsupportedVersion(v)) if v == "2.0.0"));
}

#[test]
fn parse_malformed_yaml() {
    let result = parse::from_yaml("openapi: [3.0.0\n");
    assert!(matches!(result, Err(ParseError::Yaml(_))));
}
