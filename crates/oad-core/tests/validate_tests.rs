use oad_core::error::{BuildError, ResolveError};
use oad_core::parse::{self, spec::OpenApiDocument};
use oad_core::{BuildOptions, IssueKind, ValidationIssue, build, build_with_options, validate};

const GORILA: &str = include_str!("fixtures/gorila.yaml");

const BROKEN: &str = r#"
openapi: 3.0.3
info: { title: Broken Pets, version: '1' }
tags:
  - name: Pets
x-tagGroups:
  - name: Main
    tags: [Pets, Stores]
paths:
  /pets/{petId}:
    get:
      operationId: getPet
      tags: [Pets]
      parameters:
        - { name: id, in: path, required: true, schema: { type: string } }
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
  /pets:
    get:
      summary: List pets
      tags: [Pets]
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/Missing' }
    post:
      operationId: getPet
      description: Adds a pet
      responses: { '201': { description: created } }
components:
  schemas:
    Pet:
      type: object
      properties:
        name: { type: string }
"#;

fn report(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn kinds(issues: &[ValidationIssue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

#[test]
fn gorila_is_clean() {
    let spec = parse::from_yaml(GORILA).unwrap();
    assert!(validate(&spec).is_empty(), "{}", report(&validate(&spec)));
    assert!(build(&spec).unwrap().issues.is_empty());
}

#[test]
fn broken_document_reports_every_problem() {
    let spec = parse::from_yaml(BROKEN).unwrap();
    let issues = validate(&spec);

    insta::assert_snapshot!(report(&issues), @r"
    error [unresolved_reference] #/paths/~1pets/get/responses/200/content/application~1json/schema/items: `#/components/schemas/Missing` does not resolve
    error [duplicate_operation_id] #/paths/~1pets/post: operationId `getPet` is already used at #/paths/~1pets~1{petId}/get
    warning [missing_path_parameter] #/paths/~1pets~1{petId}/get: path variable `petId` has no matching path parameter
    warning [undeclared_path_parameter] #/paths/~1pets~1{petId}/get/parameters/0: path parameter `id` does not appear in `/pets/{petId}`
    warning [missing_description] #/paths/~1pets~1{petId}/get: operation has neither summary nor description
    warning [missing_operation_id] #/paths/~1pets/get: GET /pets has no operationId; `listPets` is derived
    warning [unknown_tag] #/x-tagGroups/0/tags/1: tag group `Main` lists unknown tag `Stores`
    ");

    let fatal = issues.iter().filter(|i| i.is_fatal()).count();
    assert_eq!(fatal, 2);
}

#[test]
fn build_fails_where_validate_reports_errors() {
    let spec = parse::from_yaml(BROKEN).unwrap();
    assert!(build(&spec).is_err());
}

fn document(components: &str, paths: &str) -> OpenApiDocument {
    let yaml = format!(
        "openapi: 3.0.0\ninfo: {{ title: T, version: '1' }}\npaths:\n{}\ncomponents:\n{}",
        paths, components
    );
    parse::from_yaml(&yaml).unwrap()
}

#[test]
fn unused_components_with_broken_references_fail_build() {
    let cases = [
        (
            r#"
  responses:
    Broken:
      description: never used
      content:
        application/json:
          schema: { $ref: '#/components/schemas/Missing' }
"#,
            "#/components/responses/Broken/content/application~1json/schema",
        ),
        (
            r#"
  parameters:
    Broken: { name: q, in: query, schema: { $ref: '#/components/schemas/Missing' } }
"#,
            "#/components/parameters/Broken/schema",
        ),
        (
            r#"
  requestBodies:
    Broken:
      content:
        application/json:
          schema: { $ref: '#/components/schemas/Missing' }
"#,
            "#/components/requestBodies/Broken/content/application~1json/schema",
        ),
    ];

    for (components, location) in cases {
        let spec = document(components, "  {}");
        let fatal: Vec<String> = validate(&spec)
            .into_iter()
            .filter(ValidationIssue::is_fatal)
            .map(|i| i.location)
            .collect();
        assert_eq!(fatal, vec![location.to_string()]);

        let err = build(&spec).unwrap_err();
        assert_eq!(
            err,
            BuildError::Resolve(ResolveError::Unresolved {
                pointer: "#/components/schemas/Missing".into(),
                location: location.into(),
            })
        );
    }
}

#[test]
fn response_header_schemas_are_resolved() {
    let paths = r#"
  /pets:
    get:
      operationId: listPets
      summary: List pets
      responses:
        '200':
          description: ok
          headers:
            X-Rate-Limit:
              description: Calls left
              schema: { $ref: '#/components/schemas/Count' }
            X-Trace:
              $ref: '#/components/headers/Trace'
"#;
    let spec = document(
        r#"
  schemas:
    Count: { type: integer }
  headers:
    Trace:
      required: true
      schema: { type: string, format: uuid }
"#,
        paths,
    );
    let model = build(&spec).unwrap().model;
    let headers = &model.get_operation_by_id("listPets").unwrap().responses["200"].headers;
    assert_eq!(headers["X-Rate-Limit"].description.as_deref(), Some("Calls left"));
    assert_eq!(
        headers["X-Rate-Limit"].schema.as_ref().map(|s| s.type_label()).as_deref(),
        Some("ref:Count")
    );
    assert!(headers["X-Trace"].required);
    assert_eq!(
        headers["X-Trace"].schema.as_ref().map(|s| s.type_label()).as_deref(),
        Some("string")
    );

    let broken_paths = paths.replace("Count", "Nope").replace(
        "              $ref: '#/components/headers/Trace'\n",
        "              schema: { type: string }\n",
    );
    let broken = document("  schemas: {}\n", &broken_paths);
    assert_eq!(
        kinds(&validate(&broken)),
        vec![IssueKind::UnresolvedReference]
    );
    let issue = &validate(&broken)[0];
    assert_eq!(
        issue.location,
        "#/paths/~1pets/get/responses/200/headers/X-Rate-Limit/schema"
    );
    assert!(matches!(
        build(&broken).unwrap_err(),
        BuildError::Resolve(ResolveError::Unresolved { .. })
    ));
}

#[test]
fn build_drops_suppressed_kinds() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.0.0
info: { title: Quiet, version: '1' }
x-tagGroups:
  - name: Main
    tags: [Ghost]
paths:
  /ping:
    get:
      responses: { '204': { description: pong } }
"#,
    )
    .unwrap();

    let all = build(&spec).unwrap().issues;
    assert_eq!(
        kinds(&all),
        vec![
            IssueKind::MissingOperationId,
            IssueKind::MissingDescription,
            IssueKind::UnknownTag
        ]
    );

    let options = BuildOptions {
        suppress: vec![IssueKind::MissingOperationId, IssueKind::MissingDescription],
        ..BuildOptions::default()
    };
    let quiet = build_with_options(&spec, &options).unwrap().issues;
    assert_eq!(kinds(&quiet), vec![IssueKind::UnknownTag]);
}

#[test]
fn discriminator_mapping_must_cover_members() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.0.0
info: { title: Pets, version: '1' }
paths: {}
components:
  schemas:
    Cat: { type: object, properties: { kind: { type: string } } }
    Dog: { type: object, properties: { kind: { type: string } } }
    Pet:
      oneOf:
        - $ref: '#/components/schemas/Cat'
        - $ref: '#/components/schemas/Dog'
      discriminator:
        propertyName: kind
        mapping:
          cat: Cat
"#,
    )
    .unwrap();

    assert_eq!(
        validate(&spec),
        vec![ValidationIssue::new(
            IssueKind::NonExhaustiveDiscriminator,
            "#/components/schemas/Pet/oneOf/1",
            "`#/components/schemas/Dog` has no entry in the `kind` discriminator mapping",
        )]
    );
}

#[test]
fn path_parameters_must_be_required_and_unique() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.0.0
info: { title: Params, version: '1' }
paths:
  /items/{itemId}:
    parameters:
      - { name: itemId, in: path, schema: { type: string } }
    get:
      operationId: getItem
      summary: Read an item
      parameters:
        - { name: verbose, in: query, schema: { type: boolean } }
        - { name: verbose, in: query, schema: { type: boolean } }
      responses: { '200': { description: ok } }
"#,
    )
    .unwrap();

    let issues = validate(&spec);
    assert_eq!(
        issues,
        vec![
            ValidationIssue::new(
                IssueKind::DuplicateParameter,
                "#/paths/~1items~1{itemId}/get/parameters/1",
                "parameter `verbose` is declared more than once",
            ),
            ValidationIssue::new(
                IssueKind::OptionalPathParameter,
                "#/paths/~1items~1{itemId}/parameters/0",
                "path parameter `itemId` must be required",
            ),
        ]
    );
    assert!(issues.iter().all(|i| !i.is_fatal()));
}

#[test]
fn schema_problems_are_reported_once() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.0.0
info: { title: Graph, version: '1' }
paths: {}
components:
  schemas:
    A:
      allOf:
        - $ref: '#/components/schemas/B'
        - type: object
          properties: { a: { type: string } }
    B:
      allOf:
        - $ref: '#/components/schemas/A'
        - type: object
          properties: { b: { type: string } }
    Text:
      type: object
      properties: { id: { type: string } }
    Number:
      type: object
      properties: { id: { type: integer } }
    Mixed:
      allOf:
        - $ref: '#/components/schemas/Text'
        - $ref: '#/components/schemas/Number'
"#,
    )
    .unwrap();

    let issues = validate(&spec);
    assert_eq!(
        issues,
        vec![
            ValidationIssue::new(
                IssueKind::CircularReference,
                "#/components/schemas/A",
                "reference cycle: #/components/schemas/A -> #/components/schemas/B -> #/components/schemas/A",
            ),
            ValidationIssue::new(
                IssueKind::SchemaConflict,
                "#/components/schemas/Mixed/allOf/1/properties/id",
                "`id` is defined as both string and integer",
            ),
        ]
    );
}
