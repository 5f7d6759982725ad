use std::{fs, path::Path};

use serde_json::{Value, json};

use crate::generator::{
  errors::{DocumentError, GeneratorError},
  orchestrator::{CodegenConfig, GeneratedFile, Orchestrator, RejectedDocument, RunObserver},
  template::{Template, TemplateSet},
  writer::WriteOutcome,
};

fn write_document(root: &Path, relative: &str, document: &Value) {
  let path = root.join(relative);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, serde_json::to_string_pretty(document).unwrap()).unwrap();
}

fn test_document(version: &str, default_version: bool) -> Value {
  json!({
    "api": "/a/b/test",
    "version": version,
    "default_version": default_version,
    "input_params": [{ "name": "x", "type": "std::string", "wire_path": "x" }]
  })
}

fn relative_files(report: &crate::generator::orchestrator::GenerationReport) -> Vec<(&str, WriteOutcome)> {
  report
    .files
    .iter()
    .map(|file| (file.relative.as_str(), file.outcome))
    .collect()
}

#[test]
fn test_generates_files_aggregation_and_manifest() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "a/test_v1.json", &test_document("1", false));
  write_document(source.path(), "a/test_v2.json", &test_document("2", false));

  let report = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default())
    .run()
    .unwrap();

  assert_eq!(report.documents_found, 2);
  assert_eq!(report.documents_generated, 2);
  assert_eq!(report.domains, 1);
  assert!(report.rejected.is_empty());
  assert_eq!(
    relative_files(&report),
    vec![
      ("a/b/test_v1.cpp", WriteOutcome::Created),
      ("a/b/test_v1.hpp", WriteOutcome::Created),
      ("a/b/test_v2.cpp", WriteOutcome::Created),
      ("a/b/test_v2.hpp", WriteOutcome::Created),
      ("a/b/test.hpp", WriteOutcome::Created),
      ("GeneratedList.txt", WriteOutcome::Created),
    ]
  );

  let aggregation = fs::read_to_string(destination.path().join("a/b/test.hpp")).unwrap();
  assert!(aggregation.contains("#include \"test_v1.hpp\"\n#include \"test_v2.hpp\"\n"));
  assert!(aggregation.contains("using namespace v2;"));
  assert!(aggregation.contains("/** API action \"a/b/test\" */\nnamespace test {"));

  let manifest = fs::read_to_string(destination.path().join("GeneratedList.txt")).unwrap();
  assert_eq!(
    manifest,
    "# This file is auto generated.  Do NOT edit by hand.\n\n\
     set(API_TEMPLATE_GENERATED_SOURCES\n    a/b/test_v1.cpp\n    a/b/test_v2.cpp\n)\n\n\
     set(API_TEMPLATE_GENERATED_HEADERS\n    a/b/test.hpp\n    a/b/test_v1.hpp\n    a/b/test_v2.hpp\n)\n"
  );
}

#[test]
fn test_second_run_changes_nothing() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test.json", &test_document("1", true));

  let orchestrator = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default());
  let first = orchestrator.run().unwrap();
  assert_eq!(first.files_written(), first.files.len());

  let second = orchestrator.run().unwrap();
  assert_eq!(second.files.len(), first.files.len());
  assert_eq!(second.files_written(), 0);
  assert!(
    second
      .files
      .iter()
      .all(|file| file.outcome == WriteOutcome::Unchanged)
  );
}

#[test]
fn test_changed_document_updates_only_its_files() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test.json", &test_document("1", false));

  let orchestrator = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default());
  orchestrator.run().unwrap();

  let mut changed = test_document("1", false);
  changed["optional_input_params"] = json!([{ "name": "limit", "type": "int", "wire_path": "limit" }]);
  write_document(source.path(), "test.json", &changed);

  let report = orchestrator.run().unwrap();
  assert_eq!(
    relative_files(&report),
    vec![
      ("a/b/test_v1.cpp", WriteOutcome::Updated),
      ("a/b/test_v1.hpp", WriteOutcome::Updated),
      ("a/b/test.hpp", WriteOutcome::Unchanged),
      ("GeneratedList.txt", WriteOutcome::Unchanged),
    ]
  );
}

#[test]
fn test_rejected_documents_do_not_stop_the_run() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  fs::write(source.path().join("a_broken.json"), "{ \"api\": ").unwrap();
  write_document(
    source.path(),
    "b_invalid.json",
    &json!({ "api": "/a/b/other", "version": "1", "session_token": "yes", "surprise": 1 }),
  );
  write_document(source.path(), "c_valid.json", &test_document("1", false));

  let report = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default())
    .run()
    .unwrap();

  assert_eq!(report.documents_found, 3);
  assert_eq!(report.documents_generated, 1);
  assert_eq!(report.rejected.len(), 2);

  assert!(report.rejected[0].path.ends_with("a_broken.json"));
  assert!(matches!(report.rejected[0].error, DocumentError::Malformed { .. }));

  assert!(report.rejected[1].path.ends_with("b_invalid.json"));
  match &report.rejected[1].error {
    DocumentError::Invalid { violations } => assert_eq!(violations.len(), 2),
    other => panic!("expected schema violations, got {other:?}"),
  }

  assert!(destination.path().join("a/b/test_v1.cpp").is_file());
  assert!(!destination.path().join("a/b/other_v1.cpp").exists());
}

#[test]
fn test_only_matching_extension_is_discovered() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test.json", &test_document("1", false));
  fs::write(source.path().join("notes.txt"), "not a document").unwrap();
  fs::write(source.path().join("api_template.cpp.txt"), "__CPPSAFE_NAME__").unwrap();

  let report = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default())
    .run()
    .unwrap();
  assert_eq!(report.documents_found, 1);
}

#[test]
fn test_duplicate_default_version_is_fatal() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test_v1.json", &test_document("1", true));
  write_document(source.path(), "test_v2.json", &test_document("2", true));

  let result = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default()).run();
  match result {
    Err(GeneratorError::DuplicateDefaultVersion { domain, first, second }) => {
      assert_eq!(domain, "a/b/test");
      assert_eq!(first, "a/b/test_v1.hpp");
      assert_eq!(second, "a/b/test_v2.hpp");
    }
    other => panic!("expected a duplicate default error, got {other:?}"),
  }
  assert!(!destination.path().join("a/b/test.hpp").exists());
  assert!(!destination.path().join("GeneratedList.txt").exists());
}

#[test]
fn test_unsupported_configuration_is_fatal() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(
    source.path(),
    "test.json",
    &json!({
      "api": "/a/b/test",
      "version": "1",
      "enums": [{ "name": "Color", "members": [{ "name": "Red", "wire_value": "red" }] }],
      "return_params": [{ "name": "colors", "type": "Color", "wire_path": "colors", "json_type": "array" }]
    }),
  );

  let result = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default()).run();
  match result {
    Err(GeneratorError::UnsupportedConfiguration { api, field, .. }) => {
      assert_eq!(api, "/a/b/test");
      assert_eq!(field, "colors");
    }
    other => panic!("expected an unsupported configuration error, got {other:?}"),
  }
}

#[test]
fn test_conflicting_delivery_rejects_only_that_document() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(
    source.path(),
    "a.json",
    &json!({
      "api": "/a/b/one",
      "version": "1",
      "delivery_method": "GET",
      "input_params": [{ "name": "x", "type": "int", "wire_path": "x", "http_method": "POST" }]
    }),
  );
  write_document(
    source.path(),
    "b.json",
    &json!({ "api": "/a/b/two", "version": "1" }),
  );

  let report = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default())
    .run()
    .unwrap();

  assert_eq!(report.documents_generated, 1);
  assert_eq!(report.rejected.len(), 1);
  assert!(report.rejected[0].path.ends_with("a.json"));
  match &report.rejected[0].error {
    DocumentError::ConflictingDelivery { param } => assert_eq!(param, "x"),
    other => panic!("expected a delivery conflict, got {other:?}"),
  }
  assert!(destination.path().join("a/b/two_v1.cpp").is_file());
  assert!(!destination.path().join("a/b/one_v1.cpp").exists());
}

#[derive(Default)]
struct Recorder {
  events: Vec<String>,
}

impl RunObserver for Recorder {
  fn file_written(&mut self, file: &GeneratedFile) {
    self.events.push(format!("{} {}", file.relative, file.outcome));
  }

  fn document_rejected(&mut self, rejected: &RejectedDocument) {
    let name = rejected.path.file_name().unwrap().to_string_lossy();
    self.events.push(format!("rejected {name}: {}", rejected.error.details().join("; ")));
  }
}

#[test]
fn test_events_precede_a_fatal_error() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(
    source.path(),
    "a_bad.json",
    &json!({ "api": "/a/b/other", "version": "1", "session_token": "yes" }),
  );
  write_document(source.path(), "b_v1.json", &test_document("1", true));
  write_document(source.path(), "c_v2.json", &test_document("2", true));

  let mut recorder = Recorder::default();
  let result = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default()).run_with(&mut recorder);

  assert!(matches!(result, Err(GeneratorError::DuplicateDefaultVersion { .. })));
  assert_eq!(
    recorder.events,
    vec![
      "rejected a_bad.json: 'session_token' does not accept 'yes' (acceptable values: 'true', 'false')".to_string(),
      "a/b/test_v1.cpp created".to_string(),
      "a/b/test_v1.hpp created".to_string(),
      "a/b/test_v2.cpp created".to_string(),
      "a/b/test_v2.hpp created".to_string(),
    ]
  );
}

#[test]
fn test_events_match_the_report() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test.json", &test_document("1", false));

  let mut recorder = Recorder::default();
  let report = Orchestrator::new(source.path(), destination.path(), CodegenConfig::default())
    .run_with(&mut recorder)
    .unwrap();

  let expected = report
    .files
    .iter()
    .map(|file| format!("{} {}", file.relative, file.outcome))
    .collect::<Vec<_>>();
  assert_eq!(recorder.events, expected);
}

#[test]
fn test_missing_source_root() {
  let destination = tempfile::tempdir().unwrap();
  let missing = destination.path().join("nowhere");
  let result = Orchestrator::new(&missing, destination.path(), CodegenConfig::default()).run();
  match result {
    Err(GeneratorError::MissingSourceRoot { path }) => assert_eq!(path, missing),
    other => panic!("expected a missing source root error, got {other:?}"),
  }
}

#[test]
fn test_custom_manifest_and_templates() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  write_document(source.path(), "test.api", &test_document("1", false));
  write_document(source.path(), "ignored.json", &test_document("2", false));

  let templates = TemplateSet {
    cpp: Template::new("cpp __CPPSAFE_NAME__ __VERSION__"),
    hpp: Template::new("hpp __QUALIFIED_NAME__"),
    ..TemplateSet::builtin()
  };
  let config = CodegenConfig::builder()
    .extension("api")
    .manifest_name("cmake/Generated.cmake")
    .templates(templates)
    .build();

  let report = Orchestrator::new(source.path(), destination.path(), config).run().unwrap();
  assert_eq!(report.documents_found, 1);
  assert_eq!(
    fs::read_to_string(destination.path().join("a/b/test_v1.cpp")).unwrap(),
    "cpp test v1"
  );
  assert_eq!(
    fs::read_to_string(destination.path().join("a/b/test_v1.hpp")).unwrap(),
    "hpp a::b::test"
  );
  assert!(destination.path().join("cmake/Generated.cmake").is_file());
}
