use std::{fs, path::Path};

use crate::generator::{
  errors::DocumentError,
  orchestrator::{CodegenConfig, GenerationReport, Orchestrator},
  writer::WriteOutcome,
};

const FIXTURES: &[(&str, &str)] = &[
  ("file/get_info_v1_3.json", include_str!("../../fixtures/get_info_v1_3.json")),
  ("file/get_info_v1_4.json", include_str!("../../fixtures/get_info_v1_4.json")),
  ("system/get_status.json", include_str!("../../fixtures/get_status.json")),
  ("user/register.json", include_str!("../../fixtures/user_register.json")),
  ("user/delete.json", include_str!("../../fixtures/invalid_document.json")),
];

fn seed_fixtures(root: &Path) {
  for (relative, contents) in FIXTURES {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
  }
}

fn run(source: &Path, destination: &Path) -> GenerationReport {
  Orchestrator::new(source, destination, CodegenConfig::default())
    .run()
    .unwrap()
}

fn read(root: &Path, relative: &str) -> String {
  fs::read_to_string(root.join(relative)).unwrap_or_else(|err| panic!("failed to read {relative}: {err}"))
}

#[test]
fn test_fixture_tree_layout() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());

  let report = run(source.path(), destination.path());
  assert_eq!(report.documents_found, 5);
  assert_eq!(report.documents_generated, 4);
  assert_eq!(report.domains, 3);

  let written = report.files.iter().map(|file| file.relative.as_str()).collect::<Vec<_>>();
  assert_eq!(
    written,
    vec![
      "api/file/get_info_v1_3.cpp",
      "api/file/get_info_v1_3.hpp",
      "api/file/get_info_v1_4.cpp",
      "api/file/get_info_v1_4.hpp",
      "api/system/get_status_v1_0.cpp",
      "api/system/get_status_v1_0.hpp",
      "api/user/user_register_v1_0.cpp",
      "api/user/user_register_v1_0.hpp",
      "api/file/get_info.hpp",
      "api/system/get_status.hpp",
      "api/user/user_register.hpp",
      "GeneratedList.txt",
    ]
  );
}

#[test]
fn test_fixture_rejections() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());

  let report = run(source.path(), destination.path());
  assert_eq!(report.rejected.len(), 1);
  let rejected = &report.rejected[0];
  assert!(rejected.path.ends_with("user/delete.json"));
  assert!(matches!(rejected.error, DocumentError::Invalid { .. }));
  assert_eq!(
    rejected.error.details(),
    vec![
      "'session_token' does not accept 'maybe' (acceptable values: 'true', 'false')".to_string(),
      "'user': Missing parameter \"wire_path\"".to_string(),
    ]
  );
}

#[test]
fn test_fixture_default_version_selection() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());
  run(source.path(), destination.path());

  let get_info = read(destination.path(), "api/file/get_info.hpp");
  assert!(get_info.contains("#include \"get_info_v1_3.hpp\"\n#include \"get_info_v1_4.hpp\"\n"));
  assert!(get_info.contains("using namespace v1_4;"));

  let status = read(destination.path(), "api/system/get_status.hpp");
  assert!(status.contains("using namespace v1_0;"));
  assert!(status.contains("@file api/system/get_status.hpp"));
}

#[test]
fn test_fixture_generated_sources() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());
  run(source.path(), destination.path());

  let get_info_hpp = read(destination.path(), "api/file/get_info_v1_3.hpp");
  assert!(get_info_hpp.contains("enum class Privacy\n{"));
  assert!(get_info_hpp.contains("    struct Link\n    {"));
  assert!(get_info_hpp.contains("void SetDetails(bool details);"));
  assert!(get_info_hpp.contains("std::vector<Link> links;"));

  let get_info_cpp = read(destination.path(), "api/file/get_info_v1_3.cpp");
  assert!(get_info_cpp.contains("namespace v1_3 = sdk::api::file::get_info::v1_3;"));
  assert!(get_info_cpp.contains("bool LinkFromPropertyBranch("));
  assert!(get_info_cpp.contains("optval == \"0\""));
  assert!(get_info_cpp.contains("response->privacy = Privacy::Public;"));

  let status_cpp = read(destination.path(), "api/system/get_status_v1_0.cpp");
  assert!(status_cpp.contains("class Impl : public TokenlessApiBase<Response>"));
  assert!(status_cpp.contains("return sdk::api::RequestMethod::Get;"));

  let register_hpp = read(destination.path(), "api/user/user_register_v1_0.hpp");
  assert!(register_hpp.contains("#include \"sdk/user/registration_types.hpp\""));
  assert!(register_hpp.contains("#include \"sdk/http/shared_buffer.hpp\""));
  assert!(register_hpp.contains("Make API request \"user/register\""));
  let register_cpp = read(destination.path(), "api/user/user_register_v1_0.cpp");
  assert!(register_cpp.contains("return sdk::api::RequestMethod::Post;"));
}

#[test]
fn test_fixture_manifest() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());
  run(source.path(), destination.path());

  assert_eq!(
    read(destination.path(), "GeneratedList.txt"),
    concat!(
      "# This file is auto generated.  Do NOT edit by hand.\n",
      "\n",
      "set(API_TEMPLATE_GENERATED_SOURCES\n",
      "    api/file/get_info_v1_3.cpp\n",
      "    api/file/get_info_v1_4.cpp\n",
      "    api/system/get_status_v1_0.cpp\n",
      "    api/user/user_register_v1_0.cpp\n",
      ")\n",
      "\n",
      "set(API_TEMPLATE_GENERATED_HEADERS\n",
      "    api/file/get_info.hpp\n",
      "    api/file/get_info_v1_3.hpp\n",
      "    api/file/get_info_v1_4.hpp\n",
      "    api/system/get_status.hpp\n",
      "    api/system/get_status_v1_0.hpp\n",
      "    api/user/user_register.hpp\n",
      "    api/user/user_register_v1_0.hpp\n",
      ")\n",
    )
  );
}

#[test]
fn test_fixture_rerun_is_idempotent() {
  let source = tempfile::tempdir().unwrap();
  let destination = tempfile::tempdir().unwrap();
  seed_fixtures(source.path());
  run(source.path(), destination.path());

  let report = run(source.path(), destination.path());
  assert!(report.files.iter().all(|file| file.outcome == WriteOutcome::Unchanged));
  assert_eq!(report.rejected.len(), 1);
}
