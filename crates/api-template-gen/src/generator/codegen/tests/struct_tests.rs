use serde_json::json;

use super::describe;
use crate::generator::{
  classifier::ClassifiedApi,
  codegen::{response, structs},
};

fn folder_api(optional: bool) -> crate::generator::ast::ApiDescription {
  let mut items = json!({ "name": "files", "type": "File", "wire_path": "files", "json_type": "array" });
  if optional {
    items["optional"] = json!(true);
  }
  describe(json!({
    "api": "/api/folder/get_content",
    "version": 1,
    "return_structs": [{
      "name": "File",
      "members": [
        { "name": "quick_key", "type": "std::string", "wire_path": "quickkey" },
        { "name": "size", "type": "uint64_t", "wire_path": "size", "default_value": 0 }
      ]
    }],
    "return_params": [items]
  }))
}

#[test]
fn test_struct_definitions() {
  let api = folder_api(false);
  let classified = ClassifiedApi::classify(&api).unwrap();

  assert_eq!(
    structs::struct_definitions(&classified),
    concat!(
      "    struct File\n",
      "    {\n",
      "        /** API response field \"quickkey\" */\n",
      "        std::string quick_key;\n",
      "\n",
      "        /** API response field \"size\" */\n",
      "        uint64_t size;\n",
      "    };\n"
    )
  );
}

#[test]
fn test_struct_extractor() {
  let api = folder_api(false);
  let classified = ClassifiedApi::classify(&api).unwrap();
  let extractors = structs::struct_extractors(&classified, "v1");

  assert!(extractors.starts_with("\nnamespace {\n"));
  assert!(extractors.ends_with("}\n}  // namespace\n"));
  assert!(extractors.contains("using namespace v1;  // NOLINT\nbool FileFromPropertyBranch(\n"));
  assert!(extractors.contains("        Response::File * value,\n"));
  assert!(extractors.contains("    if (pt.size() == 0)  // Stop if branch is empty\n        return false;\n"));
  assert!(extractors.contains("    value->size = 0;\n"));
  assert!(extractors.contains("            pt,\n            \"quickkey\",\n            &value->quick_key ) )"));
  assert!(extractors.contains("    return true;\n#   undef return_error\n}"));
}

#[test]
fn test_required_struct_list() {
  let api = folder_api(false);
  let classified = ClassifiedApi::classify(&api).unwrap();
  let parsing = response::content_parsing(&classified);

  assert!(parsing.contains("Response::File optarg;"));
  assert!(parsing.contains("if ( FileFromPropertyBranch(\n                    response, &optarg, it.second) )"));
  assert!(parsing.contains("response->files.push_back(std::move(optarg));"));
  assert!(parsing.contains("\"missing value in files\""));
  assert!(parsing.contains("\"invalid value in files\""));
}

#[test]
fn test_optional_struct_list() {
  let api = folder_api(true);
  let classified = ClassifiedApi::classify(&api).unwrap();
  let parsing = response::content_parsing(&classified);

  assert!(parsing.contains("                break;"));
  assert!(!parsing.contains("return_error"));
}

#[test]
fn test_single_struct() {
  let api = describe(json!({
    "api": "/a/b/test",
    "version": 1,
    "return_structs": [{ "name": "Owner", "members": [{ "name": "id", "type": "int", "wire_path": "id" }] }],
    "return_params": [{ "name": "owner", "type": "Owner", "wire_path": "owner" }]
  }));
  let classified = ClassifiedApi::classify(&api).unwrap();
  let parsing = response::content_parsing(&classified);

  assert!(parsing.contains("if ( OwnerFromPropertyBranch(\n                response, &optarg, branch) )"));
  assert!(parsing.contains("response->owner = std::move(optarg);"));
  assert!(parsing.contains("        else\n        {\n            return_error("));
  assert_eq!(structs::struct_extractors(&classified, "v1").matches("FromPropertyBranch(").count(), 1);
}
