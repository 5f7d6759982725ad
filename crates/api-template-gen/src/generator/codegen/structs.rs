use itertools::Itertools;

use super::{indent, response};
use crate::generator::classifier::{ClassifiedApi, ClassifiedStruct};

/// Nested struct definitions inside `Response`.
pub(crate) fn struct_definitions(api: &ClassifiedApi) -> String {
  if api.structs.is_empty() {
    return String::new();
  }
  let definitions = api.structs.iter().map(struct_definition).join("\n");
  format!("{definitions}\n")
}

fn struct_definition(classified: &ClassifiedStruct) -> String {
  let members = classified
    .members
    .iter()
    .map(|member| response::data_member(2, member.field))
    .join("\n");
  format!("    struct {}\n    {{\n{members}    }};", classified.def.name)
}

/// `<Struct>FromPropertyBranch` functions, one per struct.
///
/// Each returns `false` on an empty branch or a parse failure; failures
/// also record the error on the response.
pub(crate) fn struct_extractors(api: &ClassifiedApi, version: &str) -> String {
  if api.structs.is_empty() {
    return String::new();
  }
  let extractors = api
    .structs
    .iter()
    .map(|classified| struct_extractor(classified, version))
    .join("\n");
  format!("\nnamespace {{\n{extractors}\n}}  // namespace\n")
}

fn struct_extractor(classified: &ClassifiedStruct, version: &str) -> String {
  let name = &classified.def.name;
  let (one, two) = (indent(1), indent(2));

  let header = [
    format!("// Extracts Response::{name} from a property tree branch."),
    format!("using namespace {version};  // NOLINT"),
    format!("bool {name}FromPropertyBranch("),
    format!("{two}Response * response,"),
    format!("{two}Response::{name} * value,"),
    format!("{two}const boost::property_tree::wptree & pt"),
    format!("{one})"),
    "{".to_string(),
    "#   define return_error(error_type, error_message)                             \\".to_string(),
    format!("{one}{{                                                                          \\"),
    format!("{two}response->error_code = make_error_code( error_type );                  \\"),
    format!("{two}response->error_string = error_message;                                \\"),
    format!("{two}return false;                                                          \\"),
    format!("{one}}}"),
    format!("{one}using sdk::api::GetIfExists;"),
    format!("{one}using sdk::api::GetIfExistsArrayFront;"),
    format!("{one}using sdk::api::GetValueIfExists;"),
    format!("{one}if (pt.size() == 0)  // Stop if branch is empty"),
    format!("{two}return false;"),
  ]
  .join("\n");

  let body = response::parse_branch(&classified.members, "value", "pt");

  let footer = [
    format!("{one}return true;"),
    "#   undef return_error".to_string(),
    "}".to_string(),
  ]
  .join("\n");

  format!("{header}\n{body}\n\n{footer}")
}
