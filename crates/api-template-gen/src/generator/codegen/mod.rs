//! Source fragments for one endpoint and their assembly into the
//! implementation and interface files.

use super::{
  ast::ApiDescription,
  classifier::ClassifiedApi,
  errors::GeneratorError,
  naming::identifiers::{file_stem, version_token},
  template::{Slots, TemplateSet},
};

pub(crate) mod constructors;
pub(crate) mod enums;
pub(crate) mod includes;
pub(crate) mod members;
pub(crate) mod namespaces;
pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod setters;
pub(crate) mod structs;

#[cfg(test)]
mod tests;

/// Error category reported for responses that do not match the description.
pub(crate) const CONTENT_INVALID: &str = "sdk::api::api_code::ContentInvalidData";

pub(crate) fn indent(level: usize) -> String {
  "    ".repeat(level)
}

/// Single-line `/** ... */` comment at `level`, newline terminated.
pub(crate) fn doc_line(level: usize, text: &str) -> String {
  format!("{}/** {text} */\n", indent(level))
}

/// Joins a directory and a file name with `/`, skipping an empty directory.
pub(crate) fn relative_path(directory: &str, file_name: &str) -> String {
  if directory.is_empty() {
    file_name.to_string()
  } else {
    format!("{directory}/{file_name}")
  }
}

/// Both rendered files of one endpoint version, with paths relative to the
/// destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeneratedDocument {
  pub cpp_path: String,
  pub hpp_path: String,
  pub cpp: String,
  pub hpp: String,
  pub version_token: String,
}

pub(crate) fn generate(api: &ApiDescription, templates: &TemplateSet) -> Result<GeneratedDocument, GeneratorError> {
  let classified = ClassifiedApi::classify(api)?;
  let slots = build_slots(&classified, templates);
  let names = FileNames::new(api);

  Ok(GeneratedDocument {
    cpp: templates.cpp.render(&slots),
    hpp: templates.hpp.render(&slots),
    cpp_path: names.cpp_path,
    hpp_path: names.hpp_path,
    version_token: names.version_token,
  })
}

struct FileNames {
  version_token: String,
  cpp_file: String,
  hpp_file: String,
  cpp_path: String,
  hpp_path: String,
}

impl FileNames {
  fn new(api: &ApiDescription) -> Self {
    let version_token = version_token(&api.version);
    let stem = file_stem(api.path.name(), &version_token);
    let directory = api.path.directory();
    let cpp_file = format!("{stem}.cpp");
    let hpp_file = format!("{stem}.hpp");

    Self {
      cpp_path: relative_path(&directory, &cpp_file),
      hpp_path: relative_path(&directory, &hpp_file),
      cpp_file,
      hpp_file,
      version_token,
    }
  }
}

pub(crate) fn build_slots(classified: &ClassifiedApi, templates: &TemplateSet) -> Slots {
  let api = classified.api;
  let names = FileNames::new(api);
  let version = names.version_token.as_str();

  let mut slots = Slots::new();
  slots
    .set("CPP_FILENAME", names.cpp_file.as_str())
    .set("HPP_FILENAME", names.hpp_file.as_str())
    .set("HPP_RELATIVE_FILENAME", names.hpp_path.as_str())
    .set("VERSION", version)
    .set("VERSION_DOCUMENTATION", api.path.path_documentation())
    .set("CPPSAFE_NAME", api.path.name())
    .set("QUALIFIED_NAME", api.path.qualified_name())
    .set("API_PATH", api.path.api_path())
    .set("API_ACTION_PATH", api.path.action_path())
    .set("NAMESPACE_BEGIN", namespaces::namespace_begin(&api.path))
    .set("NAMESPACE_END", namespaces::namespace_end(&api.path))
    .set("NAMESPACE_DOCUMENTATION", api.path.action_documentation());

  slots
    .set("ADDITIONAL_CPP_SYSTEM_INCLUDES", includes::system_includes(&api.includes.system_cpp))
    .set("ADDITIONAL_CPP_LOCAL_INCLUDES", includes::local_includes(&api.includes.local_cpp))
    .set("ADDITIONAL_HPP_SYSTEM_INCLUDES", includes::system_includes(&api.includes.system_hpp))
    .set("ADDITIONAL_HPP_LOCAL_INCLUDES", includes::hpp_local_includes(classified))
    .set("API_REQUEST_BASE", request::request_base(api))
    .set("API_REQUEST_BASE_HEADER", request::request_base_header(api));

  slots
    .set("CLASS_MEMBER_VARS", members::class_member_vars(classified))
    .set("CPP_CTOR_ARGS", constructors::cpp_ctor_args(classified))
    .set("HPP_CTOR_ARGS", constructors::hpp_ctor_args(classified))
    .set("CTOR_INIT_VARS", constructors::ctor_init_vars(classified))
    .set("IMPL_PASSTHRU_ARGS", constructors::impl_passthru_args(classified))
    .set("EXPLICIT", constructors::explicit(classified))
    .set("HPP_CTOR_DOCUMENTATION", constructors::hpp_ctor_documentation(classified))
    .set("CPP_OPTIONAL_SETTERS", setters::cpp_optional_setters(classified))
    .set("HPP_OPTIONAL_SETTERS", setters::hpp_optional_setters(classified));

  slots
    .set("QUERY_PARTS_ARG", request::query_parts_arg(classified))
    .set("URL_CREATION", request::url_creation(classified))
    .set("CPP_POST_DATA_IMPL_DECL", request::post_data_impl_decl(classified))
    .set("CPP_POST_DATA_IMPL_DEF", request::post_data_impl_def(classified))
    .set("CPP_POST_DATA_TEMPLATE", request::cpp_post_data_template(classified))
    .set("HPP_POST_DATA_TEMPLATE", request::hpp_post_data_template(classified));

  slots
    .set("ENUMS", enums::enum_definitions(api))
    .set("AS_STRING_FUNCS", enums::as_string_funcs(classified, version))
    .set("DATA_TYPE_CTOR", response::data_type_ctor(classified))
    .set("DATA_TYPE_STRUCTS", structs::struct_definitions(classified))
    .set("DATA_TYPES", response::data_types(classified))
    .set("DATA_TYPE_STRUCT_EXTRACTORS", structs::struct_extractors(classified, version))
    .set("PR_OPT_ADT", response::parse_response_arg(classified))
    .set("CONTENT_PARSING", response::content_parsing(classified));

  // The session token snippets may use the same slots as the main templates.
  let (session_cpp, session_hpp) = if api.uses_session_token {
    (
      templates.session_token_cpp.render(&slots),
      templates.session_token_hpp.render(&slots),
    )
  } else {
    (String::new(), String::new())
  };
  slots
    .set("CPP_SESSION_TOKEN_TEMPLATE", session_cpp)
    .set("HPP_SESSION_TOKEN_TEMPLATE", session_hpp);

  slots
}
