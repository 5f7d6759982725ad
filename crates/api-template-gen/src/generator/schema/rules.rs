use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::{ArrayRule, FieldRule, Schema};

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

fn http_methods() -> Vec<Value> {
  vec![json!("GET"), json!("POST")]
}

fn json_types() -> Vec<Value> {
  vec![json!("single"), json!("array"), json!("array_front")]
}

fn booleans() -> Vec<Value> {
  vec![json!(true), json!(false)]
}

pub(crate) fn validate_api_path(value: &Value) -> Vec<String> {
  let Some(path) = value.as_str() else {
    return vec!["must be a string".to_string()];
  };
  if !path.starts_with('/') {
    return vec![format!("must start with '/': '{path}'")];
  }

  let mut problems = vec![];
  let mut identifier_segments = 0;
  for segment in path.split('/').filter(|segment| !segment.is_empty()) {
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
      continue;
    }
    identifier_segments += 1;
    if !IDENTIFIER_RE.is_match(segment) {
      problems.push(format!("segment '{segment}' is not identifier-safe"));
    }
  }
  if identifier_segments == 0 {
    problems.push(format!("has no identifier segment: '{path}'"));
  }
  problems
}

pub(crate) fn validate_version(value: &Value) -> Vec<String> {
  match value {
    Value::String(version) if version.is_empty() => vec!["must not be empty".to_string()],
    Value::String(_) | Value::Number(_) => vec![],
    _ => vec!["must be a string or a number".to_string()],
  }
}

pub(crate) fn validate_identifier(value: &Value) -> Vec<String> {
  match value.as_str() {
    Some(name) if IDENTIFIER_RE.is_match(name) => vec![],
    Some(name) => vec![format!("is not a valid identifier: '{name}'")],
    None => vec!["must be a string".to_string()],
  }
}

pub(crate) fn validate_non_empty_string(value: &Value) -> Vec<String> {
  match value.as_str() {
    Some(text) if !text.trim().is_empty() => vec![],
    Some(_) => vec!["must not be empty".to_string()],
    None => vec!["must be a string".to_string()],
  }
}

pub(crate) fn validate_text(value: &Value) -> Vec<String> {
  if value.is_string() {
    vec![]
  } else {
    vec!["must be a string".to_string()]
  }
}

pub(crate) fn validate_literal(value: &Value) -> Vec<String> {
  match value {
    Value::String(_) | Value::Number(_) | Value::Bool(_) => vec![],
    _ => vec!["must be a string, number or boolean".to_string()],
  }
}

pub(crate) fn validate_string_array(value: &Value) -> Vec<String> {
  let Some(items) = value.as_array() else {
    return vec!["must be an array of strings".to_string()];
  };
  items
    .iter()
    .enumerate()
    .filter(|(_, item)| !item.is_string())
    .map(|(index, item)| format!("entry #{} is not a string: {item}", index + 1))
    .collect()
}

fn name_field() -> FieldRule {
  FieldRule::builder("name")
    .required(true)
    .unique(true)
    .identifying(true)
    .validator(validate_identifier)
    .build()
}

fn type_field() -> FieldRule {
  FieldRule::builder("type")
    .required(true)
    .validator(validate_non_empty_string)
    .build()
}

fn wire_path_field() -> FieldRule {
  FieldRule::builder("wire_path")
    .required(true)
    .unique(true)
    .validator(validate_non_empty_string)
    .build()
}

fn description_field() -> FieldRule {
  FieldRule::builder("description").validator(validate_text).build()
}

/// Request parameters, required and optional alike.
pub(crate) static PARAMETER_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  Schema::new(
    vec![
      name_field(),
      type_field(),
      wire_path_field(),
      FieldRule::builder("http_method").permitted(http_methods()).build(),
      description_field(),
    ],
    vec![],
  )
});

/// Response fields, at the top level and inside return structs.
pub(crate) static RESPONSE_FIELD_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  Schema::new(
    vec![
      name_field(),
      type_field(),
      wire_path_field(),
      FieldRule::builder("json_type").permitted(json_types()).build(),
      FieldRule::builder("optional").permitted(vec![json!(true)]).build(),
      FieldRule::builder("default_value").validator(validate_literal).build(),
      description_field(),
    ],
    vec![],
  )
});

pub(crate) static ENUM_MEMBER_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  Schema::new(
    vec![
      name_field(),
      FieldRule::builder("wire_value")
        .required(true)
        .unique(true)
        .validator(validate_text)
        .build(),
      FieldRule::builder("additional_wire_values")
        .validator(validate_string_array)
        .build(),
    ],
    vec![],
  )
});

pub(crate) static ENUM_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  Schema::new(
    vec![name_field()],
    vec![
      ArrayRule::builder("members")
        .required(true)
        .child(&ENUM_MEMBER_SCHEMA)
        .build(),
    ],
  )
});

pub(crate) static STRUCT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  Schema::new(
    vec![name_field()],
    vec![
      ArrayRule::builder("members")
        .required(true)
        .child(&RESPONSE_FIELD_SCHEMA)
        .build(),
    ],
  )
});

/// Top level of a description document.
pub(crate) static DOCUMENT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
  let include_list = |name| FieldRule::builder(name).validator(validate_string_array).build();

  Schema::new(
    vec![
      FieldRule::builder("api").required(true).validator(validate_api_path).build(),
      FieldRule::builder("version")
        .required(true)
        .validator(validate_version)
        .build(),
      FieldRule::builder("session_token").permitted(booleans()).build(),
      FieldRule::builder("delivery_method").permitted(http_methods()).build(),
      FieldRule::builder("default_version").permitted(booleans()).build(),
      include_list("system_cpp_includes"),
      include_list("local_cpp_includes"),
      include_list("system_hpp_includes"),
      include_list("local_hpp_includes"),
    ],
    vec![
      ArrayRule::builder("enums").child(&ENUM_SCHEMA).build(),
      ArrayRule::builder("return_structs").child(&STRUCT_SCHEMA).build(),
      ArrayRule::builder("input_params").child(&PARAMETER_SCHEMA).build(),
      ArrayRule::builder("optional_input_params").child(&PARAMETER_SCHEMA).build(),
      ArrayRule::builder("return_params").child(&RESPONSE_FIELD_SCHEMA).build(),
    ],
  )
});
