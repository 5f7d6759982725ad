//! Wire form of a description document, as deserialized by serde.

use serde::Deserialize;
use serde_json::Value;

use super::{
  ApiDescription, EnumDef, EnumMember, HttpMethod, Includes, Parameter, Presence, ResponseField, Shape, StructDef,
};
use crate::generator::{errors::DocumentError, naming::ApiPath};

#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
  api: String,
  version: Value,
  session_token: Option<bool>,
  delivery_method: Option<HttpMethod>,
  #[serde(default)]
  default_version: bool,
  #[serde(default)]
  input_params: Vec<RawParameter>,
  #[serde(default)]
  optional_input_params: Vec<RawParameter>,
  #[serde(default)]
  return_params: Vec<RawResponseField>,
  #[serde(default)]
  enums: Vec<RawEnum>,
  #[serde(default)]
  return_structs: Vec<RawStruct>,
  #[serde(default)]
  system_cpp_includes: Vec<String>,
  #[serde(default)]
  local_cpp_includes: Vec<String>,
  #[serde(default)]
  system_hpp_includes: Vec<String>,
  #[serde(default)]
  local_hpp_includes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
  name: String,
  #[serde(rename = "type")]
  cpp_type: String,
  wire_path: String,
  http_method: Option<HttpMethod>,
  description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResponseField {
  name: String,
  #[serde(rename = "type")]
  cpp_type: String,
  wire_path: String,
  #[serde(default)]
  json_type: Shape,
  optional: Option<bool>,
  default_value: Option<Value>,
  description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnum {
  name: String,
  members: Vec<RawEnumMember>,
}

#[derive(Debug, Deserialize)]
struct RawEnumMember {
  name: String,
  wire_value: String,
  #[serde(default)]
  additional_wire_values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawStruct {
  name: String,
  members: Vec<RawResponseField>,
}

impl RawDocument {
  pub(crate) fn into_description(self) -> Result<ApiDescription, DocumentError> {
    let path = ApiPath::parse(&self.api)?;

    if self.delivery_method == Some(HttpMethod::Get)
      && let Some(param) = self
        .input_params
        .iter()
        .chain(&self.optional_input_params)
        .find(|param| param.http_method == Some(HttpMethod::Post))
    {
      return Err(DocumentError::ConflictingDelivery {
        param: param.name.clone(),
      });
    }

    Ok(ApiDescription {
      path,
      version: literal_text(&self.version),
      uses_session_token: self.session_token.unwrap_or(true),
      delivery_method: self.delivery_method,
      default_version: self.default_version,
      input_params: self.input_params.into_iter().map(Parameter::from).collect(),
      optional_input_params: self.optional_input_params.into_iter().map(Parameter::from).collect(),
      return_params: self.return_params.into_iter().map(ResponseField::from).collect(),
      enums: self.enums.into_iter().map(EnumDef::from).collect(),
      return_structs: self.return_structs.into_iter().map(StructDef::from).collect(),
      includes: Includes {
        system_cpp: self.system_cpp_includes,
        local_cpp: self.local_cpp_includes,
        system_hpp: self.system_hpp_includes,
        local_hpp: self.local_hpp_includes,
      },
    })
  }
}

impl From<RawParameter> for Parameter {
  fn from(raw: RawParameter) -> Self {
    Self {
      name: raw.name,
      cpp_type: raw.cpp_type,
      wire_path: raw.wire_path,
      http_method: raw.http_method,
      description: raw.description,
    }
  }
}

impl From<RawResponseField> for ResponseField {
  fn from(raw: RawResponseField) -> Self {
    // `optional: true` takes precedence over a default value.
    let presence = match (raw.optional, raw.default_value) {
      (Some(true), _) => Presence::OptionalNoDefault,
      (_, Some(value)) => Presence::OptionalWithDefault(literal_text(&value)),
      _ => Presence::Required,
    };

    Self {
      name: raw.name,
      cpp_type: raw.cpp_type,
      wire_path: raw.wire_path,
      shape: raw.json_type,
      presence,
      description: raw.description,
    }
  }
}

impl From<RawEnum> for EnumDef {
  fn from(raw: RawEnum) -> Self {
    Self {
      name: raw.name,
      members: raw
        .members
        .into_iter()
        .map(|member| EnumMember {
          name: member.name,
          wire_value: member.wire_value,
          additional_wire_values: member.additional_wire_values,
        })
        .collect(),
    }
  }
}

impl From<RawStruct> for StructDef {
  fn from(raw: RawStruct) -> Self {
    Self {
      name: raw.name,
      members: raw.members.into_iter().map(ResponseField::from).collect(),
    }
  }
}

/// Strings verbatim, numbers and booleans as their JSON text.
fn literal_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
