//! Typed view of a validated description document.
//!
//! Values here are built once by [`crate::generator::document`] and never
//! mutated afterwards.

pub(crate) mod raw;

#[cfg(test)]
mod tests;

use bon::Builder;
use serde::Deserialize;

use crate::generator::naming::ApiPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
}

/// How a response field is laid out on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Shape {
  #[default]
  #[serde(rename = "single")]
  Single,
  #[serde(rename = "array")]
  List,
  /// An array of which only the first element is read.
  #[serde(rename = "array_front")]
  FirstOfList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Presence {
  #[default]
  Required,
  OptionalNoDefault,
  /// Pre-seeded with the literal before parsing.
  OptionalWithDefault(String),
}

impl Presence {
  pub fn is_required(&self) -> bool {
    matches!(self, Self::Required)
  }

  pub fn default_value(&self) -> Option<&str> {
    match self {
      Self::OptionalWithDefault(value) => Some(value),
      Self::Required | Self::OptionalNoDefault => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Parameter {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub cpp_type: String,
  #[builder(into)]
  pub wire_path: String,
  /// Explicit tag; untagged parameters follow the resolved delivery method.
  pub http_method: Option<HttpMethod>,
  #[builder(into)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ResponseField {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub cpp_type: String,
  #[builder(into)]
  pub wire_path: String,
  #[builder(default)]
  pub shape: Shape,
  #[builder(default)]
  pub presence: Presence,
  #[builder(into)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
  pub name: String,
  pub wire_value: String,
  /// Accepted when decoding, never emitted.
  pub additional_wire_values: Vec<String>,
}

impl EnumMember {
  pub fn wire_values(&self) -> impl Iterator<Item = &str> {
    std::iter::once(self.wire_value.as_str()).chain(self.additional_wire_values.iter().map(String::as_str))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
  pub name: String,
  pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
  pub name: String,
  pub members: Vec<ResponseField>,
}

/// Extra `#include` lines requested by the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Includes {
  pub system_cpp: Vec<String>,
  pub local_cpp: Vec<String>,
  pub system_hpp: Vec<String>,
  pub local_hpp: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ApiDescription {
  pub path: ApiPath,
  #[builder(into)]
  pub version: String,
  #[builder(default = true)]
  pub uses_session_token: bool,
  /// `None` when the document leaves the method to inference.
  pub delivery_method: Option<HttpMethod>,
  #[builder(default)]
  pub default_version: bool,
  #[builder(default)]
  pub input_params: Vec<Parameter>,
  #[builder(default)]
  pub optional_input_params: Vec<Parameter>,
  #[builder(default)]
  pub return_params: Vec<ResponseField>,
  #[builder(default)]
  pub enums: Vec<EnumDef>,
  #[builder(default)]
  pub return_structs: Vec<StructDef>,
  #[builder(default)]
  pub includes: Includes,
}

impl ApiDescription {
  pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
    self.enums.iter().find(|def| def.name == name)
  }

  pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
    self.return_structs.iter().find(|def| def.name == name)
  }

  /// Required parameters first, then optional ones.
  pub fn all_params(&self) -> impl Iterator<Item = &Parameter> {
    self.input_params.iter().chain(&self.optional_input_params)
  }
}
