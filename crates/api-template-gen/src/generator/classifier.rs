//! Resolution of field types against the document's own enums and structs,
//! and inference of the delivery method.

use std::sync::LazyLock;

use regex::Regex;

use super::{
  ast::{ApiDescription, EnumDef, HttpMethod, Parameter, ResponseField, Shape, StructDef},
  errors::GeneratorError,
};

static TEMPLATE_ARGUMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*<([^<>]*)>.*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeKind<'a> {
  /// Opaque type handled by the generic stringify/parse helpers.
  Scalar,
  Enum(&'a EnumDef),
  Struct(&'a StructDef),
}

impl<'a> TypeKind<'a> {
  pub(crate) fn resolve(api: &'a ApiDescription, cpp_type: &str) -> Self {
    if let Some(def) = api.find_enum(cpp_type) {
      Self::Enum(def)
    } else if let Some(def) = api.find_struct(cpp_type) {
      Self::Struct(def)
    } else {
      Self::Scalar
    }
  }
}

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedParam<'a> {
  pub param: &'a Parameter,
  /// Explicit tag, or the resolved delivery method.
  pub method: HttpMethod,
}

impl ClassifiedParam<'_> {
  pub(crate) fn is_string(&self) -> bool {
    self.param.cpp_type == "std::string"
  }
}

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedField<'a> {
  pub field: &'a ResponseField,
  pub kind: TypeKind<'a>,
}

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedStruct<'a> {
  pub def: &'a StructDef,
  pub members: Vec<ClassifiedField<'a>>,
}

/// A description with every type resolved and every unsupported combination
/// rejected.
#[derive(Debug, Clone)]
pub(crate) struct ClassifiedApi<'a> {
  pub api: &'a ApiDescription,
  pub delivery: HttpMethod,
  pub required: Vec<ClassifiedParam<'a>>,
  pub optional: Vec<ClassifiedParam<'a>>,
  pub returns: Vec<ClassifiedField<'a>>,
  pub structs: Vec<ClassifiedStruct<'a>>,
  /// Enums needing an `AsString` encoder, in definition order.
  pub encoded_enums: Vec<&'a EnumDef>,
}

impl<'a> ClassifiedApi<'a> {
  pub(crate) fn classify(api: &'a ApiDescription) -> Result<Self, GeneratorError> {
    let delivery = infer_delivery(api);

    let classify_params = |params: &'a [Parameter]| {
      params
        .iter()
        .map(|param| classify_param(api, param, delivery))
        .collect::<Result<Vec<_>, _>>()
    };
    let required = classify_params(&api.input_params)?;
    let optional = classify_params(&api.optional_input_params)?;

    let returns = api
      .return_params
      .iter()
      .map(|field| classify_field(api, field))
      .collect::<Result<Vec<_>, _>>()?;

    let structs = api
      .return_structs
      .iter()
      .map(|def| classify_struct(api, def))
      .collect::<Result<Vec<_>, _>>()?;

    let encoded_enums = api
      .enums
      .iter()
      .filter(|def| api.all_params().any(|param| mentions_type(&param.cpp_type, &def.name)))
      .collect();

    Ok(Self {
      api,
      delivery,
      required,
      optional,
      returns,
      structs,
      encoded_enums,
    })
  }

  pub(crate) fn params(&self) -> impl Iterator<Item = &ClassifiedParam<'a>> {
    self.required.iter().chain(&self.optional)
  }

  pub(crate) fn has_params_for(&self, method: HttpMethod) -> bool {
    self.params().any(|param| param.method == method)
  }
}

/// Explicit method, else POST when any parameter is tagged POST or a session
/// token is required, else GET.
pub(crate) fn infer_delivery(api: &ApiDescription) -> HttpMethod {
  if let Some(method) = api.delivery_method {
    return method;
  }
  if api.all_params().any(|param| param.http_method == Some(HttpMethod::Post)) || api.uses_session_token {
    return HttpMethod::Post;
  }
  HttpMethod::Get
}

/// The innermost template argument, e.g. `Color` for `std::vector<Color>`.
pub(crate) fn innermost_type_argument(cpp_type: &str) -> Option<&str> {
  TEMPLATE_ARGUMENT_RE
    .captures(cpp_type)
    .and_then(|captures| captures.get(1))
    .map(|argument| argument.as_str().trim())
    .filter(|argument| !argument.is_empty())
}

fn mentions_type(cpp_type: &str, name: &str) -> bool {
  cpp_type == name || innermost_type_argument(cpp_type) == Some(name)
}

fn classify_param<'a>(
  api: &'a ApiDescription,
  param: &'a Parameter,
  delivery: HttpMethod,
) -> Result<ClassifiedParam<'a>, GeneratorError> {
  if matches!(TypeKind::resolve(api, &param.cpp_type), TypeKind::Struct(_)) {
    return Err(GeneratorError::unsupported(
      &api.path.api_path(),
      &param.name,
      "has a struct type, which request parameters cannot carry",
    ));
  }

  Ok(ClassifiedParam {
    param,
    method: param.http_method.unwrap_or(delivery),
  })
}

fn classify_field<'a>(api: &'a ApiDescription, field: &'a ResponseField) -> Result<ClassifiedField<'a>, GeneratorError> {
  let kind = TypeKind::resolve(api, &field.cpp_type);
  let reason = match (kind, field.shape) {
    (TypeKind::Enum(_), Shape::List) => Some("is an enum array, which cannot be parsed"),
    (TypeKind::Struct(_), Shape::FirstOfList) => Some("reads the first element of a struct array, which cannot be parsed"),
    _ => None,
  };
  if let Some(reason) = reason {
    return Err(GeneratorError::unsupported(&api.path.api_path(), &field.name, reason));
  }

  Ok(ClassifiedField { field, kind })
}

fn classify_struct<'a>(api: &'a ApiDescription, def: &'a StructDef) -> Result<ClassifiedStruct<'a>, GeneratorError> {
  let members = def
    .members
    .iter()
    .map(|member| {
      let classified = classify_field(api, member)?;
      if matches!(classified.kind, TypeKind::Struct(_)) {
        return Err(GeneratorError::unsupported(
          &api.path.api_path(),
          &format!("{}.{}", def.name, member.name),
          "nests a struct inside a struct, which cannot be parsed",
        ));
      }
      Ok(classified)
    })
    .collect::<Result<Vec<_>, _>>()?;

  Ok(ClassifiedStruct { def, members })
}
