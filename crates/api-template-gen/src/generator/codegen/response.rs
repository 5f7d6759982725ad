//! Response side: data members of `Response` and the code filling them from
//! the parsed property tree.

use itertools::Itertools;

use super::{CONTENT_INVALID, doc_line, indent};
use crate::generator::{
  ast::{EnumDef, Presence, ResponseField, Shape, StructDef},
  classifier::{ClassifiedApi, ClassifiedField, TypeKind},
};

/// Argument name of `ParseResponse`; commented out when nothing is parsed.
pub(crate) fn parse_response_arg(api: &ClassifiedApi) -> &'static str {
  if api.returns.is_empty() {
    "/* response */"
  } else {
    "response"
  }
}

pub(crate) fn content_parsing(api: &ClassifiedApi) -> String {
  parse_branch(&api.returns, "response", "response->pt")
}

/// Default constructor seeding fields that carry a default value.
pub(crate) fn data_type_ctor(api: &ClassifiedApi) -> String {
  let initializers = api
    .returns
    .iter()
    .filter_map(|field| default_expression(field).map(|value| format!("{}({value})", field.field.name)))
    .collect::<Vec<_>>();
  if initializers.is_empty() {
    return String::new();
  }
  format!("    Response() :\n        {}\n    {{}}\n", initializers.join(",\n        "))
}

pub(crate) fn data_types(api: &ClassifiedApi) -> String {
  api.returns.iter().map(|field| data_member(1, field.field)).join("\n")
}

/// Documented declaration of one response field at `level`.
pub(crate) fn data_member(level: usize, field: &ResponseField) -> String {
  let description = field
    .description
    .clone()
    .unwrap_or_else(|| format!("API response field \"{}\"", field.wire_path));
  let declared_type = match (&field.shape, &field.presence) {
    (Shape::List, _) => format!("std::vector<{}>", field.cpp_type),
    (_, Presence::OptionalNoDefault) => format!("boost::optional<{}>", field.cpp_type),
    _ => field.cpp_type.clone(),
  };
  format!(
    "{}{}{declared_type} {};\n",
    doc_line(level, &description),
    indent(level),
    field.name
  )
}

/// Parsing code for `fields` into `object` (a pointer) from `tree`.
///
/// Defaults are assigned first so that a present wire value overwrites them.
pub(crate) fn parse_branch(fields: &[ClassifiedField], object: &str, tree: &str) -> String {
  let seeds = fields.iter().filter_map(|field| {
    default_expression(field).map(|value| format!("    {object}->{} = {value};", field.field.name))
  });
  let parsers = fields.iter().map(|field| parse_field(field, object, tree));
  seeds.chain(parsers).join("\n")
}

/// The default literal, qualified by the enum name for enum fields.
fn default_expression(field: &ClassifiedField) -> Option<String> {
  let value = field.field.presence.default_value()?;
  Some(match field.kind {
    TypeKind::Enum(def) => format!("{}::{value}", def.name),
    TypeKind::Scalar | TypeKind::Struct(_) => value.to_string(),
  })
}

fn parse_field(field: &ClassifiedField, object: &str, tree: &str) -> String {
  let target = Target {
    field: field.field,
    object,
    tree,
  };
  match (field.kind, field.field.shape) {
    (TypeKind::Enum(def), Shape::Single) => target.enum_value(def, "GetIfExists"),
    (TypeKind::Enum(def), Shape::FirstOfList) => target.enum_value(def, "GetIfExistsArrayFront"),
    (TypeKind::Struct(def), Shape::Single) => target.struct_value(def),
    (TypeKind::Struct(def), Shape::List) => target.struct_list(def),
    (TypeKind::Scalar, Shape::Single) => target.scalar_value("GetIfExists"),
    (TypeKind::Scalar, Shape::FirstOfList) => target.scalar_value("GetIfExistsArrayFront"),
    (TypeKind::Scalar, Shape::List) => target.scalar_list(),
    // Rejected during classification.
    (TypeKind::Enum(_), Shape::List) | (TypeKind::Struct(_), Shape::FirstOfList) => String::new(),
  }
}

struct Target<'a> {
  field: &'a ResponseField,
  object: &'a str,
  tree: &'a str,
}

impl Target<'_> {
  fn marker(&self) -> String {
    let shape = match self.field.shape {
      Shape::Single => "value",
      Shape::List => "array",
      Shape::FirstOfList => "first array element",
    };
    let presence = match self.field.presence {
      Presence::Required => "required",
      Presence::OptionalNoDefault => "optional",
      Presence::OptionalWithDefault(_) => "optional with default",
    };
    format!("// \"{}\": {shape}, {presence}", self.field.wire_path)
  }

  fn missing_error(&self, level: usize) -> String {
    let outer = indent(level);
    let inner = indent(level + 1);
    format!(
      "{outer}return_error(\n{inner}{CONTENT_INVALID},\n{inner}\"missing \\\"{}\\\"\");",
      self.field.wire_path
    )
  }

  fn error(&self, level: usize, message: &str) -> String {
    let outer = indent(level);
    let inner = indent(level + 1);
    format!(
      "{outer}return_error(\n{inner}{CONTENT_INVALID},\n{inner}\"{message} {}\");",
      self.field.wire_path
    )
  }

  fn bad_path_handler(&self) -> String {
    let body = if self.field.presence.is_required() {
      self.missing_error(2)
    } else {
      "        // The value is optional.".to_string()
    };
    format!("    catch(boost::property_tree::ptree_bad_path & err)\n    {{\n{body}\n    }}")
  }

  fn scalar_value(&self, getter: &str) -> String {
    let Self { field, object, tree } = self;
    let (name, wire, marker) = (&field.name, &field.wire_path, self.marker());
    match field.presence {
      Presence::OptionalWithDefault(_) => format!(
        "\n    {marker}\n    {getter}(\n            {tree},\n            \"{wire}\",\n            &{object}->{name});"
      ),
      Presence::OptionalNoDefault => format!(
        "\n    {marker}\n    {{\n        {} optarg;\n        if ( {getter}(\n                {tree},\n                \"{wire}\",\n                &optarg) )\n        {{\n            {object}->{name} = optarg;\n        }}\n    }}",
        field.cpp_type
      ),
      Presence::Required => format!(
        "\n    {marker}\n    if ( ! {getter}(\n            {tree},\n            \"{wire}\",\n            &{object}->{name} ) )\n{}",
        self.missing_error(2)
      ),
    }
  }

  fn branch_lookup(&self) -> String {
    format!(
      "    try {{\n        const boost::property_tree::wptree & branch =\n            {}.get_child(L\"{}\");\n",
      self.tree, self.field.wire_path
    )
  }

  fn empty_branch_check(&self) -> String {
    if self.field.presence.is_required() {
      format!(
        "        if (branch.empty())\n        {{\n{}\n        }}\n",
        self.error(3, "missing value in")
      )
    } else {
      String::new()
    }
  }

  /// What happens to an element that fails to parse: the whole parse fails
  /// for required fields, accumulation stops for optional ones.
  fn element_failure(&self) -> String {
    if self.field.presence.is_required() {
      self.error(4, "invalid value in")
    } else {
      "                break;".to_string()
    }
  }

  fn scalar_list(&self) -> String {
    let (object, name) = (self.object, &self.field.name);
    format!(
      "\n    {marker}\n{lookup}        {object}->{name}.reserve( branch.size() );\n{empty}        for ( auto & it : branch )\n        {{\n            {ty} result;\n            if ( GetValueIfExists(\n                    it.second,\n                    &result ) )\n            {{\n                {object}->{name}.push_back(result);\n            }}\n            else\n            {{\n{failure}\n            }}\n        }}\n    }}\n{handler}",
      marker = self.marker(),
      lookup = self.branch_lookup(),
      empty = self.empty_branch_check(),
      ty = self.field.cpp_type,
      failure = self.element_failure(),
      handler = self.bad_path_handler(),
    )
  }

  fn struct_list(&self, def: &StructDef) -> String {
    let (object, name) = (self.object, &self.field.name);
    format!(
      "\n    {marker}\n{lookup}{empty}        {object}->{name}.reserve( branch.size() );\n\n        for ( auto & it : branch )\n        {{\n            Response::{ty} optarg;\n            if ( {ty}FromPropertyBranch(\n                    response, &optarg, it.second) )\n            {{\n                {object}->{name}.push_back(std::move(optarg));\n            }}\n            else\n            {{\n{failure}\n            }}\n        }}\n    }}\n{handler}",
      marker = self.marker(),
      lookup = self.branch_lookup(),
      empty = self.empty_branch_check(),
      ty = def.name,
      failure = self.element_failure(),
      handler = self.bad_path_handler(),
    )
  }

  fn struct_value(&self, def: &StructDef) -> String {
    let (object, name) = (self.object, &self.field.name);
    let otherwise = if self.field.presence.is_required() {
      format!("\n        else\n        {{\n{}\n        }}", self.missing_error(3))
    } else {
      String::new()
    };
    format!(
      "\n    {marker}\n{lookup}\n        Response::{ty} optarg;\n        if ( {ty}FromPropertyBranch(\n                response, &optarg, branch) )\n        {{\n            {object}->{name} = std::move(optarg);\n        }}{otherwise}\n    }}\n{handler}",
      marker = self.marker(),
      lookup = self.branch_lookup(),
      ty = def.name,
      handler = self.bad_path_handler(),
    )
  }

  /// Matches the wire string against every member's primary value and
  /// aliases, first match wins.
  fn enum_value(&self, def: &EnumDef, getter: &str) -> String {
    let (object, name, wire) = (self.object, &self.field.name, &self.field.wire_path);
    let required = self.field.presence.is_required();

    let cases = def
      .members
      .iter()
      .flat_map(|member| {
        member.wire_values().map(move |value| {
          format!(
            "if ( optval == \"{value}\" )\n                {object}->{name} = {}::{};",
            def.name, member.name
          )
        })
      })
      .collect::<Vec<_>>();

    let matching = match (cases.is_empty(), required) {
      (true, true) => self.error(3, "invalid value in"),
      (true, false) => String::new(),
      (false, true) => format!(
        "            {}\n            else\n{}",
        cases.join("\n            else "),
        self.error(4, "invalid value in")
      ),
      (false, false) => format!("            {}", cases.join("\n            else ")),
    };
    let absent = if required {
      format!("\n        else\n{}", self.error(3, "no value in"))
    } else {
      String::new()
    };

    format!(
      "\n    {{\n        std::string optval;\n        {marker}\n        if ( {getter}(\n                {tree},\n                \"{wire}\",\n                &optval) )\n        {{\n{matching}\n        }}{absent}\n    }}",
      marker = self.marker(),
      tree = self.tree,
    )
  }
}
