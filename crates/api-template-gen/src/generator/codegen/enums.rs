use itertools::Itertools;

use super::doc_line;
use crate::generator::{
  ast::{ApiDescription, EnumDef},
  classifier::ClassifiedApi,
};

/// `enum class` definitions for every enum in the document.
pub(crate) fn enum_definitions(api: &ApiDescription) -> String {
  if api.enums.is_empty() {
    return String::new();
  }
  format!("\n{}", api.enums.iter().map(enum_definition).join("\n"))
}

fn enum_definition(def: &EnumDef) -> String {
  let last = def.members.len().saturating_sub(1);
  let members = def
    .members
    .iter()
    .enumerate()
    .map(|(index, member)| {
      let separator = if index == last { "" } else { "," };
      format!(
        "{}    {}{separator}\n",
        doc_line(1, &format!("API value \"{}\"", member.wire_value)),
        member.name
      )
    })
    .collect::<String>();
  format!("enum class {}\n{{\n{members}}};\n", def.name)
}

/// `AsString` encoders for the enums used by request parameters.
///
/// Aliases are decode-only and never emitted. The ordinal fallback is only
/// reached for values outside the declared members.
pub(crate) fn as_string_funcs(api: &ClassifiedApi, version: &str) -> String {
  if api.encoded_enums.is_empty() {
    return String::new();
  }
  let funcs = api
    .encoded_enums
    .iter()
    .map(|def| as_string_func(def, version))
    .join("\n");
  format!("\nnamespace {{\n{funcs}\n}}  // namespace\n")
}

fn as_string_func(def: &EnumDef, version: &str) -> String {
  let qualified = format!("{version}::{}", def.name);
  let mut lines = vec![
    format!("std::string AsString(const {qualified} & value)"),
    "{".to_string(),
  ];
  for member in &def.members {
    lines.push(format!("    if (value == {qualified}::{})", member.name));
    lines.push(format!("        return \"{}\";", member.wire_value));
  }
  lines.push("    return sdk::utils::to_string(static_cast<uint32_t>(value));".to_string());
  lines.push("}".to_string());
  lines.join("\n")
}
