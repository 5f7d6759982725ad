use itertools::Itertools;

use crate::generator::classifier::ClassifiedApi;

fn typed_args(api: &ClassifiedApi) -> Vec<String> {
  api
    .required
    .iter()
    .map(|param| format!("{} {}", param.param.cpp_type, param.param.name))
    .collect()
}

/// One argument per line, closed at `closing` indentation.
fn arg_list(args: &[String], arg_indent: &str, closing_indent: &str) -> String {
  if args.is_empty() {
    return String::new();
  }
  format!(
    "\n{arg_indent}{}\n{closing_indent}",
    args.join(&format!(",\n{arg_indent}"))
  )
}

pub(crate) fn cpp_ctor_args(api: &ClassifiedApi) -> String {
  arg_list(&typed_args(api), "        ", "    ")
}

pub(crate) fn hpp_ctor_args(api: &ClassifiedApi) -> String {
  arg_list(&typed_args(api), "            ", "        ")
}

pub(crate) fn ctor_init_vars(api: &ClassifiedApi) -> String {
  if api.required.is_empty() {
    return String::new();
  }
  let initializers = api
    .required
    .iter()
    .map(|param| format!("{0}_({0})", param.param.name))
    .join(",\n    ");
  format!(" :\n    {initializers}")
}

pub(crate) fn impl_passthru_args(api: &ClassifiedApi) -> String {
  api.required.iter().map(|param| param.param.name.as_str()).join(", ")
}

/// Single-argument constructors are `explicit`.
pub(crate) fn explicit(api: &ClassifiedApi) -> &'static str {
  if api.required.len() == 1 { "explicit " } else { "" }
}

pub(crate) fn hpp_ctor_documentation(api: &ClassifiedApi) -> String {
  let mut doc = format!("/**\n     * API request \"{}\"\n", api.api.path.action_path());
  if !api.required.is_empty() {
    doc.push_str("     *\n");
    for param in &api.required {
      let description = param
        .param
        .description
        .clone()
        .unwrap_or_else(|| format!("API parameter \"{}\"", param.param.wire_path));
      doc.push_str(&format!("     * @param {} {description}\n", param.param.name));
    }
  }
  doc.push_str("     */");
  doc
}
