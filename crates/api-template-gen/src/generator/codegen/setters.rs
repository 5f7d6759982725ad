use crate::generator::{classifier::ClassifiedApi, naming::identifiers::setter_name};

/// Setter definitions forwarding to the implementation's optional members.
pub(crate) fn cpp_optional_setters(api: &ClassifiedApi) -> String {
  api
    .optional
    .iter()
    .map(|param| {
      let param = param.param;
      format!(
        "void Request::{}({} {name})\n{{\n    impl_->{name}_ = {name};\n}}\n\n",
        setter_name(&param.name),
        param.cpp_type,
        name = param.name,
      )
    })
    .collect()
}

pub(crate) fn hpp_optional_setters(api: &ClassifiedApi) -> String {
  api
    .optional
    .iter()
    .map(|param| {
      let param = param.param;
      let description = param
        .description
        .clone()
        .unwrap_or_else(|| format!("Set parameter \"{}\" in API request.", param.wire_path));
      format!(
        "    /**\n     * Optional API parameter \"{wire}\"\n     *\n     * @param {name} {description}\n     */\n    void {setter}({ty} {name});\n\n",
        wire = param.wire_path,
        name = param.name,
        setter = setter_name(&param.name),
        ty = param.cpp_type,
      )
    })
    .collect()
}
