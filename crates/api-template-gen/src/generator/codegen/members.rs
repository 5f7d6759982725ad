use crate::generator::classifier::ClassifiedApi;

/// Member variables of the request implementation class.
///
/// Required parameters are stored as given, optional ones as
/// `boost::optional`.
pub(crate) fn class_member_vars(api: &ClassifiedApi) -> String {
  let required = api
    .required
    .iter()
    .map(|param| format!("    {} {}_;\n", param.param.cpp_type, param.param.name));
  let optional = api
    .optional
    .iter()
    .map(|param| format!("    boost::optional<{}> {}_;\n", param.param.cpp_type, param.param.name));
  required.chain(optional).collect()
}
