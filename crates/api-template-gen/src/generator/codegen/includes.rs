use crate::generator::{ast::HttpMethod, classifier::ClassifiedApi};

const SHARED_BUFFER_HEADER: &str = "sdk/http/shared_buffer.hpp";

pub(crate) fn system_includes(headers: &[String]) -> String {
  headers.iter().map(|header| format!("#include <{header}>\n")).collect()
}

pub(crate) fn local_includes(headers: &[String]) -> String {
  headers.iter().map(|header| format!("#include \"{header}\"\n")).collect()
}

/// Local interface includes, plus the shared buffer header that the POST
/// body accessor needs.
pub(crate) fn hpp_local_includes(api: &ClassifiedApi) -> String {
  let mut includes = local_includes(&api.api.includes.local_hpp);
  if api.delivery == HttpMethod::Post {
    includes.push_str(&format!("#include \"{SHARED_BUFFER_HEADER}\"\n"));
  }
  includes
}
