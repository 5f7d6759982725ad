use itertools::Itertools;

use crate::generator::naming::ApiPath;

/// Opening lines of the enclosing namespaces, each preceded by its
/// documentation when it has one.
pub(crate) fn namespace_begin(path: &ApiPath) -> String {
  path
    .namespace_levels()
    .into_iter()
    .flat_map(|(part, documentation)| {
      documentation
        .map(|doc| format!("/** {doc} */"))
        .into_iter()
        .chain(std::iter::once(format!("namespace {part} {{")))
    })
    .join("\n")
}

pub(crate) fn namespace_end(path: &ApiPath) -> String {
  path
    .namespace_parts()
    .iter()
    .rev()
    .map(|part| format!("}}  // namespace {part}"))
    .join("\n")
}
