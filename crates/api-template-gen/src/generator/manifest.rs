//! CMake list of every generated file, consumed by the C++ build.

use itertools::Itertools;

pub(crate) const DEFAULT_MANIFEST_NAME: &str = "GeneratedList.txt";

const HEADER: &str = "# This file is auto generated.  Do NOT edit by hand.\n";

/// Renders the manifest. Entries are sorted and de-duplicated so the file is
/// stable across runs and discovery orders.
pub(crate) fn render_manifest<S, H>(sources: S, headers: H) -> String
where
  S: IntoIterator,
  S::Item: AsRef<str>,
  H: IntoIterator,
  H::Item: AsRef<str>,
{
  format!(
    "{HEADER}\n{}\n{}",
    cmake_set("API_TEMPLATE_GENERATED_SOURCES", sources),
    cmake_set("API_TEMPLATE_GENERATED_HEADERS", headers)
  )
}

fn cmake_set<I>(variable: &str, entries: I) -> String
where
  I: IntoIterator,
  I::Item: AsRef<str>,
{
  let body: String = entries
    .into_iter()
    .map(|entry| entry.as_ref().to_string())
    .sorted()
    .dedup()
    .map(|entry| format!("    {entry}\n"))
    .collect();
  format!("set({variable}\n{body})\n")
}
