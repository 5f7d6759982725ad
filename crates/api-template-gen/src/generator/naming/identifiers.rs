use inflections::Inflect;

/// Namespace token of a version: `1.3` becomes `v1_3`.
pub(crate) fn version_token(version: &str) -> String {
  format!("v{}", version.replace('.', "_"))
}

/// Setter of an optional request parameter: `folder_key` becomes `SetFolderKey`.
pub(crate) fn setter_name(name: &str) -> String {
  format!("Set{}", name.to_pascal_case())
}

/// Base file name of one endpoint version, e.g. `get_info_v1_3`.
pub(crate) fn file_stem(name: &str, version_token: &str) -> String {
  format!("{name}_{version_token}")
}
