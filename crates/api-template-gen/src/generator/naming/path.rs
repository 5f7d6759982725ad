use crate::generator::errors::DocumentError;

/// Segments that are C++ keywords keep their spelling on the wire but are
/// prefixed with the preceding segment in identifiers.
const RESERVED_SEGMENTS: &[&str] = &["delete", "register"];

const API_PREFIX: &str = "api";

/// A slash-delimited API path split into its wire and identifier forms.
///
/// `/api/1.3/file/delete` keeps all four segments on the wire, while the
/// identifier chain is `api`, `file`, `file_delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
  wire: Vec<String>,
  safe: Vec<String>,
}

impl ApiPath {
  pub fn parse(raw: &str) -> Result<Self, DocumentError> {
    let mut wire = vec![];
    let mut safe = vec![];
    let mut previous: Option<&str> = None;

    for segment in raw.split('/').filter(|segment| !segment.is_empty()) {
      wire.push(segment.to_string());
      if is_version_marker(segment) {
        continue;
      }
      if RESERVED_SEGMENTS.contains(&segment) {
        safe.push(format!("{}_{segment}", previous.unwrap_or_default()));
      } else {
        safe.push(segment.to_string());
      }
      previous = Some(segment);
    }

    if safe.is_empty() {
      return Err(DocumentError::EmptyPath { path: raw.to_string() });
    }
    Ok(Self { wire, safe })
  }

  /// Wire path, e.g. `/api/1.3/file/delete`.
  pub fn api_path(&self) -> String {
    format!("/{}", self.wire.join("/"))
  }

  /// Wire path without version markers and without the leading `api/`.
  pub fn action_path(&self) -> String {
    let path = self
      .wire
      .iter()
      .filter(|segment| !is_version_marker(segment))
      .map(String::as_str)
      .collect::<Vec<_>>()
      .join("/");
    match path.strip_prefix("api/") {
      Some(stripped) => stripped.to_string(),
      None => path,
    }
  }

  pub fn safe_segments(&self) -> &[String] {
    &self.safe
  }

  /// Last identifier segment; names the innermost namespace and the files.
  pub fn name(&self) -> &str {
    self.safe.last().map_or("", String::as_str)
  }

  pub fn namespace_parts(&self) -> &[String] {
    &self.safe[..self.safe.len().saturating_sub(1)]
  }

  /// Key shared by every version of one endpoint.
  pub fn domain(&self) -> String {
    self.safe_segments().join("/")
  }

  /// Output directory of the endpoint files, relative to the destination.
  pub fn directory(&self) -> String {
    self.namespace_parts().join("/")
  }

  /// Namespace chain below `sdk`, e.g. `api::file::file_delete`.
  pub fn qualified_name(&self) -> String {
    self.safe_segments().join("::")
  }

  /// Documentation of the innermost namespace.
  pub fn action_documentation(&self) -> String {
    let parts = self
      .safe
      .iter()
      .filter(|part| part.as_str() != API_PREFIX)
      .map(String::as_str)
      .collect::<Vec<_>>();
    format!("API action \"{}\"", parts.join("/"))
  }

  /// Documentation of the version namespace.
  pub fn path_documentation(&self) -> String {
    format!("API path \"{}\"", self.api_path())
  }

  /// One `(namespace, documentation)` pair per enclosing namespace level.
  ///
  /// The `api` level carries no documentation.
  pub fn namespace_levels(&self) -> Vec<(&str, Option<String>)> {
    let mut documented = vec![];
    self
      .namespace_parts()
      .iter()
      .map(|part| {
        if part == API_PREFIX {
          return (part.as_str(), None);
        }
        documented.push(part.as_str());
        (part.as_str(), Some(format!("API action path \"{}\"", documented.join("/"))))
      })
      .collect()
  }
}

fn is_version_marker(segment: &str) -> bool {
  segment.starts_with(|c: char| c.is_ascii_digit())
}
