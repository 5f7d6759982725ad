use std::path::PathBuf;

use thiserror::Error;

use super::schema::Violation;

/// Problems confined to a single description document.
///
/// The document is skipped and reported; the run continues.
#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("File is not proper JSON: {message}")]
  Malformed { message: String },
  #[error("File contains errors")]
  Invalid { violations: Vec<Violation> },
  #[error("File could not be read: {source}")]
  Unreadable {
    #[source]
    source: std::io::Error,
  },
  #[error("File could not be converted at '{path}': {message}")]
  Conversion { path: String, message: String },
  #[error("API path '{path}' has no identifier segment")]
  EmptyPath { path: String },
  #[error("Parameter '{param}' is tagged POST but the request is delivered by GET")]
  ConflictingDelivery { param: String },
}

impl DocumentError {
  /// Detail lines printed beneath the headline.
  pub fn details(&self) -> Vec<String> {
    match self {
      Self::Invalid { violations } => violations.iter().map(ToString::to_string).collect(),
      Self::Malformed { .. }
      | Self::Unreadable { .. }
      | Self::Conversion { .. }
      | Self::EmptyPath { .. }
      | Self::ConflictingDelivery { .. } => vec![],
    }
  }
}

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("domain '{domain}' has more than one default version ({first} and {second})")]
  DuplicateDefaultVersion {
    domain: String,
    first: String,
    second: String,
  },
  #[error("unsupported configuration in '{api}': field '{field}' {reason}")]
  UnsupportedConfiguration { api: String, field: String, reason: String },
  #[error("source root '{}' does not exist", path.display())]
  MissingSourceRoot { path: PathBuf },
  #[error("failed to scan '{}': {source}", root.display())]
  Discovery {
    root: PathBuf,
    #[source]
    source: walkdir::Error,
  },
  #[error("I/O error on '{}': {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl GeneratorError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn unsupported(api: &str, field: &str, reason: impl Into<String>) -> Self {
    Self::UnsupportedConfiguration {
      api: api.to_string(),
      field: field.to_string(),
      reason: reason.into(),
    }
  }
}
