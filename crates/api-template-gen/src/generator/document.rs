//! Loading of description documents: JSON syntax, schema, then typed model.

use std::{fs, path::Path};

use serde_json::Value;

use super::{
  ast::{ApiDescription, raw::RawDocument},
  errors::DocumentError,
  schema::{DOCUMENT_SCHEMA, validate},
};

pub(crate) fn read_document(path: &Path) -> Result<ApiDescription, DocumentError> {
  let text = fs::read_to_string(path).map_err(|source| DocumentError::Unreadable { source })?;
  parse_document(&text)
}

/// Parses and validates one document.
///
/// Schema violations are collected in full before the document is rejected,
/// so a single run reports everything wrong with it.
pub(crate) fn parse_document(text: &str) -> Result<ApiDescription, DocumentError> {
  let value: Value = serde_json::from_str(text).map_err(|err| DocumentError::Malformed {
    message: err.to_string(),
  })?;

  let violations = validate(&value, &DOCUMENT_SCHEMA);
  if !violations.is_empty() {
    return Err(DocumentError::Invalid { violations });
  }

  let raw: RawDocument = serde_path_to_error::deserialize(value).map_err(|err| DocumentError::Conversion {
    path: err.path().to_string(),
    message: err.into_inner().to_string(),
  })?;
  raw.into_description()
}
