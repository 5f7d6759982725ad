mod struct_tests;

use serde_json::Value;

use crate::generator::{ast::ApiDescription, document::parse_document};

pub(super) fn describe(document: Value) -> ApiDescription {
  parse_document(&document.to_string()).unwrap()
}
