//! Declarative validation of description documents.
//!
//! A [`Schema`] lists the fields and arrays an object may carry. The
//! validator walks a document against a schema and returns every
//! [`Violation`] it finds instead of stopping at the first one.

use std::fmt;

use bon::Builder;
use serde_json::Value;
use strum::Display;

pub(crate) mod rules;
pub(crate) mod validator;


pub(crate) use rules::DOCUMENT_SCHEMA;
pub(crate) use validator::validate;

/// Keys starting with this prefix are comments and never validated.
pub(crate) const PRIVATE_PREFIX: char = '_';

/// Returns a message per problem found in the value.
pub(crate) type FieldValidator = fn(&Value) -> Vec<String>;

#[derive(Builder)]
pub(crate) struct FieldRule {
  #[builder(start_fn)]
  pub name: &'static str,
  #[builder(default)]
  pub required: bool,
  /// Empty means unrestricted.
  #[builder(default)]
  pub permitted: Vec<Value>,
  pub validator: Option<FieldValidator>,
  #[builder(default)]
  pub unique: bool,
  #[builder(default)]
  pub identifying: bool,
}

#[derive(Builder)]
pub(crate) struct ArrayRule {
  #[builder(start_fn)]
  pub name: &'static str,
  #[builder(default)]
  pub required: bool,
  pub child: Option<&'static Schema>,
}

pub(crate) struct Schema {
  pub fields: Vec<FieldRule>,
  pub arrays: Vec<ArrayRule>,
}

impl Schema {
  pub(crate) fn new(fields: Vec<FieldRule>, arrays: Vec<ArrayRule>) -> Self {
    Self { fields, arrays }
  }

  pub(crate) fn declares(&self, key: &str) -> bool {
    self.fields.iter().any(|rule| rule.name == key) || self.arrays.iter().any(|rule| rule.name == key)
  }

  pub(crate) fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
    let fields = self.fields.iter().filter(|rule| rule.required).map(|rule| rule.name);
    let arrays = self.arrays.iter().filter(|rule| rule.required).map(|rule| rule.name);
    fields.chain(arrays)
  }

  /// Human readable locator for an element of `array`: the value of the
  /// first identifying field, or the 1-based position.
  pub(crate) fn locator_for(&self, element: &Value, array: &str, index: usize) -> String {
    self
      .fields
      .iter()
      .filter(|rule| rule.identifying)
      .find_map(|rule| element.get(rule.name))
      .map_or_else(|| format!("'{array}' #{}", index + 1), quote_value)
  }
}

pub(crate) fn is_private_key(key: &str) -> bool {
  key.starts_with(PRIVATE_PREFIX)
}

/// Single-quotes a JSON value for messages: strings bare, others as JSON text.
pub(crate) fn quote_value(value: &Value) -> String {
  match value {
    Value::String(text) => format!("'{text}'"),
    other => format!("'{other}'"),
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ViolationKind {
  #[strum(to_string = "Missing parameter \"{key}\"")]
  MissingField { key: String },
  #[strum(to_string = "Unexpected parameter \"{key}\"")]
  UnexpectedField { key: String },
  #[strum(to_string = "'{key}' does not accept {value} (acceptable values: {permitted})")]
  DisallowedValue { key: String, value: String, permitted: String },
  #[strum(to_string = "Duplicate field '{key}' with value {value}")]
  Duplicate { key: String, value: String },
  #[strum(to_string = "'{key}' {message}")]
  InvalidValue { key: String, message: String },
  #[strum(to_string = "'{key}' must be an array")]
  NotAnArray { key: String },
  #[strum(to_string = "Expected an object")]
  NotAnObject,
}

/// One schema problem, prefixed by the chain of element locators leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  pub locator: Vec<String>,
  pub kind: ViolationKind,
}

impl Violation {
  pub(crate) fn new(locator: &[String], kind: ViolationKind) -> Self {
    Self {
      locator: locator.to_vec(),
      kind,
    }
  }
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.locator.is_empty() {
      write!(f, "{}", self.kind)
    } else {
      write!(f, "{}: {}", self.locator.join(" "), self.kind)
    }
  }
}
