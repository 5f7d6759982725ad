use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde_json::Value;

use super::{Schema, Violation, ViolationKind, is_private_key, quote_value};

/// Values already seen per duplicate-forbidden key, within one array.
type Scope = HashMap<&'static str, HashSet<String>>;

/// Validates `document` against `schema`, returning every violation found.
///
/// An empty result means the document is valid.
pub(crate) fn validate(document: &Value, schema: &Schema) -> Vec<Violation> {
  let mut violations = vec![];
  let mut scopes = vec![Scope::new()];
  validate_node(document, schema, &[], &mut scopes, &mut violations);
  violations
}

fn validate_node(
  node: &Value,
  schema: &Schema,
  locator: &[String],
  scopes: &mut Vec<Scope>,
  violations: &mut Vec<Violation>,
) {
  let Some(object) = node.as_object() else {
    violations.push(Violation::new(locator, ViolationKind::NotAnObject));
    return;
  };

  for key in schema.required_keys() {
    if !object.contains_key(key) {
      violations.push(Violation::new(
        locator,
        ViolationKind::MissingField { key: key.to_string() },
      ));
    }
  }

  for key in object.keys() {
    if !schema.declares(key) && !is_private_key(key) {
      violations.push(Violation::new(
        locator,
        ViolationKind::UnexpectedField { key: key.clone() },
      ));
    }
  }

  for rule in &schema.fields {
    let Some(value) = object.get(rule.name) else {
      continue;
    };

    if let Some(validator) = rule.validator {
      violations.extend(validator(value).into_iter().map(|message| {
        Violation::new(
          locator,
          ViolationKind::InvalidValue {
            key: rule.name.to_string(),
            message,
          },
        )
      }));
    }

    if !rule.permitted.is_empty() && !rule.permitted.contains(value) {
      violations.push(Violation::new(
        locator,
        ViolationKind::DisallowedValue {
          key: rule.name.to_string(),
          value: quote_value(value),
          permitted: rule.permitted.iter().map(quote_value).join(", "),
        },
      ));
    }

    if rule.unique
      && let Some(scope) = scopes.last_mut()
      && !scope.entry(rule.name).or_default().insert(value.to_string())
    {
      violations.push(Violation::new(
        locator,
        ViolationKind::Duplicate {
          key: rule.name.to_string(),
          value: quote_value(value),
        },
      ));
    }
  }

  for rule in &schema.arrays {
    let Some(value) = object.get(rule.name) else {
      continue;
    };
    let Some(elements) = value.as_array() else {
      violations.push(Violation::new(
        locator,
        ViolationKind::NotAnArray {
          key: rule.name.to_string(),
        },
      ));
      continue;
    };
    let Some(child) = rule.child else {
      continue;
    };

    scopes.push(Scope::new());
    for (index, element) in elements.iter().enumerate() {
      let mut child_locator = locator.to_vec();
      child_locator.push(child.locator_for(element, rule.name, index));
      validate_node(element, child, &child_locator, scopes, violations);
    }
    scopes.pop();
  }
}
