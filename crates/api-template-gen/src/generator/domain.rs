//! Per-domain bookkeeping and the aggregation header selecting a default
//! version.

use indexmap::IndexMap;
use itertools::Itertools;

use super::{
  codegen::namespaces,
  errors::GeneratorError,
  naming::ApiPath,
  template::{Slots, Template},
};

/// What one generated document contributes to its domain.
#[derive(Debug, Clone)]
pub(crate) struct DomainEntry {
  pub path: ApiPath,
  /// Interface file, relative to the destination root.
  pub header: String,
  pub version_token: String,
  pub is_default: bool,
}

#[derive(Debug, Clone)]
struct Domain {
  path: ApiPath,
  headers: Vec<String>,
  version_tokens: Vec<String>,
  /// Version token and interface file of the explicitly marked default.
  default: Option<(String, String)>,
}

impl Domain {
  /// The explicit default, else the last version token in lexicographic
  /// order, so `v1_9` wins over `v1_10`.
  fn selected_version(&self) -> Option<&str> {
    if let Some((token, _)) = &self.default {
      return Some(token);
    }
    self.version_tokens.iter().max().map(String::as_str)
  }

  /// Interface files relative to the aggregation header's directory.
  fn includes(&self) -> String {
    let directory = self.path.directory();
    let prefix = format!("{directory}/");
    self
      .headers
      .iter()
      .sorted()
      .dedup()
      .map(|header| {
        let relative = if directory.is_empty() {
          header.as_str()
        } else {
          header.strip_prefix(&prefix).unwrap_or(header.as_str())
        };
        format!("#include \"{relative}\"\n")
      })
      .collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AggregationHeader {
  /// Relative to the destination root.
  pub path: String,
  pub contents: String,
}

#[derive(Debug, Default)]
pub(crate) struct DomainRegistry {
  domains: IndexMap<String, Domain>,
}

impl DomainRegistry {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn len(&self) -> usize {
    self.domains.len()
  }

  /// Adds a document to its domain. A second default in one domain is
  /// rejected here, before any aggregation header exists.
  pub(crate) fn record(&mut self, entry: DomainEntry) -> Result<(), GeneratorError> {
    let key = entry.path.domain();
    let domain = self.domains.entry(key.clone()).or_insert_with(|| Domain {
      path: entry.path.clone(),
      headers: vec![],
      version_tokens: vec![],
      default: None,
    });

    if entry.is_default {
      if let Some((_, first)) = &domain.default {
        return Err(GeneratorError::DuplicateDefaultVersion {
          domain: key,
          first: first.clone(),
          second: entry.header,
        });
      }
      domain.default = Some((entry.version_token.clone(), entry.header.clone()));
    }

    domain.headers.push(entry.header);
    domain.version_tokens.push(entry.version_token);
    Ok(())
  }

  /// One rendered aggregation header per domain, in domain order.
  pub(crate) fn aggregation_headers(&self, template: &Template) -> Vec<AggregationHeader> {
    self
      .domains
      .iter()
      .sorted_by(|(a, _), (b, _)| a.cmp(b))
      .map(|(key, domain)| {
        let path = format!("{key}.hpp");
        let mut slots = Slots::new();
        slots
          .set("API_DOMAIN", key.as_str())
          .set("CPPSAFE_NAME", domain.path.name())
          .set("HPP_RELATIVE_FILENAME", path.as_str())
          .set("INCLUDES", domain.includes())
          .set("NAMESPACE_BEGIN", namespaces::namespace_begin(&domain.path))
          .set("NAMESPACE_END", namespaces::namespace_end(&domain.path))
          .set("NAMESPACE_DOCUMENTATION", domain.path.action_documentation())
          .set("VERSION", domain.selected_version().unwrap_or_default());

        AggregationHeader {
          contents: template.render(&slots),
          path,
        }
      })
      .collect()
  }
}
