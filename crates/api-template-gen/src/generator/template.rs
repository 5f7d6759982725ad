//! `__SLOT__` placeholder templates.

use std::{
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use indexmap::IndexMap;
use regex::{Captures, Regex};

use super::errors::GeneratorError;

static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*)__").unwrap());

pub(crate) const CPP_TEMPLATE_FILE: &str = "api_template.cpp.txt";
pub(crate) const HPP_TEMPLATE_FILE: &str = "api_template.hpp.txt";
pub(crate) const AGGREGATION_TEMPLATE_FILE: &str = "all_hpp_template.hpp.txt";
pub(crate) const SESSION_TOKEN_CPP_TEMPLATE_FILE: &str = "session_token_api.cpp.txt";
pub(crate) const SESSION_TOKEN_HPP_TEMPLATE_FILE: &str = "session_token_api.hpp.txt";

/// Slot values keyed by slot name without the surrounding underscores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Slots(IndexMap<&'static str, String>);

impl Slots {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
    self.0.insert(name, value.into());
    self
  }

  pub(crate) fn get(&self, name: &str) -> Option<&str> {
    self.0.get(name).map(String::as_str)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
  text: String,
}

impl Template {
  pub(crate) fn new(text: impl Into<String>) -> Self {
    Self { text: text.into() }
  }

  /// Replaces every slot token. Unknown slots render empty and values are
  /// inserted verbatim, so `$` or `__X__` inside a value survive as written.
  pub(crate) fn render(&self, slots: &Slots) -> String {
    SLOT_RE
      .replace_all(&self.text, |captures: &Captures| {
        slots.get(&captures[1]).unwrap_or_default().to_string()
      })
      .into_owned()
  }
}

/// Every template one run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
  pub(crate) cpp: Template,
  pub(crate) hpp: Template,
  pub(crate) aggregation: Template,
  pub(crate) session_token_cpp: Template,
  pub(crate) session_token_hpp: Template,
}

impl TemplateSet {
  /// Templates compiled into the binary.
  pub fn builtin() -> Self {
    Self {
      cpp: Template::new(include_str!("../../templates/api_template.cpp.txt")),
      hpp: Template::new(include_str!("../../templates/api_template.hpp.txt")),
      aggregation: Template::new(include_str!("../../templates/all_hpp_template.hpp.txt")),
      session_token_cpp: Template::new(include_str!("../../templates/session_token_api.cpp.txt")),
      session_token_hpp: Template::new(include_str!("../../templates/session_token_api.hpp.txt")),
    }
  }

  /// Builtin templates, each replaced by the file of the same name in `dir`
  /// when one exists.
  pub fn load(dir: &Path) -> Result<Self, GeneratorError> {
    let builtin = Self::builtin();
    Ok(Self {
      cpp: load_override(dir, CPP_TEMPLATE_FILE, builtin.cpp)?,
      hpp: load_override(dir, HPP_TEMPLATE_FILE, builtin.hpp)?,
      aggregation: load_override(dir, AGGREGATION_TEMPLATE_FILE, builtin.aggregation)?,
      session_token_cpp: load_override(dir, SESSION_TOKEN_CPP_TEMPLATE_FILE, builtin.session_token_cpp)?,
      session_token_hpp: load_override(dir, SESSION_TOKEN_HPP_TEMPLATE_FILE, builtin.session_token_hpp)?,
    })
  }
}

impl Default for TemplateSet {
  fn default() -> Self {
    Self::builtin()
  }
}

fn load_override(dir: &Path, file_name: &str, fallback: Template) -> Result<Template, GeneratorError> {
  let path: PathBuf = dir.join(file_name);
  if !path.is_file() {
    return Ok(fallback);
  }
  let text = fs::read_to_string(&path).map_err(|source| GeneratorError::io(&path, source))?;
  Ok(Template::new(text))
}
