//! Orchestration of one generation run over a source tree.
//!
//! The `Orchestrator` walks the source root, turns every description document
//! into its implementation and interface files, then emits one aggregation
//! header per domain and the build manifest. Problems confined to a single
//! document are collected in the returned [`GenerationReport`]; anything else
//! aborts the run.

use std::{ffi::OsStr, path::PathBuf};

use bon::Builder;
use walkdir::WalkDir;

use super::{
  codegen::{self, GeneratedDocument},
  document::read_document,
  domain::{DomainEntry, DomainRegistry},
  errors::{DocumentError, GeneratorError},
  manifest::{DEFAULT_MANIFEST_NAME, render_manifest},
  template::TemplateSet,
  writer::{WriteOutcome, write_if_changed},
};

pub const DEFAULT_EXTENSION: &str = "json";

/// Generator-level settings that do not come from the command line.
#[derive(Debug, Clone, Builder)]
pub struct CodegenConfig {
  /// Extension of description documents, without the dot.
  #[builder(into, default = String::from(DEFAULT_EXTENSION))]
  pub extension: String,
  /// File name of the build manifest, relative to the destination root.
  #[builder(into, default = String::from(DEFAULT_MANIFEST_NAME))]
  pub manifest_name: String,
  #[builder(default)]
  pub templates: TemplateSet,
}

impl Default for CodegenConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// A document that was skipped, with the reason.
#[derive(Debug)]
pub struct RejectedDocument {
  pub path: PathBuf,
  pub error: DocumentError,
}

/// One output file and what the writer did with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  /// Path relative to the destination root, `/` separated.
  pub relative: String,
  pub outcome: WriteOutcome,
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct GenerationReport {
  /// Description documents found under the source root
  pub documents_found: usize,
  /// Documents whose files were generated
  pub documents_generated: usize,
  /// Documents skipped because of their own errors, in discovery order
  pub rejected: Vec<RejectedDocument>,
  /// Every output file in write order
  pub files: Vec<GeneratedFile>,
  /// Number of domains that received an aggregation header
  pub domains: usize,
}

impl GenerationReport {
  pub fn files_written(&self) -> usize {
    self.files.iter().filter(|file| file.outcome.is_written()).count()
  }

  pub fn files_unchanged(&self) -> usize {
    self.files.len() - self.files_written()
  }
}

/// Progress notifications from [`Orchestrator::run_with`].
///
/// `file_written` fires for every output file, including unchanged ones.
pub trait RunObserver {
  fn file_written(&mut self, _file: &GeneratedFile) {}

  fn document_rejected(&mut self, _rejected: &RejectedDocument) {}
}

impl RunObserver for () {}

pub struct Orchestrator {
  source_root: PathBuf,
  destination_root: PathBuf,
  config: CodegenConfig,
}

impl Orchestrator {
  pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>, config: CodegenConfig) -> Self {
    Self {
      source_root: source_root.into(),
      destination_root: destination_root.into(),
      config,
    }
  }

  /// Runs the whole pipeline without progress notifications.
  ///
  /// # Errors
  ///
  /// See [`Orchestrator::run_with`].
  pub fn run(&self) -> Result<GenerationReport, GeneratorError> {
    self.run_with(&mut ())
  }

  /// Runs the whole pipeline, notifying `observer` of every written file and
  /// rejected document as it happens.
  ///
  /// Documents are processed one at a time in sorted path order. Each
  /// document's files are written before it is recorded in its domain, and the
  /// aggregation headers and manifest are written last.
  ///
  /// # Errors
  ///
  /// Returns an error if the source root is missing, a file cannot be read or
  /// written, a document uses an unsupported configuration, or a domain has
  /// more than one default version. Events for everything completed before
  /// the failure have already reached `observer`.
  pub fn run_with(&self, observer: &mut impl RunObserver) -> Result<GenerationReport, GeneratorError> {
    let documents = self.discover()?;
    let mut report = GenerationReport {
      documents_found: documents.len(),
      ..GenerationReport::default()
    };

    let mut registry = DomainRegistry::new();
    let mut sources = vec![];
    let mut headers = vec![];

    for document in documents {
      let api = match read_document(&document) {
        Ok(api) => api,
        Err(error) => {
          let rejected = RejectedDocument { path: document, error };
          observer.document_rejected(&rejected);
          report.rejected.push(rejected);
          continue;
        }
      };

      let GeneratedDocument {
        cpp_path,
        hpp_path,
        cpp,
        hpp,
        version_token,
      } = codegen::generate(&api, &self.config.templates)?;

      self.emit(&cpp_path, &cpp, &mut report, observer)?;
      self.emit(&hpp_path, &hpp, &mut report, observer)?;

      registry.record(DomainEntry {
        path: api.path,
        header: hpp_path.clone(),
        version_token,
        is_default: api.default_version,
      })?;

      sources.push(cpp_path);
      headers.push(hpp_path);
      report.documents_generated += 1;
    }

    for header in registry.aggregation_headers(&self.config.templates.aggregation) {
      self.emit(&header.path, &header.contents, &mut report, observer)?;
      headers.push(header.path);
    }
    report.domains = registry.len();

    let manifest = render_manifest(&sources, &headers);
    self.emit(&self.config.manifest_name, &manifest, &mut report, observer)?;

    Ok(report)
  }

  /// Description documents under the source root, sorted by path.
  fn discover(&self) -> Result<Vec<PathBuf>, GeneratorError> {
    if !self.source_root.is_dir() {
      return Err(GeneratorError::MissingSourceRoot {
        path: self.source_root.clone(),
      });
    }

    let extension = OsStr::new(&self.config.extension);
    let mut documents = vec![];
    for entry in WalkDir::new(&self.source_root).sort_by_file_name() {
      let entry = entry.map_err(|source| GeneratorError::Discovery {
        root: self.source_root.clone(),
        source,
      })?;
      if entry.file_type().is_file() && entry.path().extension() == Some(extension) {
        documents.push(entry.into_path());
      }
    }
    Ok(documents)
  }

  fn emit(
    &self,
    relative: &str,
    contents: &str,
    report: &mut GenerationReport,
    observer: &mut impl RunObserver,
  ) -> Result<(), GeneratorError> {
    let outcome = write_if_changed(&self.destination_root.join(relative), contents)?;
    let file = GeneratedFile {
      relative: relative.to_string(),
      outcome,
    };
    observer.file_written(&file);
    report.files.push(file);
    Ok(())
  }
}
