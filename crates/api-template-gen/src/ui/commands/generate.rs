use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Color;

use crate::{
  generator::{
    errors::DocumentError,
    orchestrator::{CodegenConfig, GeneratedFile, GenerationReport, Orchestrator, RejectedDocument, RunObserver},
    template::TemplateSet,
  },
  ui::{Cli, Colors},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub source: PathBuf,
  pub destination: PathBuf,
  /// Directory searched for template overrides.
  pub template_dir: Option<PathBuf>,
}

impl GenerateConfig {
  pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
    let Cli { source, destination } = cli;

    let destination = match destination {
      Some(path) => path,
      None => default_destination()?,
    };
    let template_dir = source.parent().map(Path::to_path_buf);

    Ok(Self {
      source,
      destination,
      template_dir,
    })
  }

  fn create_orchestrator(&self) -> anyhow::Result<Orchestrator> {
    let templates = match &self.template_dir {
      Some(dir) => TemplateSet::load(dir)?,
      None => TemplateSet::builtin(),
    };
    let config = CodegenConfig::builder().templates(templates).build();
    Ok(Orchestrator::new(&self.source, &self.destination, config))
  }
}

/// The directory holding the running executable.
fn default_destination() -> anyhow::Result<PathBuf> {
  let exe = std::env::current_exe().context("Cannot locate the running executable")?;
  exe
    .parent()
    .map(Path::to_path_buf)
    .with_context(|| format!("Executable path has no parent directory: {}", exe.display()))
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn timestamped(&self, message: &str) -> String {
    format!("{} {message}", self.colors.paint(format_timestamp(), self.colors.timestamp()))
  }

  fn info(&self, message: &str) {
    println!("{}", self.timestamped(message));
  }

  fn stat(&self, label: &str, value: String, value_color: Color) {
    println!(
      "            {} {}",
      self.colors.paint(format!("{label:<25}"), self.colors.label()),
      self.colors.paint(value, value_color)
    );
  }

  fn log_scanning(&self) {
    self.info(&self.colors.paint(
      format!("Scanning API descriptions in: {}", self.config.source.display()),
      self.colors.primary(),
    ));
  }

  fn log_destination(&self) {
    self.info(&self.colors.paint(
      format!("Writing generated sources to: {}", self.config.destination.display()),
      self.colors.primary(),
    ));
  }

  fn file_line(&self, file: &GeneratedFile) -> String {
    self.timestamped(&format!(
      "{} {}",
      self.colors.paint(&file.relative, self.colors.info()),
      self.colors.paint(file.outcome, self.colors.success())
    ))
  }

  /// Headline followed by one indented line per detail.
  fn rejection_lines(&self, rejected: &RejectedDocument) -> Vec<String> {
    let path = rejected.path.display();
    let (headline, details) = match &rejected.error {
      DocumentError::Malformed { message } => (format!("File is not proper JSON: {path}"), vec![message.clone()]),
      DocumentError::Invalid { .. } => (format!("File contains errors: {path}"), rejected.error.details()),
      other => (format!("File was skipped: {path}"), vec![other.to_string()]),
    };

    std::iter::once(self.timestamped(&self.colors.paint(headline, self.colors.rejected())))
      .chain(
        details
          .into_iter()
          .map(|detail| format!("    {}", self.colors.paint(detail, self.colors.primary()))),
      )
      .collect()
  }

  fn print_statistics(&self, report: &GenerationReport) {
    let value = self.colors.value();
    println!();
    self.stat("Documents found:", report.documents_found.to_string(), value);
    self.stat("Documents generated:", report.documents_generated.to_string(), value);
    if !report.rejected.is_empty() {
      self.stat("Documents rejected:", report.rejected.len().to_string(), self.colors.rejected());
    }
    self.stat("Files written:", report.files_written().to_string(), value);
    self.stat(
      "Files unchanged:",
      report.files_unchanged().to_string(),
      self.colors.unchanged(),
    );
    self.stat("Domains:", report.domains.to_string(), value);
  }

  fn log_success(&self) {
    println!();
    println!(
      "{}",
      self.timestamped(&self.colors.paint("Successfully generated API sources", self.colors.success()))
    );
  }
}

/// Files and rejections are printed while the run progresses, so they are
/// visible even when a later document aborts it.
impl RunObserver for GenerateLogger<'_> {
  fn file_written(&mut self, file: &GeneratedFile) {
    if file.outcome.is_written() {
      println!("{}", self.file_line(file));
    }
  }

  fn document_rejected(&mut self, rejected: &RejectedDocument) {
    for line in self.rejection_lines(rejected) {
      eprintln!("{line}");
    }
  }
}

pub fn generate_code(config: &GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let mut logger = GenerateLogger::new(config, colors);

  logger.log_scanning();
  logger.log_destination();
  let orchestrator = config.create_orchestrator()?;
  let report = orchestrator.run_with(&mut logger)?;

  logger.print_statistics(&report);
  logger.log_success();

  Ok(())
}
