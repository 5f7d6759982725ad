#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
use clap::Parser;

use crate::ui::{Cli, Colors, colors};

mod generator;
mod ui;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(), colors::detect_theme());

  let config = ui::commands::GenerateConfig::from_cli(cli)?;
  ui::commands::generate_code(&config, &colors)?;

  Ok(())
}
