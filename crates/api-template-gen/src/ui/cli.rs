use std::path::PathBuf;

use clap::Parser;

use super::colors::Colors;

pub const DEFAULT_SOURCE_ROOT: &str = "templates/apis";

#[derive(Parser, Debug)]
#[command(name = "api-template-gen")]
#[command(author, version, about = "Convert JSON API descriptions to C++ request sources")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  /// Directory with source API descriptions
  #[arg(short, long = "src", value_name = "DIR", default_value = DEFAULT_SOURCE_ROOT)]
  pub source: PathBuf,

  /// Directory where generated sources are written (defaults to the tool's install location)
  #[arg(short, long = "dest", value_name = "DIR")]
  pub destination: Option<PathBuf>,
}
