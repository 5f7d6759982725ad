pub mod cli;
pub mod colors;
pub mod commands;

pub use cli::Cli;
pub use colors::Colors;
