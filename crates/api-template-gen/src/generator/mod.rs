pub(crate) mod ast;
pub(crate) mod classifier;
pub(crate) mod codegen;
pub(crate) mod document;
pub(crate) mod domain;
pub mod errors;
pub(crate) mod manifest;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod schema;
pub(crate) mod template;
pub(crate) mod writer;

#[cfg(test)]
mod tests;
