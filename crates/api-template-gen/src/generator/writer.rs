use std::{fs, io::ErrorKind, path::Path};

use strum::Display;

use super::errors::GeneratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WriteOutcome {
  Created,
  #[strum(serialize = "modified")]
  Updated,
  Unchanged,
}

impl WriteOutcome {
  pub fn is_written(self) -> bool {
    !matches!(self, Self::Unchanged)
  }
}

/// Writes `contents` to `path` unless the file already holds exactly that.
///
/// Missing parent directories are created.
pub(crate) fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome, GeneratorError> {
  let outcome = match fs::read(path) {
    Ok(existing) if existing == contents.as_bytes() => return Ok(WriteOutcome::Unchanged),
    Ok(_) => WriteOutcome::Updated,
    Err(err) if err.kind() == ErrorKind::NotFound => WriteOutcome::Created,
    Err(err) => return Err(GeneratorError::io(path, err)),
  };

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|source| GeneratorError::io(parent, source))?;
  }
  fs::write(path, contents).map_err(|source| GeneratorError::io(path, source))?;
  Ok(outcome)
}
