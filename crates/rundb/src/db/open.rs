use crate::{
    backend::snapshot,
    db::Database,
    error::{Error, OpenError},
};
use std::{io::ErrorKind, path::Path};

/// Resolve `source` to a backend and bind it.
///
/// Probing order: existence/readability first, then the snapshot magic
/// header. Anything unrecognized fails with `UnrecognizedFormat`; no
/// resources stay held on any failure path.
pub fn open(source: impl AsRef<Path>) -> Result<Database, Error> {
    let path = source.as_ref();
    let name = path.display().to_string();

    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            return Err(OpenError::UnrecognizedFormat { path: name }.into());
        }
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(OpenError::NotFound { path: name }.into());
        }
        Err(err) => {
            return Err(OpenError::Io {
                path: name,
                message: err.to_string(),
            }
            .into());
        }
    }

    let is_snapshot = snapshot::probe(path).map_err(|err| OpenError::Io {
        path: name.clone(),
        message: err.to_string(),
    })?;
    if !is_snapshot {
        return Err(OpenError::UnrecognizedFormat { path: name }.into());
    }

    let backend = snapshot::read_snapshot(path, &name)?;

    Ok(Database::attach(name, backend))
}
