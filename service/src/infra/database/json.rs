//! JSON file [`Database`] implementation.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{month, Store},
    infra::{database, Database},
};

/// [`Database`] keeping a [`Store`] in a single JSON file.
///
/// The whole [`Store`] is rewritten on every save: the new content is written
/// into a sibling temporary file first, and then renamed over the old one.
#[derive(Clone, Debug)]
pub struct Json {
    /// Path to the JSON file.
    path: PathBuf,
}

impl Json {
    /// Creates a new [`Json`] database stored at the provided `path`.
    ///
    /// The file doesn't need to exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the temporary file used for atomic writes.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("store"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Database<Select<By<Store, ()>>> for Json {
    type Ok = Store;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        _: Select<By<Store, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    "`{}` doesn't exist, starting a new `Store`",
                    self.path.display(),
                );
                return Ok(Store::new(month::Id::current()));
            }
            Err(e) => {
                return Err(tracerr::map_from(tracerr::new!(Error::Io(e))));
            }
        };

        serde_json::from_slice(&bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Database<Insert<Store>> for Json {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Insert(store): Insert<Store>,
    ) -> Result<Self::Ok, Self::Err> {
        let bytes = serde_json::to_vec_pretty(&store)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .map_err(tracerr::from_and_wrap!(=> Error))
                    .map_err(tracerr::map_from)?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        log::debug!("`Store` saved to `{}`", self.path.display());
        Ok(())
    }
}

/// [`Json`] database error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// File system error.
    #[display("JSON file I/O failed: {_0}")]
    Io(io::Error),

    /// Malformed JSON content.
    #[display("JSON (de)serialization failed: {_0}")]
    Serde(serde_json::Error),
}
