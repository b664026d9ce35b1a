//! [`Store`]-related CLI commands.

use std::{fmt, fs, io, path::Path};

use serde::Serialize;
use service::{
    command::{self, Command as _},
    domain::Store,
    query::{self, Query as _},
};

use crate::{
    define_error,
    view::{Notice, Render},
    AsError, Context, Error,
};

define_error! {
    enum BackupError {
        #[code = "BACKUP_UNREADABLE"]
        #[exit = 5]
        #[message = "Backup file cannot be read"]
        Unreadable,

        #[code = "BACKUP_UNWRITABLE"]
        #[exit = 6]
        #[message = "Backup file cannot be written"]
        Unwritable,
    }
}

/// [`Store`] backup printed as JSON regardless of the output format.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct Backup<'a>(&'a Store);

impl Render for Backup<'_> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json =
            serde_json::to_string_pretty(self.0).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

/// Exports the whole [`Store`] into the provided file, or prints it.
#[tracing::instrument(
    skip_all,
    fields(cli.command = "export", path = ?path)
)]
pub(super) fn export<Out: io::Write>(
    ctx: &mut Context<Out>,
    path: Option<&Path>,
) -> Result<(), Error> {
    let store = ctx
        .service()
        .execute(query::store::Export::all())
        .map_err(AsError::into_error)?;

    let Some(path) = path else {
        return ctx.print(&Backup(&store));
    };

    let json = serde_json::to_vec_pretty(&store).map_err(AsError::into_error)?;
    fs::write(path, json).map_err(|e| {
        Error::from(BackupError::Unwritable).with_details(e)
    })?;

    ctx.print(&Notice::new(format!("Backup written to {}", path.display())))
}

/// Replaces the whole [`Store`] with the backup from the provided file.
#[tracing::instrument(
    skip_all,
    fields(cli.command = "import", path = ?path)
)]
pub(super) fn import<Out: io::Write>(
    ctx: &mut Context<Out>,
    path: &Path,
) -> Result<(), Error> {
    let bytes = fs::read(path).map_err(|e| {
        Error::from(BackupError::Unreadable).with_details(e)
    })?;
    let store = serde_json::from_slice::<Store>(&bytes)
        .map_err(AsError::into_error)?;
    let months = store.months().count();

    ctx.service()
        .execute(command::ImportStore(store))
        .map_err(AsError::into_error)?;

    ctx.print(&Notice::new(format!("{months} months imported")))
}
