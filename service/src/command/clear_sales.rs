//! [`Command`] for clearing all the [`Sale`]s.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Month;
use crate::{
    domain::{month, Sale, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing all the [`Sale`]s of the active [`Month`].
#[derive(Clone, Copy, Debug)]
pub struct ClearSales;

impl<Db> Command<ClearSales> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Vec<Sale>;
    type Err = Traced<ExecutionError>;

    fn execute(&self, _: ClearSales) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        let removed = store
            .active_mut()
            .clear_sales()
            .map_err(|_| E::MonthClosed(month_id))
            .map_err(tracerr::wrap!())?;
        if removed.is_empty() {
            return Ok(removed);
        }

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("{} `Sale`s cleared from `Month({month_id})`", removed.len());
        Ok(removed)
    }
}

/// Error of [`ClearSales`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Month`] is closed.
    #[display("`Month({_0})` is closed")]
    #[from(ignore)]
    MonthClosed(#[error(not(source))] month::Id),
}
