//! [`Command`] for deleting a [`Sale`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Month;
use crate::{
    domain::{month, sale, Sale, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Sale`] from the active [`Month`].
#[derive(Clone, Debug)]
pub struct DeleteSale {
    /// ID of the [`Sale`] to be deleted.
    pub sale_id: sale::Id,
}

impl<Db> Command<DeleteSale> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Sale;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: DeleteSale) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteSale { sale_id } = cmd;

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        let sale = store
            .active_mut()
            .remove_sale(&sale_id)
            .map_err(|_| E::MonthClosed(month_id))
            .map_err(tracerr::wrap!())?
            .ok_or(E::SaleNotExists(sale_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Sale(id: {})` deleted from `Month({month_id})`", sale.id);
        Ok(sale)
    }
}

/// Error of [`DeleteSale`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Month`] is closed.
    #[display("`Month({_0})` is closed")]
    #[from(ignore)]
    MonthClosed(#[error(not(source))] month::Id),

    /// [`Sale`] doesn't exist in the active [`Month`].
    #[display("`Sale(id: {_0})` does not exist")]
    #[from(ignore)]
    SaleNotExists(#[error(not(source))] sale::Id),
}
