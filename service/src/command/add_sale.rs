//! [`Command`] for recording a new [`Sale`].

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

/// [`Command`] for recording a new [`Sale`] in the active [`Month`].
#[derive(Clone, Debug)]
pub struct AddSale {
    /// [`sale::Date`] of the new [`Sale`].
    pub date: sale::Date,

    /// [`sale::Client`] who bought.
    pub client: sale::Client,

    /// [`sale::Model`] being sold.
    pub model: sale::Model,

    /// [`sale::Price`] including VAT.
    pub price_with_vat: sale::Price,

    /// Indicator whether the new [`Sale`] belongs to the targeted product mix.
    pub in_mix: bool,

    /// Indicator whether the new [`Sale`] is financed.
    pub is_financed: bool,
}

impl<Db> Command<AddSale> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Sale;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: AddSale) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddSale {
            date,
            client,
            model,
            price_with_vat,
            in_mix,
            is_financed,
        } = cmd;

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        let sale = store
            .active_mut()
            .add_sale(sale::Draft {
                date,
                client,
                model,
                price_with_vat,
                in_mix,
                is_financed,
            })
            .map_err(|_| E::MonthClosed(month_id))
            .map_err(tracerr::wrap!())?
            .clone();

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Sale(id: {})` recorded in `Month({month_id})`", sale.id);
        Ok(sale)
    }
}

/// Error of [`AddSale`] [`Command`] execution.
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
