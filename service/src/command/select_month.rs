//! [`Command`] for selecting the active [`Month`].

use common::operations::{By, Insert, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{month, Month, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for selecting the active [`Month`].
///
/// A missing [`Month`] is created with a copy of the [`Parameters`] of the
/// previously active one. Closed [`Month`]s may be selected for viewing.
///
/// [`Parameters`]: crate::domain::Parameters
#[derive(Clone, Copy, Debug)]
pub struct SelectMonth {
    /// [`month::Id`] of the [`Month`] to become active.
    pub month_id: month::Id,
}

impl<Db> Command<SelectMonth> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Month;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: SelectMonth) -> Result<Self::Ok, Self::Err> {
        let SelectMonth { month_id } = cmd;

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::wrap!())?;
        if store.active_month() == month_id {
            return Ok(store.active().clone());
        }

        if store.select(month_id) {
            log::info!("`Month({month_id})` created");
        }
        let month = store.active().clone();

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::wrap!())?;

        Ok(month)
    }
}

/// Error of [`SelectMonth`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use super::SelectMonth;
    use crate::{
        domain::{month, Store},
        infra::{Database as _, Memory},
        Command as _, Service,
    };

    fn id(s: &str) -> month::Id {
        s.parse().unwrap()
    }

    #[test]
    fn switches_active_month() {
        let svc = Service::new(
            Default::default(),
            Memory::new(Store::new(id("2024-05"))),
        );

        let month = svc
            .execute(SelectMonth {
                month_id: id("2024-06"),
            })
            .unwrap();

        assert!(!month.is_closed());
        let store = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(store.active_month(), id("2024-06"));
        assert_eq!(store.months().count(), 2);
    }
}
