//! [`Command`] for closing the active [`Month`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        month::{self, CloseError, ClosingDateTime, Unmet},
        Month, Store,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for closing the active [`Month`], consolidating its
/// [`Summary`] forever.
///
/// [`Summary`]: crate::domain::Summary
#[derive(Clone, Copy, Debug)]
pub struct CloseMonth;

impl<Db> Command<CloseMonth> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Month;
    type Err = Traced<ExecutionError>;

    fn execute(&self, _: CloseMonth) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        let closing = store
            .active_mut()
            .close(self.config().quality_gate, ClosingDateTime::now())
            .map_err(|e| match e {
                CloseError::AlreadyClosed => E::MonthAlreadyClosed(month_id),
                CloseError::Unmet(unmet) => {
                    log::warn!("`Month({month_id})` cannot be closed: {unmet}");
                    E::PreconditionsUnmet(unmet)
                }
            })
            .map_err(tracerr::wrap!())?;
        log::info!(
            "`Month({month_id})` closed with final commission {}",
            closing.summary.final_commission,
        );
        let month = store.active().clone();

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(month)
    }
}

/// Error of [`CloseMonth`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Month`] is closed already.
    #[display("`Month({_0})` is closed already")]
    #[from(ignore)]
    MonthAlreadyClosed(#[error(not(source))] month::Id),

    /// Some [`month::Precondition`]s are unmet.
    #[display("`Month` cannot be closed: {_0}")]
    #[from(ignore)]
    PreconditionsUnmet(#[error(not(source))] Unmet),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use rust_decimal::Decimal;

    use super::{CloseMonth, ExecutionError};
    use crate::{
        domain::{
            month::{Precondition, QualityGate, Status},
            sale, Store,
        },
        infra::{Database as _, Memory},
        Command as _, Config, Service,
    };

    fn store(sales: usize, score: Option<&str>) -> Store {
        let mut store = Store::new("2024-05".parse().unwrap());
        let month = store.active_mut();
        for _ in 0..sales {
            _ = month
                .add_sale(sale::Draft {
                    date: "2024-05-01".parse().unwrap(),
                    client: "Ana".parse().unwrap(),
                    model: "Corolla".parse().unwrap(),
                    price_with_vat: "121000".parse().unwrap(),
                    in_mix: false,
                    is_financed: false,
                })
                .unwrap();
        }
        month
            .set_quality_score(score.map(|s| s.parse().unwrap()))
            .unwrap();
        store
    }

    #[test]
    fn closes_and_persists_summary() {
        let svc = Service::new(
            Config::default(),
            Memory::new(store(1, Some("4.6"))),
        );

        let month = svc.execute(CloseMonth).unwrap();

        assert_eq!(month.status(), Status::Closed);
        assert_eq!(month.summary().final_commission, Decimal::from(550));
        let stored = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(stored.active(), &month);
    }

    #[test]
    fn reports_unmet_preconditions() {
        let svc = Service::new(Config::default(), Memory::new(store(0, None)));

        let err = svc.execute(CloseMonth).unwrap_err();

        let ExecutionError::PreconditionsUnmet(unmet) = err.as_ref() else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(
            unmet.preconditions(),
            [Precondition::NoSales, Precondition::NoQualityScore],
        );
    }

    #[test]
    fn respects_quality_gate() {
        let legacy = Service::new(
            Config::default(),
            Memory::new(store(2, Some("0"))),
        );
        let explicit = Service::new(
            Config {
                quality_gate: QualityGate::Explicit,
            },
            Memory::new(store(2, Some("0"))),
        );

        assert!(legacy.execute(CloseMonth).is_err());
        assert!(explicit.execute(CloseMonth).is_ok());
    }

    #[test]
    fn rejects_closing_twice() {
        let svc = Service::new(
            Config::default(),
            Memory::new(store(1, Some("5"))),
        );
        _ = svc.execute(CloseMonth).unwrap();

        let err = svc.execute(CloseMonth).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::MonthAlreadyClosed(_),
        ));
    }
}
