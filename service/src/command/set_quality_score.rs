//! [`Command`] for setting the quality score.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Month;
use crate::{
    domain::{month, Store},
    infra::{database, Database},
    Service,
};

use super::Command;

/// Maximum quality score.
pub const MAX_SCORE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// [`Command`] for setting the quality score of the active [`Month`].
///
/// The score is clamped into the `[0, 5]` range. [`None`] unsets it.
#[derive(Clone, Copy, Debug)]
pub struct SetQualityScore {
    /// New quality score.
    pub score: Option<Decimal>,
}

impl<Db> Command<SetQualityScore> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Option<Decimal>;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: SetQualityScore) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let score = cmd.score.map(|s| s.clamp(Decimal::ZERO, MAX_SCORE));

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        store
            .active_mut()
            .set_quality_score(score)
            .map_err(|_| E::MonthClosed(month_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("quality score of `Month({month_id})` set to {score:?}");
        Ok(score)
    }
}

/// Error of [`SetQualityScore`] [`Command`] execution.
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

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use rust_decimal::Decimal;

    use super::SetQualityScore;
    use crate::{
        domain::Store,
        infra::{Database as _, Memory},
        Command as _, Service,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn clamps_score() {
        let svc = Service::new(
            Default::default(),
            Memory::new(Store::new("2024-05".parse().unwrap())),
        );

        for (input, expected) in
            [("7.3", "5"), ("-2", "0"), ("4.65", "4.65"), ("0", "0")]
        {
            let stored = svc
                .execute(SetQualityScore {
                    score: Some(decimal(input)),
                })
                .unwrap();

            assert_eq!(stored, Some(decimal(expected)));
        }
    }

    #[test]
    fn unsets_score() {
        let svc = Service::new(
            Default::default(),
            Memory::new(Store::new("2024-05".parse().unwrap())),
        );
        _ = svc
            .execute(SetQualityScore {
                score: Some(decimal("4.8")),
            })
            .unwrap();

        _ = svc.execute(SetQualityScore { score: None }).unwrap();

        let store = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(store.active().quality_score(), None);
    }
}
