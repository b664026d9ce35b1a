//! [`MonthReport`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        month::{self, Precondition},
        summary::Achievement,
        Month, Store, Summary,
    },
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] reporting a [`Month`] along with its [`Summary`].
///
/// A closed [`Month`] is reported with its frozen [`Summary`], while an open
/// one is calculated live.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MonthReport {
    /// ID of the [`Month`] to report.
    ///
    /// The active [`Month`] is reported if [`None`].
    pub month_id: Option<month::Id>,
}

/// Output of the [`MonthReport`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// ID of the reported [`Month`].
    pub month_id: month::Id,

    /// Indicator whether the reported [`Month`] is the active one.
    pub is_active: bool,

    /// Reported [`Month`].
    pub month: Month,

    /// [`Summary`] of the reported [`Month`].
    pub summary: Summary,

    /// Breakdown of the [`Summary`] bonuses.
    pub achievements: Vec<Achievement>,

    /// [`Precondition`]s preventing the reported [`Month`] from being closed.
    ///
    /// Always empty for a closed [`Month`].
    pub unmet: Vec<Precondition>,
}

impl<Db> Query<MonthReport> for Service<Db>
where
    Db: Database<
        Select<By<Store, ()>>,
        Ok = Store,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    fn execute(&self, query: MonthReport) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = query.month_id.unwrap_or(store.active_month());

        let month = store
            .month(month_id)
            .ok_or(E::MonthNotExists(month_id))
            .map_err(tracerr::wrap!())?
            .clone();
        let summary = month.summary();
        let achievements = summary.achievements(month.parameters());
        let unmet = if month.is_closed() {
            vec![]
        } else {
            month.unmet_preconditions(self.config().quality_gate)
        };

        Ok(Output {
            month_id,
            is_active: month_id == store.active_month(),
            month,
            summary,
            achievements,
            unmet,
        })
    }
}

/// Error of [`MonthReport`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Month`] doesn't exist.
    #[display("`Month({_0})` does not exist")]
    #[from(ignore)]
    MonthNotExists(#[error(not(source))] month::Id),
}
