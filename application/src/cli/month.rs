//! [`Month`]-related CLI commands.
//!
//! [`Month`]: service::domain::Month

use std::io;

use service::{
    command::{self, Command as _},
    domain::month,
    query::{self, Query as _},
};

use crate::{
    args::Score,
    define_error,
    view::{self, Notice},
    AsError, Context, Error,
};

use super::MonthError;

/// Switches to the [`month::Id`]entified month, if any, and shows the active
/// one.
#[tracing::instrument(skip_all, fields(cli.command = "month", id = ?id))]
pub(super) fn show_or_select<Out: io::Write>(
    ctx: &mut Context<Out>,
    id: Option<month::Id>,
) -> Result<(), Error> {
    if let Some(month_id) = id {
        _ = ctx
            .service()
            .execute(command::SelectMonth { month_id })
            .map_err(AsError::into_error)?;
    }
    summary(ctx, None)
}

/// Shows the summary of the [`month::Id`]entified month, or the active one.
#[tracing::instrument(skip_all, fields(cli.command = "summary", id = ?id))]
pub(super) fn summary<Out: io::Write>(
    ctx: &mut Context<Out>,
    id: Option<month::Id>,
) -> Result<(), Error> {
    let output = ctx
        .service()
        .execute(query::MonthReport { month_id: id })
        .map_err(AsError::into_error)?;

    ctx.print(&view::Report::from(output))
}

/// Sets or unsets the quality score of the active month.
#[tracing::instrument(
    skip_all,
    fields(cli.command = "quality", score = ?score)
)]
pub(super) fn set_quality_score<Out: io::Write>(
    ctx: &mut Context<Out>,
    score: Score,
) -> Result<(), Error> {
    let stored = ctx
        .service()
        .execute(command::SetQualityScore {
            score: score.into(),
        })
        .map_err(AsError::into_error)?;

    ctx.print(&Notice::new(match stored {
        Some(s) => format!("Quality score set to {s}"),
        None => "Quality score unset".to_owned(),
    }))
}

/// Closes the active month.
#[tracing::instrument(skip_all, fields(cli.command = "close"))]
pub(super) fn close<Out: io::Write>(
    ctx: &mut Context<Out>,
) -> Result<(), Error> {
    _ = ctx
        .service()
        .execute(command::CloseMonth)
        .map_err(AsError::into_error)?;

    summary(ctx, None)
}

/// Lists the closed months.
#[tracing::instrument(skip_all, fields(cli.command = "history"))]
pub(super) fn history<Out: io::Write>(
    ctx: &mut Context<Out>,
) -> Result<(), Error> {
    let entries = ctx
        .service()
        .execute(query::History)
        .map_err(AsError::into_error)?;

    ctx.print(&view::History::from(entries))
}

impl AsError for command::set_quality_score::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthClosed(id) => {
                Some(Error::from(MonthError::Closed).with_details(id))
            }
        }
    }
}

impl AsError for command::close_month::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum CloseError {
                #[code = "MONTH_ALREADY_CLOSED"]
                #[exit = 3]
                #[message = "Month is closed already"]
                AlreadyClosed,

                #[code = "CLOSE_PRECONDITIONS_UNMET"]
                #[exit = 3]
                #[message = "Month cannot be closed"]
                PreconditionsUnmet,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthAlreadyClosed(id) => Some(
                Error::from(CloseError::AlreadyClosed).with_details(id),
            ),
            Self::PreconditionsUnmet(unmet) => Some(
                Error::from(CloseError::PreconditionsUnmet)
                    .with_details(unmet),
            ),
        }
    }
}

impl AsError for query::month_report::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthNotExists(id) => {
                Some(Error::from(MonthError::NotFound).with_details(id))
            }
        }
    }
}
