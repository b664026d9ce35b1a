//! [`Parameters`]-related CLI commands.
//!
//! [`Parameters`]: service::domain::Parameters

use std::io;

use service::{
    command::{self, update_parameters::Edit, Command as _},
    domain::{Parameters, Tier},
    query::{self, Query as _},
};

use crate::{args::ParamsCommand, define_error, view, AsError, Context, Error};

use super::MonthError;

/// Executes the provided [`ParamsCommand`].
#[tracing::instrument(skip_all, fields(cli.command = "params"))]
pub(super) fn run<Out: io::Write>(
    ctx: &mut Context<Out>,
    cmd: ParamsCommand,
) -> Result<(), Error> {
    let edit = match cmd {
        ParamsCommand::Show => {
            let report = ctx
                .service()
                .execute(query::MonthReport::default())
                .map_err(AsError::into_error)?;
            return ctx.print(&view::Parameters(report.month.parameters()));
        }
        ParamsCommand::Rate { rate } => Edit::BaseCommissionRate(rate),
        ParamsCommand::Weight { category, weight } => {
            Edit::Weight { category, weight }
        }
        ParamsCommand::Tier {
            category,
            id,
            threshold,
            percentage,
        } => Edit::UpsertTier {
            category,
            tier: Tier::new(id, threshold, percentage),
        },
        ParamsCommand::RemoveTier { category, id } => Edit::RemoveTier {
            category,
            tier_id: id,
        },
        ParamsCommand::Reset => Edit::ReplaceAll(Parameters::default()),
    };

    let params = ctx
        .service()
        .execute(command::UpdateParameters(edit))
        .map_err(AsError::into_error)?;

    ctx.print(&view::Parameters(&params))
}

impl AsError for command::update_parameters::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PARAMETERS"]
                #[exit = 5]
                #[message = "Parameters cannot be negative"]
                Negative,

                #[code = "TIER_NOT_FOUND"]
                #[exit = 4]
                #[message = "Tier does not exist"]
                TierNotFound,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthClosed(id) => Some(
                crate::Error::from(MonthError::Closed).with_details(id),
            ),
            Self::NegativeValue(what) => {
                Some(crate::Error::from(Error::Negative).with_details(what))
            }
            Self::TierNotExists(category, id) => Some(
                crate::Error::from(Error::TierNotFound)
                    .with_details(format!("{category}/{id}")),
            ),
        }
    }
}
