//! [`Sale`]-related CLI commands.
//!
//! [`Sale`]: service::domain::Sale

use std::io;

use service::{
    command::{self, Command as _},
    domain::sale,
    query::{self, Query as _},
};

use crate::{
    args::SaleCommand,
    define_error,
    view::{self, Notice},
    AsError, Context, Error,
};

use super::MonthError;

/// Executes the provided [`SaleCommand`].
#[tracing::instrument(skip_all, fields(cli.command = "sale"))]
pub(super) fn run<Out: io::Write>(
    ctx: &mut Context<Out>,
    cmd: SaleCommand,
) -> Result<(), Error> {
    match cmd {
        SaleCommand::Add {
            client,
            model,
            price,
            date,
            mix,
            financed,
        } => {
            let sale = ctx
                .service()
                .execute(command::AddSale {
                    date: date.unwrap_or_else(sale::Date::today),
                    client,
                    model,
                    price_with_vat: price,
                    in_mix: mix,
                    is_financed: financed,
                })
                .map_err(AsError::into_error)?;
            ctx.print(&sale)
        }
        SaleCommand::Delete { id } => {
            let sale = ctx
                .service()
                .execute(command::DeleteSale { sale_id: id })
                .map_err(AsError::into_error)?;
            ctx.print(&Notice::new(format!("Sale {} deleted", sale.id)))
        }
        SaleCommand::Clear => {
            let removed = ctx
                .service()
                .execute(command::ClearSales)
                .map_err(AsError::into_error)?;
            ctx.print(&Notice::new(format!("{} sales deleted", removed.len())))
        }
        SaleCommand::List => {
            let report = ctx
                .service()
                .execute(query::MonthReport::default())
                .map_err(AsError::into_error)?;
            ctx.print(&view::Sales(report.month.sales()))
        }
    }
}

impl AsError for command::add_sale::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthClosed(id) => {
                Some(Error::from(MonthError::Closed).with_details(id))
            }
        }
    }
}

impl AsError for command::delete_sale::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SALE_NOT_FOUND"]
                #[exit = 4]
                #[message = "Sale does not exist in the active month"]
                NotFound,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthClosed(id) => Some(
                crate::Error::from(MonthError::Closed).with_details(id),
            ),
            Self::SaleNotExists(id) => {
                Some(crate::Error::from(Error::NotFound).with_details(id))
            }
        }
    }
}

impl AsError for command::clear_sales::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::MonthClosed(id) => {
                Some(Error::from(MonthError::Closed).with_details(id))
            }
        }
    }
}
