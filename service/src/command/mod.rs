//! [`Command`] definition.

pub mod add_sale;
pub mod clear_sales;
pub mod close_month;
pub mod delete_sale;
pub mod import_store;
pub mod select_month;
pub mod set_quality_score;
pub mod update_parameters;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_sale::AddSale, clear_sales::ClearSales, close_month::CloseMonth,
    delete_sale::DeleteSale, import_store::ImportStore,
    select_month::SelectMonth, set_quality_score::SetQualityScore,
    update_parameters::UpdateParameters,
};
