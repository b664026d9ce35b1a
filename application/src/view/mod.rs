//! Printable views of the [`Service`] outputs.
//!
//! [`Service`]: service::Service

pub mod history;
pub mod month;
pub mod parameters;
pub mod sale;

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

pub use self::{
    history::History, month::Report, parameters::Parameters, sale::Sales,
};

/// Format of the printed output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// Human-readable text.
    #[default]
    Text,

    /// Machine-readable JSON.
    Json,
}

/// Output printable both as a text and as JSON.
pub trait Render: Serialize {
    /// Renders this output as a human-readable text.
    ///
    /// # Errors
    ///
    /// If the provided [`fmt::Formatter`] fails.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// [`fmt::Display`] adapter rendering a [`Render`] as a text.
#[derive(Debug)]
pub struct Text<'a, T: ?Sized>(pub &'a T);

impl<T: Render + ?Sized> fmt::Display for Text<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

/// Short confirmation message.
#[derive(Clone, Debug, Serialize)]
pub struct Notice {
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Creates a new [`Notice`] with the provided `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Render for Notice {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}

/// Formats the provided fraction as a percentage with one decimal digit.
#[must_use]
pub fn percent(fraction: Decimal) -> String {
    format!("{:.1}%", fraction.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Formats the provided monetary `amount` with two decimal digits.
#[must_use]
pub fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}
