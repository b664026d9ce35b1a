//! [`Sale`]-related views.

use std::fmt;

use serde::Serialize;
use service::domain::Sale;

use super::{money, Render};

/// Rendered list of [`Sale`]s.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(transparent)]
pub struct Sales<'a>(pub &'a [Sale]);

impl Render for Sales<'_> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No sales recorded.");
        }
        for sale in self.0 {
            render_sale(sale, f)?;
        }
        Ok(())
    }
}

impl Render for Sale {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_sale(self, f)
    }
}

/// Renders a single [`Sale`] as a text line.
fn render_sale(sale: &Sale, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let flags = [(sale.in_mix, "mix"), (sale.is_financed, "financed")]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect::<Vec<_>>();

    write!(
        f,
        "{}  {}  {} / {}  {} (w/o VAT {})  commission {}",
        sale.id,
        sale.date,
        sale.client,
        sale.model,
        money(sale.price_with_vat.amount()),
        money(sale.price_without_vat()),
        money(sale.base_commission_unit()),
    )?;
    if !flags.is_empty() {
        write!(f, "  [{}]", flags.join(", "))?;
    }
    writeln!(f)
}
