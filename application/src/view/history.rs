//! [`query::History`]-related views.

use std::fmt;

use common::DateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use service::{
    domain::month,
    query::{self, history::Entry},
};

use super::{money, Render};

/// Rendered [`query::History`].
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct History(pub Vec<Row>);

/// Single closed month of the [`History`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// ID of the closed month.
    pub month_id: month::Id,

    /// Number of units sold.
    pub total_units: u32,

    /// Final commission.
    pub final_commission: Decimal,

    /// [`DateTime`] when the month was closed.
    pub closed_at: DateTime,
}

impl From<Vec<Entry>> for History {
    fn from(entries: Vec<Entry>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|e| Row {
                    month_id: e.month_id,
                    total_units: e.total_units,
                    final_commission: e.final_commission,
                    closed_at: e.closed_at.coerce(),
                })
                .collect(),
        )
    }
}

impl Render for History {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No closed months yet.");
        }
        for row in &self.0 {
            writeln!(
                f,
                "{}  {:>3} units  {:>12}  closed {}",
                row.month_id,
                row.total_units,
                money(row.final_commission),
                row.closed_at.date(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{super::Text, History, Row};

    #[test]
    fn renders_rows() {
        let history = History(vec![Row {
            month_id: "2024-04".parse().unwrap(),
            total_units: 7,
            final_commission: "4725".parse().unwrap(),
            closed_at: DateTime::from_rfc3339("2024-04-30T21:15:00Z")
                .unwrap(),
        }]);

        assert_eq!(
            Text(&history).to_string(),
            "2024-04    7 units       4725.00  closed 2024-04-30\n",
        );

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json[0]["monthId"], "2024-04");
        assert_eq!(json[0]["finalCommission"], "4725");
    }

    #[test]
    fn renders_empty_history() {
        assert_eq!(
            Text(&History(vec![])).to_string(),
            "No closed months yet.\n",
        );
    }
}
