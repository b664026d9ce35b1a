//! [`Month`]-related views.

use std::fmt;

use common::DateTime;
use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::Serialize;
use service::{
    domain::{
        month::{self, Precondition, Status},
        parameters::Category,
        summary::Achievement,
        Month, Parameters, Sale, Summary,
    },
    query::month_report,
};

use super::{money, percent, Render};

/// Rendered [`month_report::Output`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// ID of the reported [`Month`].
    pub month_id: month::Id,

    /// Indicator whether the reported [`Month`] is the active one.
    pub is_active: bool,

    /// [`Status`] of the reported [`Month`].
    pub status: Status,

    /// Quality score of the reported [`Month`], if entered.
    pub quality_score: Option<Decimal>,

    /// [`Sale`]s of the reported [`Month`].
    pub sales: Vec<Sale>,

    /// [`Parameters`] of the reported [`Month`].
    pub parameters: Parameters,

    /// Frozen or live [`Summary`] of the reported [`Month`].
    pub summary: Summary,

    /// Breakdown of the [`Summary`] bonuses.
    pub achievements: Vec<Achievement>,

    /// [`Precondition`]s preventing the [`Month`] from being closed.
    pub unmet_preconditions: Vec<Precondition>,

    /// [`DateTime`] when the [`Month`] was closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime>,
}

impl From<month_report::Output> for Report {
    fn from(output: month_report::Output) -> Self {
        let month_report::Output {
            month_id,
            is_active,
            month,
            summary,
            achievements,
            unmet,
        } = output;

        Self {
            month_id,
            is_active,
            status: month.status(),
            quality_score: month.quality_score(),
            sales: month.sales().to_vec(),
            parameters: month.parameters().clone(),
            summary,
            achievements,
            unmet_preconditions: unmet,
            closed_at: month.closing().map(|c| c.closed_at.coerce()),
        }
    }
}

impl Render for Report {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            month_id,
            is_active,
            status,
            quality_score,
            sales: _,
            parameters: _,
            summary,
            achievements,
            unmet_preconditions,
            closed_at,
        } = self;

        write!(f, "Month {month_id} ({status}")?;
        if *is_active {
            write!(f, ", active")?;
        }
        writeln!(f, ")")?;
        if let Some(at) = closed_at {
            writeln!(f, "Closed at {at}, summary is final")?;
        }
        writeln!(
            f,
            "Quality score: {}",
            quality_score
                .map_or_else(|| "not entered".into(), |s| s.to_string()),
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<18}{:>14}",
            format!("Base ({} units)", summary.total_units),
            money(summary.total_base_commission),
        )?;
        for a in achievements {
            writeln!(
                f,
                "{:<18}{:>14}  {} reached, tier {} x weight {}",
                format!("{} bonus", capitalize(a.category)),
                money(a.bonus),
                achieved(a.category, a.achieved),
                percent(a.tier_percentage),
                percent(a.weight),
            )?;
        }
        writeln!(
            f,
            "{:<18}{:>14}",
            "Final commission",
            money(summary.final_commission),
        )?;

        if !unmet_preconditions.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Cannot be closed yet: {}",
                unmet_preconditions.iter().format("; "),
            )?;
        }
        Ok(())
    }
}

/// Formats the `value` achieved in the provided [`Category`].
fn achieved(category: Category, value: Decimal) -> String {
    match category {
        Category::Volume => format!("{value} units"),
        Category::Mix | Category::Financing => percent(value),
        Category::Quality => format!("score {value}"),
    }
}

/// Returns the capitalized name of the provided [`Category`].
fn capitalize(category: Category) -> String {
    let name = category.to_string();
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
