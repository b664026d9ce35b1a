//! [`domain::Parameters`]-related views.

use std::fmt;

use itertools::Itertools as _;
use serde::Serialize;
use service::domain::{self, parameters::Category};

use super::{percent, Render};

/// Rendered [`domain::Parameters`].
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(transparent)]
pub struct Parameters<'a>(pub &'a domain::Parameters);

impl Render for Parameters<'_> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.0;

        writeln!(
            f,
            "Base commission rate: {} of the price without VAT",
            percent(params.base_commission_rate),
        )?;
        for category in Category::ALL {
            let tiers = params
                .tiers
                .get(*category)
                .iter()
                .sorted_by(|a, b| {
                    a.threshold.cmp(&b.threshold).then_with(|| a.id.cmp(&b.id))
                })
                .format_with(", ", |t, f| {
                    f(&format_args!(
                        "{} {} -> {}",
                        t.id,
                        t.threshold,
                        percent(t.percentage),
                    ))
                });
            writeln!(
                f,
                "{:<9} weight {:>6}  tiers: {tiers}",
                category.to_string(),
                percent(params.weights.get(*category)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::{super::Text, Parameters};

    #[test]
    fn renders_defaults() {
        let params = domain::Parameters::default();

        let text = Text(&Parameters(&params)).to_string();

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "Base commission rate: 0.5% of the price without VAT",
        );
        assert!(lines[1].starts_with("volume    weight  30.0%"));
        assert!(lines[4].ends_with("q3 4.78 -> 100.0%"));
    }
}
