//! [`Parameters`] of the commission model.

use common::define_kind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{tier, Tier};

/// Parameters of the commission model a month is calculated with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Fraction of a price without VAT paid as a base commission.
    pub base_commission_rate: Decimal,

    /// [`Weights`] of the bonus [`Category`]s.
    pub weights: Weights,

    /// [`Schedule`] of the bonus [`Category`]s.
    pub tiers: Schedule,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            base_commission_rate: Decimal::new(5, 3),
            weights: Weights {
                volume: Decimal::new(30, 2),
                mix: Decimal::new(20, 2),
                financing: Decimal::new(30, 2),
                quality: Decimal::new(20, 2),
            },
            tiers: Schedule {
                volume: vec![
                    default_tier("v1", (6, 0), (50, 2)),
                    default_tier("v2", (8, 0), (75, 2)),
                    default_tier("v3", (10, 0), (100, 2)),
                ],
                mix: vec![
                    default_tier("m1", (30, 2), (30, 2)),
                    default_tier("m2", (50, 2), (50, 2)),
                    default_tier("m3", (60, 2), (60, 2)),
                ],
                financing: vec![
                    default_tier("f1", (15, 2), (50, 2)),
                    default_tier("f2", (30, 2), (75, 2)),
                    default_tier("f3", (40, 2), (100, 2)),
                ],
                quality: vec![
                    default_tier("q1", (460, 2), (50, 2)),
                    default_tier("q2", (470, 2), (75, 2)),
                    default_tier("q3", (478, 2), (100, 2)),
                ],
            },
        }
    }
}

/// Builds a [`Tier`] of the default [`Parameters`] out of `(mantissa, scale)`
/// pairs.
fn default_tier(
    id: &'static str,
    (threshold, threshold_scale): (i64, u32),
    (pct, pct_scale): (i64, u32),
) -> Tier {
    Tier {
        id: tier::Id::new(id).unwrap_or_else(|| unreachable!("valid ID")),
        threshold: Decimal::new(threshold, threshold_scale),
        percentage: Decimal::new(pct, pct_scale),
    }
}

define_kind! {
    #[doc = "Category of a bonus."]
    enum Category {
        #[doc = "Number of sold units."]
        Volume = 1,

        #[doc = "Fraction of sales belonging to the targeted product mix."]
        Mix = 2,

        #[doc = "Fraction of financed sales."]
        Financing = 3,

        #[doc = "Externally evaluated quality score."]
        Quality = 4,
    }
}

/// Weights of the bonus [`Category`]s.
///
/// Weights are not required to sum up to `1`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Weights {
    /// Weight of the [`Category::Volume`] bonus.
    pub volume: Decimal,

    /// Weight of the [`Category::Mix`] bonus.
    pub mix: Decimal,

    /// Weight of the [`Category::Financing`] bonus.
    pub financing: Decimal,

    /// Weight of the [`Category::Quality`] bonus.
    pub quality: Decimal,
}

impl Weights {
    /// Returns the weight of the provided [`Category`].
    #[must_use]
    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Volume => self.volume,
            Category::Mix => self.mix,
            Category::Financing => self.financing,
            Category::Quality => self.quality,
        }
    }

    /// Returns a mutable weight of the provided [`Category`].
    #[must_use]
    pub fn get_mut(&mut self, category: Category) -> &mut Decimal {
        match category {
            Category::Volume => &mut self.volume,
            Category::Mix => &mut self.mix,
            Category::Financing => &mut self.financing,
            Category::Quality => &mut self.quality,
        }
    }
}

/// [`Tier`]s of every bonus [`Category`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schedule {
    /// [`Tier`]s of the [`Category::Volume`] bonus.
    pub volume: Vec<Tier>,

    /// [`Tier`]s of the [`Category::Mix`] bonus.
    pub mix: Vec<Tier>,

    /// [`Tier`]s of the [`Category::Financing`] bonus.
    pub financing: Vec<Tier>,

    /// [`Tier`]s of the [`Category::Quality`] bonus.
    pub quality: Vec<Tier>,
}

impl Schedule {
    /// Returns [`Tier`]s of the provided [`Category`].
    #[must_use]
    pub fn get(&self, category: Category) -> &[Tier] {
        match category {
            Category::Volume => &self.volume,
            Category::Mix => &self.mix,
            Category::Financing => &self.financing,
            Category::Quality => &self.quality,
        }
    }

    /// Returns mutable [`Tier`]s of the provided [`Category`].
    #[must_use]
    pub fn get_mut(&mut self, category: Category) -> &mut Vec<Tier> {
        match category {
            Category::Volume => &mut self.volume,
            Category::Mix => &mut self.mix,
            Category::Financing => &mut self.financing,
            Category::Quality => &mut self.quality,
        }
    }

    /// Inserts the provided [`Tier`] into the [`Category`], replacing the one
    /// with the same [`tier::Id`], if any.
    ///
    /// Returns the replaced [`Tier`].
    pub fn upsert(&mut self, category: Category, tier: Tier) -> Option<Tier> {
        let tiers = self.get_mut(category);
        if let Some(existing) = tiers.iter_mut().find(|t| t.id == tier.id) {
            return Some(std::mem::replace(existing, tier));
        }
        tiers.push(tier);
        None
    }

    /// Removes the [`Tier`] with the provided [`tier::Id`] from the
    /// [`Category`].
    pub fn remove(
        &mut self,
        category: Category,
        id: &tier::Id,
    ) -> Option<Tier> {
        let tiers = self.get_mut(category);
        let pos = tiers.iter().position(|t| &t.id == id)?;
        Some(tiers.remove(pos))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Category, Parameters};
    use crate::domain::{tier, Tier};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn defaults() {
        let params = Parameters::default();

        assert_eq!(params.base_commission_rate, decimal("0.005"));
        assert_eq!(params.weights.get(Category::Volume), decimal("0.30"));
        assert_eq!(params.weights.get(Category::Quality), decimal("0.20"));
        for category in Category::ALL {
            assert_eq!(params.tiers.get(*category).len(), 3);
        }
        assert_eq!(params.tiers.quality[2].threshold, decimal("4.78"));
    }

    #[test]
    fn upserts_tiers_by_id() {
        let mut params = Parameters::default();
        let id = tier::Id::new("m2").unwrap();

        let replaced = params.tiers.upsert(
            Category::Mix,
            Tier::new(id, decimal("0.45"), decimal("0.55")),
        );

        assert_eq!(replaced.unwrap().threshold, decimal("0.50"));
        assert_eq!(params.tiers.mix.len(), 3);
        assert_eq!(params.tiers.mix[1].percentage, decimal("0.55"));

        let added = params.tiers.upsert(
            Category::Mix,
            Tier::new(
                tier::Id::new("m4").unwrap(),
                decimal("0.8"),
                decimal("1"),
            ),
        );

        assert!(added.is_none());
        assert_eq!(params.tiers.mix.len(), 4);
    }

    #[test]
    fn removes_tiers_by_id() {
        let mut params = Parameters::default();

        let removed = params
            .tiers
            .remove(Category::Financing, &tier::Id::new("f1").unwrap());

        assert_eq!(removed.unwrap().percentage, decimal("0.50"));
        assert_eq!(params.tiers.financing.len(), 2);
        assert!(params
            .tiers
            .remove(Category::Financing, &tier::Id::new("f1").unwrap())
            .is_none());
    }

    #[test]
    fn category_names() {
        assert_eq!(Category::Financing.to_string(), "financing");
        assert_eq!("mix".parse::<Category>().unwrap(), Category::Mix);
        assert!("speed".parse::<Category>().is_err());
    }
}
