//! [`Summary`] of a commission calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{parameters::Category, tier, Parameters, Sale};

/// Itemized commission breakdown.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of the [`Sale`]s.
    pub total_units: u32,

    /// Sum of the frozen base commissions of the [`Sale`]s.
    pub total_base_commission: Decimal,

    /// Bonus for the [`Category::Volume`].
    pub volume_bonus: Decimal,

    /// Bonus for the [`Category::Mix`].
    pub mix_bonus: Decimal,

    /// Bonus for the [`Category::Financing`].
    pub financing_bonus: Decimal,

    /// Bonus for the [`Category::Quality`].
    pub quality_bonus: Decimal,

    /// Base commission with all the bonuses.
    pub final_commission: Decimal,

    /// Achievements the bonuses were derived from.
    pub stats: Stats,
}

/// Raw achievements a [`Summary`] was derived from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Fraction of the [`Sale`]s belonging to the targeted product mix.
    pub mix_percentage: Decimal,

    /// Fraction of the financed [`Sale`]s.
    pub financing_percentage: Decimal,

    /// Quality score used in the calculation.
    pub quality_score: Decimal,
}

impl Summary {
    /// Calculates the commission of the provided [`Sale`]s.
    ///
    /// The `quality_score` is used literally: clamping it is up to the caller.
    #[must_use]
    pub fn compute(
        sales: &[Sale],
        params: &Parameters,
        quality_score: Decimal,
    ) -> Self {
        let total_units = sales.len();
        let total_base_commission = sales
            .iter()
            .map(Sale::base_commission_unit)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let stats = Stats {
            mix_percentage: ratio(
                sales.iter().filter(|s| s.in_mix).count(),
                total_units,
            ),
            financing_percentage: ratio(
                sales.iter().filter(|s| s.is_financed).count(),
                total_units,
            ),
            quality_score,
        };

        let bonus = |category: Category, achieved: Decimal| {
            total_base_commission
                .saturating_mul(params.weights.get(category))
                .saturating_mul(tier::resolve(
                    achieved,
                    params.tiers.get(category),
                ))
        };
        let volume_bonus = bonus(Category::Volume, Decimal::from(total_units));
        let mix_bonus = bonus(Category::Mix, stats.mix_percentage);
        let financing_bonus =
            bonus(Category::Financing, stats.financing_percentage);
        let quality_bonus = bonus(Category::Quality, stats.quality_score);

        let final_commission =
            [volume_bonus, mix_bonus, financing_bonus, quality_bonus]
                .into_iter()
                .fold(total_base_commission, Decimal::saturating_add);

        Self {
            total_units: u32::try_from(total_units).unwrap_or(u32::MAX),
            total_base_commission,
            volume_bonus,
            mix_bonus,
            financing_bonus,
            quality_bonus,
            final_commission,
            stats,
        }
    }

    /// Returns the value achieved in the provided [`Category`].
    #[must_use]
    pub fn achieved(&self, category: Category) -> Decimal {
        match category {
            Category::Volume => Decimal::from(self.total_units),
            Category::Mix => self.stats.mix_percentage,
            Category::Financing => self.stats.financing_percentage,
            Category::Quality => self.stats.quality_score,
        }
    }

    /// Returns the bonus granted for the provided [`Category`].
    #[must_use]
    pub fn bonus(&self, category: Category) -> Decimal {
        match category {
            Category::Volume => self.volume_bonus,
            Category::Mix => self.mix_bonus,
            Category::Financing => self.financing_bonus,
            Category::Quality => self.quality_bonus,
        }
    }

    /// Explains every bonus of this [`Summary`] against the provided
    /// [`Parameters`].
    #[must_use]
    pub fn achievements(&self, params: &Parameters) -> Vec<Achievement> {
        Category::ALL
            .iter()
            .map(|&category| {
                let achieved = self.achieved(category);
                Achievement {
                    category,
                    achieved,
                    weight: params.weights.get(category),
                    tier_percentage: tier::resolve(
                        achieved,
                        params.tiers.get(category),
                    ),
                    bonus: self.bonus(category),
                }
            })
            .collect()
    }
}

/// Explanation of a single bonus in a [`Summary`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// [`Category`] of the bonus.
    pub category: Category,

    /// Value achieved in the [`Category`].
    pub achieved: Decimal,

    /// Weight of the [`Category`].
    pub weight: Decimal,

    /// Percentage of the reached [`tier::Tier`], or zero.
    pub tier_percentage: Decimal,

    /// Granted bonus.
    pub bonus: Decimal,
}

/// Returns the `part` of the `total` as a fraction, or zero if there is no
/// `total`.
fn ratio(part: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) / Decimal::from(total)
}
