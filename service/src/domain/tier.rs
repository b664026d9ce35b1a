//! [`Tier`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Step of a bonus schedule: reaching the `threshold` grants the `percentage`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tier {
    /// ID of this [`Tier`].
    pub id: Id,

    /// Minimal achieved value this [`Tier`] applies to (inclusive).
    pub threshold: Decimal,

    /// Bonus percentage (as a fraction) granted by this [`Tier`].
    pub percentage: Decimal,
}

impl Tier {
    /// Creates a new [`Tier`].
    #[must_use]
    pub fn new(id: Id, threshold: Decimal, percentage: Decimal) -> Self {
        Self {
            id,
            threshold,
            percentage,
        }
    }
}

/// Resolves the bonus percentage the provided `value` achieves in `tiers`.
///
/// The [`Tier`] with the highest threshold not exceeding the `value` wins.
/// Equal thresholds are ordered by [`Id`], and then by their position in
/// `tiers`. Returns zero if no [`Tier`] is reached.
#[must_use]
pub fn resolve(value: Decimal, tiers: &[Tier]) -> Decimal {
    tiers
        .iter()
        .filter(|t| t.threshold <= value)
        // `min_by()` keeps the first of equal elements.
        .min_by(|a, b| {
            b.threshold.cmp(&a.threshold).then_with(|| a.id.cmp(&b.id))
        })
        .map_or(Decimal::ZERO, |t| t.percentage)
}

/// ID of a [`Tier`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `tier::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `tier::Id`")
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{resolve, Id, Tier};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tier(id: &str, threshold: &str, percentage: &str) -> Tier {
        Tier::new(Id::new(id).unwrap(), decimal(threshold), decimal(percentage))
    }

    fn volume() -> Vec<Tier> {
        vec![
            tier("v1", "6", "0.50"),
            tier("v2", "8", "0.75"),
            tier("v3", "10", "1.00"),
        ]
    }

    #[test]
    fn zero_below_every_threshold() {
        assert_eq!(resolve(decimal("5"), &volume()), Decimal::ZERO);
        assert_eq!(resolve(decimal("-1"), &volume()), Decimal::ZERO);
    }

    #[test]
    fn zero_without_tiers() {
        assert_eq!(resolve(decimal("100"), &[]), Decimal::ZERO);
    }

    #[test]
    fn highest_reached_threshold_wins() {
        let tiers = volume();

        assert_eq!(resolve(decimal("6"), &tiers), decimal("0.50"));
        assert_eq!(resolve(decimal("7"), &tiers), decimal("0.50"));
        assert_eq!(resolve(decimal("8"), &tiers), decimal("0.75"));
        assert_eq!(resolve(decimal("9.99"), &tiers), decimal("0.75"));
        assert_eq!(resolve(decimal("10"), &tiers), decimal("1.00"));
        assert_eq!(resolve(decimal("250"), &tiers), decimal("1.00"));
    }

    #[test]
    fn ignores_storage_order() {
        let mut tiers = volume();
        tiers.reverse();
        tiers.swap(0, 1);

        assert_eq!(resolve(decimal("9"), &tiers), decimal("0.75"));
        assert_eq!(resolve(decimal("11"), &tiers), decimal("1.00"));
    }

    #[test]
    fn breaks_ties_by_id() {
        let tiers = vec![
            tier("b", "0.30", "0.40"),
            tier("a", "0.30", "0.30"),
            tier("c", "0.10", "0.10"),
        ];

        assert_eq!(resolve(decimal("0.35"), &tiers), decimal("0.30"));
        assert_eq!(resolve(decimal("0.2"), &tiers), decimal("0.10"));
    }

    #[test]
    fn breaks_id_ties_by_declaration_order() {
        let tiers =
            vec![tier("x", "1", "0.25"), tier("x", "1", "0.75")];

        assert_eq!(resolve(decimal("1"), &tiers), decimal("0.25"));
    }

    #[test]
    fn is_idempotent() {
        let tiers = volume();

        assert_eq!(
            resolve(decimal("8.5"), &tiers),
            resolve(decimal("8.5"), &tiers),
        );
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(Id::new("").is_none());
        assert!(Id::new(" q1").is_none());
        assert!(Id::new("q1").is_some());
    }
}
