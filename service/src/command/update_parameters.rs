//! [`Command`] for editing [`Parameters`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Month;
use crate::{
    domain::{month, parameters::Category, tier, Parameters, Store, Tier},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing [`Parameters`] of the active [`Month`].
#[derive(Clone, Debug, From)]
pub struct UpdateParameters(pub Edit);

/// Single edit of [`Parameters`].
#[derive(Clone, Debug)]
pub enum Edit {
    /// Replaces all the [`Parameters`] at once.
    ReplaceAll(Parameters),

    /// Sets the base commission rate.
    BaseCommissionRate(Decimal),

    /// Sets the weight of a [`Category`].
    Weight {
        /// [`Category`] to set the weight of.
        category: Category,

        /// New weight.
        weight: Decimal,
    },

    /// Inserts a [`Tier`] into a [`Category`], or replaces the one with the
    /// same [`tier::Id`].
    UpsertTier {
        /// [`Category`] of the [`Tier`].
        category: Category,

        /// [`Tier`] to upsert.
        tier: Tier,
    },

    /// Removes a [`Tier`] from a [`Category`].
    RemoveTier {
        /// [`Category`] of the [`Tier`].
        category: Category,

        /// [`tier::Id`] of the [`Tier`] to remove.
        tier_id: tier::Id,
    },
}

impl Edit {
    /// Returns the name of the first negative value in this [`Edit`], if any.
    fn negative(&self) -> Option<&'static str> {
        let is_negative = |d: Decimal| d < Decimal::ZERO;
        let tier_negative = |t: &Tier| {
            if is_negative(t.threshold) {
                Some("tier threshold")
            } else {
                is_negative(t.percentage).then_some("tier percentage")
            }
        };

        match self {
            Self::ReplaceAll(params) => {
                if is_negative(params.base_commission_rate) {
                    return Some("base commission rate");
                }
                if Category::ALL
                    .iter()
                    .any(|c| is_negative(params.weights.get(*c)))
                {
                    return Some("weight");
                }
                Category::ALL
                    .iter()
                    .flat_map(|c| params.tiers.get(*c))
                    .find_map(tier_negative)
            }
            Self::BaseCommissionRate(rate) => {
                is_negative(*rate).then_some("base commission rate")
            }
            Self::Weight { weight, .. } => {
                is_negative(*weight).then_some("weight")
            }
            Self::UpsertTier { tier, .. } => tier_negative(tier),
            Self::RemoveTier { .. } => None,
        }
    }
}

impl<Db> Command<UpdateParameters> for Service<Db>
where
    Db: Database<
            Select<By<Store, ()>>,
            Ok = Store,
            Err = Traced<database::Error>,
        > + Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Parameters;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: UpdateParameters) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateParameters(edit) = cmd;

        if let Some(what) = edit.negative() {
            return Err(tracerr::new!(E::NegativeValue(what)));
        }

        let mut store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let month_id = store.active_month();

        store
            .active_mut()
            .update_parameters(|params| match edit {
                Edit::ReplaceAll(new) => {
                    *params = new;
                    Ok(())
                }
                Edit::BaseCommissionRate(rate) => {
                    params.base_commission_rate = rate;
                    Ok(())
                }
                Edit::Weight { category, weight } => {
                    *params.weights.get_mut(category) = weight;
                    Ok(())
                }
                Edit::UpsertTier { category, tier } => {
                    _ = params.tiers.upsert(category, tier);
                    Ok(())
                }
                Edit::RemoveTier { category, tier_id } => params
                    .tiers
                    .remove(category, &tier_id)
                    .map(drop)
                    .ok_or(E::TierNotExists(category, tier_id)),
            })
            .map_err(|_| E::MonthClosed(month_id))
            .map_err(tracerr::wrap!())?
            .map_err(tracerr::wrap!())?;
        let params = store.active().parameters().clone();

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Parameters` of `Month({month_id})` updated");
        Ok(params)
    }
}

/// Error of [`UpdateParameters`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Month`] is closed.
    #[display("`Month({_0})` is closed")]
    #[from(ignore)]
    MonthClosed(#[error(not(source))] month::Id),

    /// Provided value is negative.
    #[display("{_0} cannot be negative")]
    #[from(ignore)]
    NegativeValue(#[error(not(source))] &'static str),

    /// [`Tier`] doesn't exist in the [`Category`].
    #[display("`Tier(id: {_1})` does not exist in `{_0}` category")]
    #[from(ignore)]
    TierNotExists(Category, tier::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use rust_decimal::Decimal;

    use super::{Edit, ExecutionError, UpdateParameters};
    use crate::{
        domain::{parameters::Category, tier, Parameters, Store, Tier},
        infra::{Database as _, Memory},
        Command as _, Service,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> Service<Memory> {
        Service::new(
            Default::default(),
            Memory::new(Store::new("2024-05".parse().unwrap())),
        )
    }

    #[test]
    fn applies_edits() {
        let svc = service();

        _ = svc
            .execute(UpdateParameters(Edit::BaseCommissionRate(
                decimal("0.01"),
            )))
            .unwrap();
        _ = svc
            .execute(UpdateParameters(Edit::Weight {
                category: Category::Mix,
                weight: decimal("0.5"),
            }))
            .unwrap();
        let params = svc
            .execute(UpdateParameters(Edit::UpsertTier {
                category: Category::Volume,
                tier: Tier::new(
                    tier::Id::new("v4").unwrap(),
                    decimal("12"),
                    decimal("1.25"),
                ),
            }))
            .unwrap();

        assert_eq!(params.base_commission_rate, decimal("0.01"));
        assert_eq!(params.weights.mix, decimal("0.5"));
        assert_eq!(params.tiers.volume.len(), 4);
        let store = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(store.active().parameters(), &params);
    }

    #[test]
    fn resets_to_defaults() {
        let svc = service();
        _ = svc
            .execute(UpdateParameters(Edit::BaseCommissionRate(Decimal::ONE)))
            .unwrap();

        let params = svc
            .execute(UpdateParameters(Edit::ReplaceAll(Parameters::default())))
            .unwrap();

        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn rejects_negative_values() {
        let svc = service();

        let err = svc
            .execute(UpdateParameters(Edit::Weight {
                category: Category::Quality,
                weight: decimal("-0.1"),
            }))
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NegativeValue(_)));
        let store = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(store.active().parameters(), &Parameters::default());
    }

    #[test]
    fn rejects_removing_unknown_tier() {
        let svc = service();

        let err = svc
            .execute(UpdateParameters(Edit::RemoveTier {
                category: Category::Mix,
                tier_id: tier::Id::new("v1").unwrap(),
            }))
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::TierNotExists(Category::Mix, _),
        ));
    }
}
