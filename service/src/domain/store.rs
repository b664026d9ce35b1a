//! [`Store`] definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{month, Month, Parameters};

/// All the [`Month`]s along with the currently active one.
///
/// The active [`Month`] always exists in a [`Store`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Record", rename_all = "camelCase")]
pub struct Store {
    /// [`month::Id`] of the active [`Month`].
    active_month: month::Id,

    /// [`Month`]s by their [`month::Id`]s.
    months: BTreeMap<month::Id, Month>,
}

impl Store {
    /// Creates a new [`Store`] with the only open [`Month`] having the default
    /// [`Parameters`].
    #[must_use]
    pub fn new(active_month: month::Id) -> Self {
        Self {
            active_month,
            months: BTreeMap::from([(
                active_month,
                Month::new(Parameters::default()),
            )]),
        }
    }

    /// Returns [`month::Id`] of the active [`Month`].
    #[must_use]
    pub fn active_month(&self) -> month::Id {
        self.active_month
    }

    /// Returns the active [`Month`].
    #[must_use]
    pub fn active(&self) -> &Month {
        self.months
            .get(&self.active_month)
            .unwrap_or_else(|| unreachable!("active `Month` always exists"))
    }

    /// Returns the mutable active [`Month`].
    pub fn active_mut(&mut self) -> &mut Month {
        self.months
            .entry(self.active_month)
            .or_insert_with(|| Month::new(Parameters::default()))
    }

    /// Returns the [`Month`] with the provided [`month::Id`], if any.
    #[must_use]
    pub fn month(&self, id: month::Id) -> Option<&Month> {
        self.months.get(&id)
    }

    /// Iterates over all the [`Month`]s in chronological order.
    pub fn months(&self) -> impl Iterator<Item = (month::Id, &Month)> {
        self.months.iter().map(|(id, m)| (*id, m))
    }

    /// Makes the [`Month`] with the provided [`month::Id`] active.
    ///
    /// A missing [`Month`] is created with a copy of the [`Parameters`] of the
    /// previously active one.
    ///
    /// Returns `true` if the [`Month`] has been created.
    pub fn select(&mut self, id: month::Id) -> bool {
        let created = !self.months.contains_key(&id);
        if created {
            let parameters = self.active().parameters().clone();
            _ = self.months.insert(id, Month::new(parameters));
        }
        self.active_month = id;
        created
    }

    /// Returns the closed [`Month`]s, the most recent first.
    #[must_use]
    pub fn closed(&self) -> Vec<(month::Id, &Month)> {
        self.months
            .iter()
            .rev()
            .filter(|(_, m)| m.is_closed())
            .map(|(id, m)| (*id, m))
            .collect()
    }
}

/// Stored representation of a [`Store`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    /// [`month::Id`] of the active [`Month`].
    active_month: month::Id,

    /// [`Month`]s by their [`month::Id`]s.
    #[serde(default)]
    months: BTreeMap<month::Id, Month>,
}

impl From<Record> for Store {
    fn from(record: Record) -> Self {
        let Record {
            active_month,
            mut months,
        } = record;

        _ = months
            .entry(active_month)
            .or_insert_with(|| Month::new(Parameters::default()));

        Self {
            active_month,
            months,
        }
    }
}
