//! In-memory [`Database`] implementation.

use std::cell::RefCell;

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{month, Store},
    infra::{database, Database},
};

/// [`Database`] keeping a [`Store`] in memory.
///
/// Nothing survives the process, so it's meant for tests and dry runs.
#[derive(Clone, Debug)]
pub struct Memory(RefCell<Store>);

impl Memory {
    /// Creates a new [`Memory`] holding the provided [`Store`].
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self(RefCell::new(store))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(Store::new(month::Id::current()))
    }
}

impl Database<Select<By<Store, ()>>> for Memory {
    type Ok = Store;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        _: Select<By<Store, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.borrow().clone())
    }
}

impl Database<Insert<Store>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Insert(store): Insert<Store>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.replace(store));
        Ok(())
    }
}
