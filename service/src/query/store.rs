//! [`Query`] collection related to the whole [`Store`].

use common::operations::By;

use crate::domain::Store;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the whole [`Store`] for exporting it as a backup.
pub type Export = DatabaseQuery<By<Store, ()>>;

#[cfg(test)]
mod spec {
    use super::Export;
    use crate::{
        domain::{month, Store},
        infra::Memory,
        Query as _, Service,
    };

    #[test]
    fn exports_whole_store() {
        let mut store = Store::new("2024-05".parse().unwrap());
        _ = store.select("2024-06".parse::<month::Id>().unwrap());
        let svc = Service::new(Default::default(), Memory::new(store.clone()));

        let exported = svc.execute(Export::all()).unwrap();

        assert_eq!(exported, store);
    }
}
