//! [`Command`] for importing a [`Store`] backup.

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Store,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing the whole [`Store`] with a backup.
#[derive(Clone, Debug)]
pub struct ImportStore(pub Store);

impl<Db> Command<ImportStore> for Service<Db>
where
    Db: Database<Insert<Store>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: ImportStore) -> Result<Self::Ok, Self::Err> {
        let ImportStore(store) = cmd;
        let (active, months) = (store.active_month(), store.months().count());

        self.database()
            .execute(Insert(store))
            .map_err(tracerr::wrap!())?;

        log::info!("`Store` imported: {months} `Month`s, active `{active}`");
        Ok(())
    }
}

/// Error of [`ImportStore`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use super::ImportStore;
    use crate::{
        domain::Store,
        infra::{Database as _, Memory},
        Command as _, Service,
    };

    #[test]
    fn replaces_whole_store() {
        let svc = Service::new(
            Default::default(),
            Memory::new(Store::new("2024-05".parse().unwrap())),
        );
        let backup = serde_json::from_str::<Store>(
            r#"{
                "activeMonth": "2023-12",
                "months": {
                    "2023-11": {"status": "open"},
                    "2023-12": {"status": "open", "qualityScore": 4.9}
                }
            }"#,
        )
        .unwrap();

        svc.execute(ImportStore(backup.clone())).unwrap();

        let store = svc
            .database()
            .execute(Select(By::<Store, ()>::all()))
            .unwrap();
        assert_eq!(store, backup);
        assert_eq!(store.active_month().to_string(), "2023-12");
    }
}
