//! [`History`] definition.

use common::operations::{By, Select};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Month;
use crate::{
    domain::{month, Store},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] listing the closed [`Month`]s, the most recent first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct History;

/// Closed [`Month`] in the [`History`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry {
    /// ID of the closed [`Month`].
    pub month_id: month::Id,

    /// Number of units sold in the [`Month`].
    pub total_units: u32,

    /// Final commission of the [`Month`].
    pub final_commission: Decimal,

    /// [`DateTime`] when the [`Month`] was closed.
    ///
    /// [`DateTime`]: common::DateTime
    pub closed_at: month::ClosingDateTime,
}

impl<Db> Query<History> for Service<Db>
where
    Db: Database<
        Select<By<Store, ()>>,
        Ok = Store,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Entry>;
    type Err = Traced<database::Error>;

    fn execute(&self, _: History) -> Result<Self::Ok, Self::Err> {
        let store = self
            .database()
            .execute(Select(By::all()))
            .map_err(tracerr::wrap!())?;

        Ok(store
            .closed()
            .into_iter()
            .filter_map(|(month_id, month)| {
                let closing = month.closing()?;
                Some(Entry {
                    month_id,
                    total_units: closing.summary.total_units,
                    final_commission: closing.summary.final_commission,
                    closed_at: closing.closed_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::History;
    use crate::{
        domain::{
            month::{ClosingDateTime, QualityGate},
            sale, Store,
        },
        infra::Memory,
        Query as _, Service,
    };

    #[test]
    fn lists_closed_months_most_recent_first() {
        let mut store = Store::new("2024-01".parse().unwrap());
        for (id, sales) in [("2024-02", 1), ("2024-03", 2), ("2024-04", 0)] {
            _ = store.select(id.parse().unwrap());
            let month = store.active_mut();
            for _ in 0..sales {
                _ = month
                    .add_sale(sale::Draft {
                        date: "2024-02-01".parse().unwrap(),
                        client: "Ana".parse().unwrap(),
                        model: "Corolla".parse().unwrap(),
                        price_with_vat: "121000".parse().unwrap(),
                        in_mix: false,
                        is_financed: false,
                    })
                    .unwrap();
            }
            month.set_quality_score(Some(Decimal::from(4))).unwrap();
            if sales > 0 {
                _ = month
                    .close(QualityGate::Legacy, ClosingDateTime::now())
                    .unwrap();
            }
        }
        let svc = Service::new(Default::default(), Memory::new(store));

        let history = svc.execute(History).unwrap();

        let listed = history
            .iter()
            .map(|e| (e.month_id.to_string(), e.final_commission))
            .collect::<Vec<_>>();
        assert_eq!(
            listed,
            [
                ("2024-03".to_owned(), Decimal::from(1000)),
                ("2024-02".to_owned(), Decimal::from(500)),
            ],
        );
    }
}
