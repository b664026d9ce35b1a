//! [`Month`] definitions.

use std::{fmt, str::FromStr};

use common::{define_kind, DateTime, DateTimeOf};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{sale, Parameters, Sale, Summary};

/// Calendar month of commission data.
///
/// A [`Month`] is [`Status::Open`] until it's closed: closing consolidates its
/// [`Summary`] forever and rejects any further mutations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Record", into = "Record")]
pub struct Month {
    /// [`Sale`]s recorded in this [`Month`].
    sales: Vec<Sale>,

    /// [`Parameters`] this [`Month`] is calculated with.
    parameters: Parameters,

    /// Quality score of this [`Month`], if entered.
    quality_score: Option<Decimal>,

    /// [`Closing`] of this [`Month`], if it's closed.
    closing: Option<Closing>,
}

/// Consolidated result of a closed [`Month`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Closing {
    /// Frozen [`Summary`] of the [`Month`].
    pub summary: Summary,

    /// [`DateTime`] when the [`Month`] was closed.
    pub closed_at: ClosingDateTime,
}

impl Month {
    /// Creates a new [`Status::Open`] [`Month`] with the provided
    /// [`Parameters`].
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self {
            sales: vec![],
            parameters,
            quality_score: None,
            closing: None,
        }
    }

    /// Returns [`Status`] of this [`Month`].
    #[must_use]
    pub fn status(&self) -> Status {
        if self.closing.is_some() {
            Status::Closed
        } else {
            Status::Open
        }
    }

    /// Indicates whether this [`Month`] is [`Status::Closed`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closing.is_some()
    }

    /// Returns [`Sale`]s of this [`Month`] in the order they were recorded.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Returns [`Parameters`] of this [`Month`].
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the quality score of this [`Month`], if entered.
    #[must_use]
    pub fn quality_score(&self) -> Option<Decimal> {
        self.quality_score
    }

    /// Returns [`Closing`] of this [`Month`], if it's closed.
    #[must_use]
    pub fn closing(&self) -> Option<&Closing> {
        self.closing.as_ref()
    }

    /// Returns the [`Summary`] of this [`Month`].
    ///
    /// A closed [`Month`] always returns its frozen [`Summary`]. An open one is
    /// calculated from its current data, with a missing quality score counted
    /// as zero.
    #[must_use]
    pub fn summary(&self) -> Summary {
        match &self.closing {
            Some(closing) => closing.summary.clone(),
            None => Summary::compute(
                &self.sales,
                &self.parameters,
                self.quality_score.unwrap_or_default(),
            ),
        }
    }

    /// Records a new [`Sale`] with the current base commission rate.
    ///
    /// # Errors
    ///
    /// If this [`Month`] is closed.
    pub fn add_sale(&mut self, draft: sale::Draft) -> Result<&Sale, Closed> {
        self.ensure_open()?;

        let sale = Sale::new(draft, self.parameters.base_commission_rate);
        self.sales.push(sale);
        Ok(self.sales.last().unwrap_or_else(|| unreachable!("just pushed")))
    }

    /// Removes the [`Sale`] with the provided [`sale::Id`].
    ///
    /// [`None`] is returned if there is no such [`Sale`].
    ///
    /// # Errors
    ///
    /// If this [`Month`] is closed.
    pub fn remove_sale(
        &mut self,
        id: &sale::Id,
    ) -> Result<Option<Sale>, Closed> {
        self.ensure_open()?;

        Ok(self
            .sales
            .iter()
            .position(|s| &s.id == id)
            .map(|pos| self.sales.remove(pos)))
    }

    /// Removes all the [`Sale`]s of this [`Month`].
    ///
    /// # Errors
    ///
    /// If this [`Month`] is closed.
    pub fn clear_sales(&mut self) -> Result<Vec<Sale>, Closed> {
        self.ensure_open()?;

        Ok(std::mem::take(&mut self.sales))
    }

    /// Modifies [`Parameters`] of this [`Month`] with the provided function.
    ///
    /// Already recorded [`Sale`]s keep their frozen base commissions.
    ///
    /// # Errors
    ///
    /// If this [`Month`] is closed.
    pub fn update_parameters<R>(
        &mut self,
        update: impl FnOnce(&mut Parameters) -> R,
    ) -> Result<R, Closed> {
        self.ensure_open()?;

        Ok(update(&mut self.parameters))
    }

    /// Sets the quality score of this [`Month`], or unsets it with [`None`].
    ///
    /// # Errors
    ///
    /// If this [`Month`] is closed.
    pub fn set_quality_score(
        &mut self,
        score: Option<Decimal>,
    ) -> Result<(), Closed> {
        self.ensure_open()?;

        self.quality_score = score;
        Ok(())
    }

    /// Lists the [`Precondition`]s preventing this [`Month`] from being
    /// closed under the provided [`QualityGate`].
    #[must_use]
    pub fn unmet_preconditions(&self, gate: QualityGate) -> Vec<Precondition> {
        let mut unmet = vec![];
        if self.sales.is_empty() {
            unmet.push(Precondition::NoSales);
        }
        if !gate.admits(self.quality_score) {
            unmet.push(Precondition::NoQualityScore);
        }
        unmet
    }

    /// Closes this [`Month`], consolidating its [`Summary`].
    ///
    /// # Errors
    ///
    /// - If this [`Month`] is closed already.
    /// - If any [`Precondition`] is unmet.
    pub fn close(
        &mut self,
        gate: QualityGate,
        at: ClosingDateTime,
    ) -> Result<&Closing, CloseError> {
        if self.is_closed() {
            return Err(CloseError::AlreadyClosed);
        }
        let unmet = self.unmet_preconditions(gate);
        if !unmet.is_empty() {
            return Err(CloseError::Unmet(Unmet(unmet)));
        }

        let summary = self.summary();
        Ok(self.closing.insert(Closing {
            summary,
            closed_at: at,
        }))
    }

    /// Ensures this [`Month`] is not closed.
    fn ensure_open(&self) -> Result<(), Closed> {
        if self.is_closed() {
            Err(Closed)
        } else {
            Ok(())
        }
    }
}

define_kind! {
    #[doc = "Status of a [`Month`]."]
    enum Status {
        #[doc = "[`Month`] accepts changes."]
        Open = 1,

        #[doc = "[`Month`] is consolidated and immutable."]
        Closed = 2,
    }
}

/// Rule deciding whether a quality score counts as entered when closing a
/// [`Month`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityGate {
    /// Score must be entered and positive: an exact zero counts as not
    /// entered.
    #[default]
    Legacy,

    /// Score must be entered, zero included.
    Explicit,
}

impl QualityGate {
    /// Checks whether the provided quality `score` passes this
    /// [`QualityGate`].
    #[must_use]
    pub fn admits(self, score: Option<Decimal>) -> bool {
        match (self, score) {
            (Self::Legacy, Some(s)) => s > Decimal::ZERO,
            (Self::Explicit, Some(_)) => true,
            (_, None) => false,
        }
    }
}

/// Precondition of closing a [`Month`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// At least one [`Sale`] must be recorded.
    #[display("at least one sale must be recorded")]
    NoSales,

    /// Quality score must be entered.
    #[display("quality score must be entered and greater than zero")]
    NoQualityScore,
}

/// Error of mutating a closed [`Month`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("`Month` is closed")]
pub struct Closed;

/// Error of closing a [`Month`].
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum CloseError {
    /// [`Month`] is closed already.
    #[display("`Month` is closed already")]
    AlreadyClosed,

    /// Some [`Precondition`]s are unmet.
    #[display("`Month` cannot be closed: {_0}")]
    Unmet(#[error(not(source))] Unmet),
}

/// Non-empty list of unmet [`Precondition`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unmet(Vec<Precondition>);

impl Unmet {
    /// Returns the unmet [`Precondition`]s.
    #[must_use]
    pub fn preconditions(&self) -> &[Precondition] {
        &self.0
    }
}

impl fmt::Display for Unmet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use itertools::Itertools as _;

        write!(f, "{}", self.0.iter().format("; "))
    }
}

/// Marker type indicating [`Month`] closing.
#[derive(Clone, Copy, Debug)]
pub struct Consolidation;

/// [`DateTime`] when a [`Month`] was closed.
pub type ClosingDateTime = DateTimeOf<(Month, Consolidation)>;

/// ID of a [`Month`] in a `YYYY-MM` format.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Id {
    /// Year of the [`Month`].
    year: u16,

    /// Number of the [`Month`] in the year, starting from `1`.
    month: u8,
}

impl Id {
    /// Creates a new [`Id`] if the provided values form a valid month.
    #[must_use]
    pub fn new(year: u16, month: u8) -> Option<Self> {
        ((1..=9999).contains(&year) && (1..=12).contains(&month))
            .then_some(Self { year, month })
    }

    /// Returns the [`Id`] of the current UTC month.
    #[must_use]
    pub fn current() -> Self {
        Self::of(DateTime::now().date())
    }

    /// Returns the [`Id`] of the month the provided `date` belongs to.
    #[must_use]
    pub fn of(date: time::Date) -> Self {
        Self {
            year: u16::try_from(date.year()).unwrap_or_default(),
            month: u8::from(date.month()),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ERR: &str = "invalid `month::Id`, expected `YYYY-MM`";

        let (year, month) = s.split_once('-').ok_or(ERR)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(ERR);
        }
        Self::new(
            year.parse().map_err(|_| ERR)?,
            month.parse().map_err(|_| ERR)?,
        )
        .ok_or(ERR)
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

/// Stored representation of a [`Month`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    /// [`Status`] of the [`Month`].
    status: Status,

    /// [`Sale`]s of the [`Month`].
    #[serde(default)]
    sales: Vec<Sale>,

    /// [`Parameters`] of the [`Month`].
    #[serde(default)]
    parameters: Parameters,

    /// Quality score of the [`Month`].
    #[serde(default)]
    quality_score: Option<Decimal>,

    /// Frozen [`Summary`] of the [`Month`].
    #[serde(default)]
    summary: Option<Summary>,

    /// [`DateTime`] when the [`Month`] was closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    closed_at: Option<ClosingDateTime>,
}

/// Error of restoring a [`Month`] from its [`Record`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
enum RecordError {
    /// Closed [`Month`] has no [`Summary`].
    #[display("closed `Month` has no `summary`")]
    NoSummary,

    /// Closed [`Month`] has no closing [`DateTime`].
    #[display("closed `Month` has no `closedAt`")]
    NoClosingTime,
}

impl TryFrom<Record> for Month {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            status,
            sales,
            parameters,
            quality_score,
            summary,
            closed_at,
        } = record;

        let closing = match status {
            // A summary of an open month is a stale projection at most.
            Status::Open => None,
            Status::Closed => Some(Closing {
                summary: summary.ok_or(RecordError::NoSummary)?,
                closed_at: closed_at.ok_or(RecordError::NoClosingTime)?,
            }),
        };

        Ok(Self {
            sales,
            parameters,
            quality_score,
            closing,
        })
    }
}

impl From<Month> for Record {
    fn from(month: Month) -> Self {
        let status = month.status();
        let Month {
            sales,
            parameters,
            quality_score,
            closing,
        } = month;
        let (summary, closed_at) =
            closing.map(|c| (c.summary, c.closed_at)).unzip();

        Self {
            status,
            sales,
            parameters,
            quality_score,
            summary,
            closed_at,
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{
        CloseError, Closed, ClosingDateTime, Id, Month, Precondition,
        QualityGate, Status,
    };
    use crate::domain::{
        sale::{self, Client, Model},
        Parameters,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn draft(price: &str) -> sale::Draft {
        sale::Draft {
            date: "2024-05-10".parse().unwrap(),
            client: Client::new("Client").unwrap(),
            model: Model::new("Model").unwrap(),
            price_with_vat: price.parse().unwrap(),
            in_mix: false,
            is_financed: false,
        }
    }

    fn closable() -> Month {
        let mut month = Month::new(Parameters::default());
        _ = month.add_sale(draft("121000")).unwrap();
        month.set_quality_score(Some(decimal("4.6"))).unwrap();
        month
    }

    #[test]
    fn starts_open() {
        let month = Month::new(Parameters::default());

        assert_eq!(month.status(), Status::Open);
        assert!(month.sales().is_empty());
        assert_eq!(month.quality_score(), None);
        assert!(month.closing().is_none());
    }

    #[test]
    fn rejects_closing_without_sales() {
        for score in ["0", "3", "4.9", "5"] {
            let mut month = Month::new(Parameters::default());
            month.set_quality_score(Some(decimal(score))).unwrap();

            let err = month
                .close(QualityGate::Legacy, ClosingDateTime::now())
                .unwrap_err();

            let CloseError::Unmet(unmet) = err else {
                panic!("unexpected error: {err}");
            };
            assert!(unmet.preconditions().contains(&Precondition::NoSales));
            assert!(!month.is_closed());
        }
    }

    #[test]
    fn rejects_closing_with_zero_quality_score() {
        for sales in [1, 3, 12] {
            let mut month = Month::new(Parameters::default());
            for _ in 0..sales {
                _ = month.add_sale(draft("1000")).unwrap();
            }
            month.set_quality_score(Some(Decimal::ZERO)).unwrap();

            let err = month
                .close(QualityGate::Legacy, ClosingDateTime::now())
                .unwrap_err();

            assert_eq!(
                err.to_string(),
                "`Month` cannot be closed: \
                 quality score must be entered and greater than zero",
            );
            assert!(!month.is_closed());
        }
    }

    #[test]
    fn reports_every_unmet_precondition() {
        let month = Month::new(Parameters::default());

        assert_eq!(
            month.unmet_preconditions(QualityGate::Legacy),
            [Precondition::NoSales, Precondition::NoQualityScore],
        );
        assert_eq!(
            month.unmet_preconditions(QualityGate::Explicit),
            [Precondition::NoSales, Precondition::NoQualityScore],
        );
    }

    #[test]
    fn explicit_gate_admits_zero_score() {
        let mut month = Month::new(Parameters::default());
        _ = month.add_sale(draft("1000")).unwrap();
        month.set_quality_score(Some(Decimal::ZERO)).unwrap();

        assert!(month.unmet_preconditions(QualityGate::Explicit).is_empty());
        assert!(month
            .close(QualityGate::Explicit, ClosingDateTime::now())
            .is_ok());
    }

    #[test]
    fn closing_freezes_summary() {
        let mut month = closable();
        let at = ClosingDateTime::now();

        let closing = month.close(QualityGate::Legacy, at).unwrap();

        assert_eq!(closing.summary.final_commission, decimal("550"));
        assert_eq!(closing.closed_at, at);
        assert_eq!(month.status(), Status::Closed);
        assert_eq!(month.summary().final_commission, decimal("550"));
    }

    #[test]
    fn closed_month_rejects_mutations() {
        let mut month = closable();
        _ = month
            .close(QualityGate::Legacy, ClosingDateTime::now())
            .unwrap();
        let sale_id = month.sales()[0].id.clone();

        assert_eq!(month.add_sale(draft("5000")).unwrap_err(), Closed);
        assert_eq!(month.remove_sale(&sale_id).unwrap_err(), Closed);
        assert_eq!(month.clear_sales().unwrap_err(), Closed);
        assert_eq!(
            month
                .update_parameters(|p| p.base_commission_rate = decimal("1"))
                .unwrap_err(),
            Closed,
        );
        assert_eq!(month.set_quality_score(None).unwrap_err(), Closed);
        assert_eq!(
            month
                .close(QualityGate::Legacy, ClosingDateTime::now())
                .unwrap_err(),
            CloseError::AlreadyClosed,
        );
        assert_eq!(month.sales().len(), 1);
        assert_eq!(month.quality_score(), Some(decimal("4.6")));
    }

    #[test]
    fn stored_summary_survives_source_changes() {
        let mut month = closable();
        _ = month
            .close(QualityGate::Legacy, ClosingDateTime::now())
            .unwrap();

        let mut json = serde_json::to_value(&month).unwrap();
        json["sales"].as_array_mut().unwrap().clear();
        json["parameters"]["baseCommissionRate"] = "0.5".into();
        let restored = serde_json::from_value::<Month>(json).unwrap();

        assert!(restored.sales().is_empty());
        assert_eq!(restored.summary().final_commission, decimal("550"));
        assert_eq!(restored.summary().total_units, 1);
    }

    #[test]
    fn parameter_edits_keep_recorded_commissions() {
        let mut month = Month::new(Parameters::default());
        _ = month.add_sale(draft("121000")).unwrap();

        month
            .update_parameters(|p| p.base_commission_rate = decimal("0.01"))
            .unwrap();
        _ = month.add_sale(draft("121000")).unwrap();

        assert_eq!(month.sales()[0].base_commission_unit(), decimal("500"));
        assert_eq!(month.sales()[1].base_commission_unit(), decimal("1000"));
        assert_eq!(month.summary().total_base_commission, decimal("1500"));
    }

    #[test]
    fn removes_sales() {
        let mut month = Month::new(Parameters::default());
        let id = month.add_sale(draft("1000")).unwrap().id.clone();
        _ = month.add_sale(draft("2000")).unwrap();

        assert!(month.remove_sale(&id).unwrap().is_some());
        assert!(month.remove_sale(&id).unwrap().is_none());
        assert_eq!(month.sales().len(), 1);
        assert_eq!(month.clear_sales().unwrap().len(), 1);
        assert!(month.sales().is_empty());
    }

    #[test]
    fn reads_legacy_records() {
        let month = serde_json::from_str::<Month>(
            r#"{
                "status": "closed",
                "sales": [],
                "parameters": {
                    "baseCommissionRate": 0.005,
                    "weights": {
                        "volume": 0.3,
                        "mix": 0.2,
                        "financing": 0.3,
                        "quality": 0.2
                    },
                    "tiers": {
                        "volume": [],
                        "mix": [],
                        "financing": [],
                        "quality": []
                    }
                },
                "qualityScore": 4.8,
                "summary": {
                    "totalUnits": 7,
                    "totalBaseCommission": 3500,
                    "volumeBonus": 525,
                    "mixBonus": 0,
                    "financingBonus": 0,
                    "qualityBonus": 700,
                    "finalCommission": 4725,
                    "stats": {
                        "mixPercentage": 0,
                        "financingPercentage": 0,
                        "qualityScore": 4.8
                    }
                },
                "closedAt": "2024-04-30T21:15:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(month.status(), Status::Closed);
        assert_eq!(month.quality_score(), Some(decimal("4.8")));
        assert_eq!(month.summary().final_commission, decimal("4725"));
    }

    #[test]
    fn rejects_closed_records_without_summary() {
        let result = serde_json::from_str::<Month>(
            r#"{"status": "closed", "summary": null}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn month_ids() {
        let id = "2024-05".parse::<Id>().unwrap();

        assert_eq!(id.to_string(), "2024-05");
        assert_eq!(id, Id::new(2024, 5).unwrap());
        assert!("2024-5".parse::<Id>().is_err());
        assert!("2024-13".parse::<Id>().is_err());
        assert!("2024-00".parse::<Id>().is_err());
        assert!("May 2024".parse::<Id>().is_err());
        assert!(Id::new(2023, 12).unwrap() < id);
        assert!(Id::new(2024, 11).unwrap() > id);
    }
}
