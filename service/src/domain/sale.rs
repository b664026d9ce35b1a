//! [`Sale`] definitions.

use std::{fmt, str::FromStr};

use derive_more::{AsRef, Display};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Iso8601;
use uuid::Uuid;

/// VAT rate included into the entered sale prices.
pub const VAT_RATE: Decimal = Decimal::from_parts(121, 0, 0, false, 2);

/// Single recorded sale.
///
/// Derived amounts are calculated once on creation and never change
/// afterwards: the only way to correct a [`Sale`] is to delete it and enter it
/// again.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// ID of this [`Sale`].
    pub id: Id,

    /// [`Date`] of this [`Sale`].
    pub date: Date,

    /// [`Client`] who bought.
    pub client: Client,

    /// [`Model`] being sold.
    pub model: Model,

    /// Entered [`Price`] including VAT.
    pub price_with_vat: Price,

    /// Indicator whether this [`Sale`] belongs to the targeted product mix.
    pub in_mix: bool,

    /// Indicator whether this [`Sale`] is financed.
    pub is_financed: bool,

    /// Price without VAT.
    price_without_vat: Decimal,

    /// Base commission earned by this [`Sale`].
    base_commission_unit: Decimal,
}

impl Sale {
    /// Records a new [`Sale`] out of the provided [`Draft`], freezing the
    /// base commission with the provided `base_commission_rate`.
    #[must_use]
    pub fn new(draft: Draft, base_commission_rate: Decimal) -> Self {
        let Draft {
            date,
            client,
            model,
            price_with_vat,
            in_mix,
            is_financed,
        } = draft;

        // Dividing by a rate greater than `1` never overflows.
        let price_without_vat = price_with_vat.0 / VAT_RATE;

        Self {
            id: Id::new(),
            date,
            client,
            model,
            price_with_vat,
            in_mix,
            is_financed,
            price_without_vat,
            base_commission_unit: price_without_vat
                .saturating_mul(base_commission_rate),
        }
    }

    /// Returns the price of this [`Sale`] without VAT.
    #[must_use]
    pub fn price_without_vat(&self) -> Decimal {
        self.price_without_vat
    }

    /// Returns the base commission earned by this [`Sale`].
    #[must_use]
    pub fn base_commission_unit(&self) -> Decimal {
        self.base_commission_unit
    }
}

/// Entered data of a new [`Sale`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Date`] of the [`Sale`].
    pub date: Date,

    /// [`Client`] who bought.
    pub client: Client,

    /// [`Model`] being sold.
    pub model: Model,

    /// [`Price`] including VAT.
    pub price_with_vat: Price,

    /// Indicator whether the [`Sale`] belongs to the targeted product mix.
    pub in_mix: bool,

    /// Indicator whether the [`Sale`] is financed.
    pub is_financed: bool,
}

/// ID of a [`Sale`].
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
    /// Creates a new random [`Id`].
    #[expect(clippy::new_without_default, reason = "random value")]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        // Older records carry arbitrary non-UUID identifiers.
        if s.trim() != s || s.is_empty() {
            return Err("invalid `sale::Id`");
        }
        Ok(Self(s))
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Calendar date of a [`Sale`], formatted as `YYYY-MM-DD`.
///
/// Older records may carry no date at all, stored as an empty string.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Date(Option<time::Date>);

impl Date {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self(Some(common::DateTime::now().date()))
    }

    /// Returns the calendar date, unless it's missing in an older record.
    #[must_use]
    pub fn get(self) -> Option<time::Date> {
        self.0
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(Some(date))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{date}"),
            None => Ok(()),
        }
    }
}

impl FromStr for Date {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, &Iso8601::DATE)
            .map(Self::from)
            .map_err(|_| "invalid `sale::Date`, expected `YYYY-MM-DD`")
    }
}

impl TryFrom<String> for Date {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Ok(Self(None));
        }
        s.parse()
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

/// Name of a client who bought in a [`Sale`].
///
/// Stored names are kept as entered, only new ones are validated.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(from = "String", into = "String")]
pub struct Client(String);

impl Client {
    /// Creates a new [`Client`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_text(&name).then_some(Self(name))
    }
}

impl FromStr for Client {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("invalid `sale::Client`")
    }
}

impl From<String> for Client {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<Client> for String {
    fn from(client: Client) -> Self {
        client.0
    }
}

/// Model being sold in a [`Sale`].
///
/// Stored models are kept as entered, only new ones are validated.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(from = "String", into = "String")]
pub struct Model(String);

impl Model {
    /// Creates a new [`Model`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_text(&name).then_some(Self(name))
    }
}

impl FromStr for Model {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("invalid `sale::Model`")
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.0
    }
}

/// Checks whether the given descriptive `text` is valid.
fn check_text(text: &str) -> bool {
    text.trim() == text && !text.is_empty() && text.len() <= 512
}

/// Positive price of a [`Sale`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the provided `amount` is positive.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `sale::Price`, expected a positive number")
    }
}

impl TryFrom<Decimal> for Price {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("`sale::Price` must be positive")
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}
