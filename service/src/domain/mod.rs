//! Domain definitions.

pub mod month;
pub mod parameters;
pub mod sale;
pub mod store;
pub mod summary;
pub mod tier;

pub use self::{
    month::Month, parameters::Parameters, sale::Sale, store::Store,
    summary::Summary, tier::Tier,
};
