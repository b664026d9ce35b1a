//! Infrastructure layer.

pub mod database;

pub use self::database::{Database, Memory};
#[cfg(feature = "json")]
pub use self::database::{json, Json};
