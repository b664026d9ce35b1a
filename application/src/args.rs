//! [`Args`] definitions.

use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use service::domain::{month, parameters::Category, sale, tier};

/// Tiered sales commission calculator.
#[derive(Debug, Parser)]
#[command(name = "comis", version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: String,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the active month, or switch to another one.
    Month {
        /// Month to switch to, in `YYYY-MM` format.
        id: Option<month::Id>,
    },

    /// Manage sales of the active month.
    #[command(subcommand)]
    Sale(SaleCommand),

    /// Manage commission parameters of the active month.
    #[command(subcommand)]
    Params(ParamsCommand),

    /// Set the quality score of the active month, or `unset` it.
    Quality {
        /// Score in `[0, 5]` range, or `unset`.
        #[arg(allow_negative_numbers = true)]
        score: Score,
    },

    /// Show the commission summary of a month.
    Summary {
        /// Month to summarize, the active one by default.
        id: Option<month::Id>,
    },

    /// Close the active month, freezing its commission forever.
    Close,

    /// List closed months, the most recent first.
    History,

    /// Export all the months as a JSON backup.
    Export {
        /// File to write the backup to, standard output by default.
        path: Option<PathBuf>,
    },

    /// Replace all the months with a JSON backup.
    Import {
        /// File to read the backup from.
        path: PathBuf,
    },
}

/// Command managing sales.
#[derive(Debug, Subcommand)]
pub enum SaleCommand {
    /// Record a new sale.
    Add {
        /// Client who bought.
        #[arg(long)]
        client: sale::Client,

        /// Model being sold.
        #[arg(long)]
        model: sale::Model,

        /// Price including VAT.
        #[arg(long)]
        price: sale::Price,

        /// Date of the sale in `YYYY-MM-DD` format, today by default.
        #[arg(long)]
        date: Option<sale::Date>,

        /// Sale belongs to the targeted product mix.
        #[arg(long)]
        mix: bool,

        /// Sale is financed.
        #[arg(long)]
        financed: bool,
    },

    /// Delete a sale.
    Delete {
        /// ID of the sale.
        id: sale::Id,
    },

    /// Delete all the sales.
    Clear,

    /// List all the sales.
    List,
}

/// Command managing commission parameters.
#[derive(Debug, Subcommand)]
pub enum ParamsCommand {
    /// Show the parameters.
    Show,

    /// Set the base commission rate.
    Rate {
        /// Fraction of a price without VAT, e.g. `0.005`.
        rate: Decimal,
    },

    /// Set the weight of a bonus category.
    Weight {
        /// One of `volume`, `mix`, `financing` or `quality`.
        category: Category,

        /// Weight as a fraction, e.g. `0.3`.
        weight: Decimal,
    },

    /// Add a tier to a bonus category, or replace the one with the same ID.
    Tier {
        /// One of `volume`, `mix`, `financing` or `quality`.
        category: Category,

        /// ID of the tier.
        id: tier::Id,

        /// Minimal achieved value the tier applies to.
        threshold: Decimal,

        /// Bonus percentage as a fraction, e.g. `0.75`.
        percentage: Decimal,
    },

    /// Remove a tier from a bonus category.
    RemoveTier {
        /// One of `volume`, `mix`, `financing` or `quality`.
        category: Category,

        /// ID of the tier.
        id: tier::Id,
    },

    /// Restore the default parameters.
    Reset,
}

/// Quality score argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Score {
    /// Score to be set.
    Set(Decimal),

    /// Score to be unset.
    Unset,
}

impl FromStr for Score {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unset") {
            return Ok(Self::Unset);
        }
        s.parse()
            .map(Self::Set)
            .map_err(|_| "expected a number or `unset`")
    }
}

impl From<Score> for Option<Decimal> {
    fn from(score: Score) -> Self {
        match score {
            Score::Set(s) => Some(s),
            Score::Unset => None,
        }
    }
}
