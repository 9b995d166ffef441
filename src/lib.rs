//! # Bikeshare - Interactive Trip Data Explorer
//!
//! Loads the Chicago, New York City or Washington bikeshare trip records,
//! narrows them to a month and weekday, and prints descriptive statistics:
//! popular travel times, popular stations, trip durations and rider
//! demographics. Raw rows can be browsed a page at a time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare::config::ExplorerSettings;
//! use bikeshare::filters::TripFilters;
//! use bikeshare::{loader, stats};
//!
//! # fn example() -> bikeshare::error::Result<()> {
//! let settings = ExplorerSettings::default();
//! let filters = TripFilters {
//!     city: "chicago".parse()?,
//!     month: "mar".parse()?,
//!     day: "all".parse()?,
//! };
//!
//! let trips = loader::load_data(&settings, &filters)?;
//! stats::run_reports(&trips, &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`filters`]: city/month/day grammar and the filter prompts
//! - [`loader`]: CSV loading, timestamp parsing, start-or-end filtering
//! - [`stats`]: the four statistics reports
//! - [`pager`]: paginated raw data view
//! - [`session`]: the interactive loop tying it together
//!
//! Ambient pieces live in [`config`], [`console`], [`error`] and [`logging`].
//!
//! ## Tabular Engine
//!
//! Data handling is done with Polars. Loading goes through a `LazyFrame` so
//! parsing and filtering are planned together and only the matching rows are
//! materialised:
//!
//! ```no_run
//! use polars::prelude::*;
//!
//! let long_trips = LazyCsvReader::new("chicago.csv")
//!     .with_has_header(true)
//!     .finish()?
//!     .filter(col("Trip Duration").gt(lit(3600)))
//!     .collect()?;
//! # Ok::<(), PolarsError>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod console;
pub mod error;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod pager;
pub mod session;
pub mod stats;
