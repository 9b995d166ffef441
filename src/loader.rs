//! Dataset loading and month/day filtering.
//!
//! A trip matches a month (or weekday) filter when either its start or its end
//! timestamp falls in that month, so a ride across midnight on the last day of
//! a month is visible under both months.

use crate::config::ExplorerSettings;
use crate::error::{ExplorerError, Result, ResultExt as _};
use crate::filters::{DayFilter, MonthFilter, TripFilters};
use polars::prelude::*;
use std::path::Path;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Loads the city's trips and applies the month and day filters.
///
/// # Errors
///
/// - [`ExplorerError::InvalidPath`] if the dataset file does not exist
/// - [`ExplorerError::Parse`] if a start or end time is not a valid timestamp
/// - any other read or filtering failure from Polars
pub fn load_data(settings: &ExplorerSettings, filters: &TripFilters) -> Result<DataFrame> {
    let path = settings.dataset_path(filters.city);
    let trips = parse_timestamps(read_trips(&path)?)?;
    let filtered = apply_filters(trips, filters.month, filters.day)?;

    tracing::info!(
        city = %filters.city,
        month = ?filters.month,
        day = ?filters.day,
        rows = filtered.height(),
        "loaded trips"
    );
    Ok(filtered)
}

/// Reads a trip CSV with its header row; timestamps stay as text.
pub fn read_trips(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ExplorerError::InvalidPath(path.display().to_string()));
    }

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Converts the start and end time columns to datetimes.
///
/// Values may use a space or `T` between date and time and may carry
/// fractional seconds. Any other text fails the whole load.
pub fn parse_timestamps(df: DataFrame) -> Result<DataFrame> {
    for name in [START_TIME, END_TIME] {
        if let Some(value) = first_unparsable(&df, name).map_err(parse_error)? {
            return Err(ExplorerError::Parse(format!(
                "'{value}' in column '{name}' is not a valid timestamp"
            )));
        }
    }

    df.lazy()
        .with_columns([timestamp(START_TIME), timestamp(END_TIME)])
        .collect()
        .map_err(parse_error)
}

fn parse_error(err: PolarsError) -> ExplorerError {
    ExplorerError::Parse(err.to_string())
}

fn first_unparsable(df: &DataFrame, name: &str) -> PolarsResult<Option<String>> {
    let rejected = df
        .clone()
        .lazy()
        .filter(col(name).is_not_null().and(timestamp(name).is_null()))
        .select([col(name)])
        .limit(1)
        .collect()?;
    Ok(rejected
        .column(name)?
        .as_materialized_series()
        .str()?
        .get(0)
        .map(str::to_owned))
}

fn timestamp(name: &str) -> Expr {
    let [first, rest @ ..] = TIMESTAMP_FORMATS;
    rest.iter().fold(timestamp_with(name, first), |parsed, format| {
        parsed.fill_null(timestamp_with(name, format))
    })
}

fn timestamp_with(name: &str, format: &str) -> Expr {
    col(name).str().to_datetime(
        Some(TimeUnit::Microseconds),
        None,
        StrptimeOptions {
            format: Some(format.into()),
            strict: false,
            ..Default::default()
        },
        lit("raise"),
    )
}

/// Keeps trips that start or end in the selected month and on the selected day.
///
/// `All` leaves the frame untouched.
pub fn apply_filters(df: DataFrame, month: MonthFilter, day: DayFilter) -> Result<DataFrame> {
    let mut lf = df.lazy();

    if let Some(number) = month.number() {
        lf = lf.filter(on_either_end(|ts| ts.dt().month(), number));
    }

    // Polars weekdays are ISO numbered, Monday = 1.
    if let Some(index) = day.index() {
        lf = lf.filter(on_either_end(|ts| ts.dt().weekday(), index + 1));
    }

    Ok(lf.collect()?)
}

fn on_either_end(part: impl Fn(Expr) -> Expr, target: u32) -> Expr {
    let matches = |name: &str| part(col(name)).cast(DataType::UInt32).eq(lit(target));
    matches(START_TIME).or(matches(END_TIME))
}
