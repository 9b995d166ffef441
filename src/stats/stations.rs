use super::{empty, text_mode, value_counts};
use crate::error::Result;
use crate::loader::{END_STATION, START_STATION};
use polars::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationUsage {
    pub start: String,
    pub end: String,
    /// Most frequent (start, end) pair
    pub trip: (String, String),
}

/// # Errors
///
/// Fails if either station column is missing or has no values.
pub fn compute(df: &DataFrame) -> Result<StationUsage> {
    let start = text_mode(df, START_STATION)?;
    let end = text_mode(df, END_STATION)?;

    let stations = df.clone().lazy().select([
        col(START_STATION).cast(DataType::String),
        col(END_STATION).cast(DataType::String),
    ]);
    let pairs = value_counts(stations, &[START_STATION, END_STATION])?;

    let from = pairs.column(START_STATION)?.as_materialized_series().str()?.get(0);
    let to = pairs.column(END_STATION)?.as_materialized_series().str()?.get(0);
    let trip = from
        .zip(to)
        .map(|(from, to)| (from.to_owned(), to.to_owned()))
        .ok_or_else(|| empty(START_STATION))?;

    Ok(StationUsage { start, end, trip })
}

pub fn report(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    let usage = compute(df)?;
    writeln!(out, "The most commonly used start station is \"{}\"", usage.start)?;
    writeln!(out, "The most commonly used end station is \"{}\"", usage.end)?;
    writeln!(
        out,
        "The most frequent trip is from \"{}\" to \"{}\".",
        usage.trip.0, usage.trip.1
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::error::ExplorerError;

    #[test]
    fn test_most_popular_stations_and_trip() {
        let df = df!(
            START_STATION => &["Canal St", "Canal St", "Lake Shore Dr", "Canal St", "Lake Shore Dr"],
            END_STATION => &["Clinton St", "Clinton St", "Canal St", "Streeter Dr", "Streeter Dr"]
        )
        .unwrap();

        let usage = compute(&df).unwrap();
        assert_eq!(usage.start, "Canal St");
        // Clinton St and Streeter Dr tie at two trips each
        assert_eq!(usage.end, "Clinton St");
        assert_eq!(
            usage.trip,
            ("Canal St".to_owned(), "Clinton St".to_owned())
        );
    }

    #[test]
    fn test_pairs_with_missing_station_are_ignored() {
        let df = df!(
            START_STATION => &[Some("A"), None, None, Some("B")],
            END_STATION => &[Some("B"), Some("C"), Some("C"), Some("A")]
        )
        .unwrap();

        let usage = compute(&df).unwrap();
        assert_eq!(usage.end, "C");
        assert_eq!(usage.trip, ("A".to_owned(), "B".to_owned()));
    }

    #[test]
    fn test_empty_table_fails() {
        let df = df!(
            START_STATION => Vec::<String>::new(),
            END_STATION => Vec::<String>::new()
        )
        .unwrap();
        assert!(matches!(compute(&df), Err(ExplorerError::EmptyColumn(_))));
    }
}
