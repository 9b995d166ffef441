//! Descriptive statistics over a filtered trip table.
//!
//! Each reporter has a pure `compute` half returning a small struct and a
//! `report` half that prints it. [`run_reports`] prints the four reports in a
//! fixed order and stops at the first failure; output already written stays.
//!
//! Counting is done with a Polars `group_by`. Equal counts are ordered by
//! ascending value, so a mode never depends on row order.

pub mod duration;
pub mod stations;
pub mod travel_time;
pub mod users;

use crate::error::{ExplorerError, Result};
use crate::filters::SEPARATOR;
use polars::prelude::*;
use std::io::Write;
use std::time::Instant;

pub type ReportFn = fn(&DataFrame, &mut dyn Write) -> Result<()>;

pub struct Report {
    pub name: &'static str,
    pub heading: &'static str,
    pub run: ReportFn,
}

pub const REPORTS: [Report; 4] = [
    Report {
        name: "travel_time",
        heading: "Calculating The Most Frequent Times of Travel...",
        run: travel_time::report,
    },
    Report {
        name: "stations",
        heading: "Calculating The Most Popular Stations and Trip...",
        run: stations::report,
    },
    Report {
        name: "duration",
        heading: "Calculating Trip Duration...",
        run: duration::report,
    },
    Report {
        name: "users",
        heading: "Calculating User Stats...",
        run: users::report,
    },
];

impl Report {
    /// Prints the heading, the statistics and how long they took.
    ///
    /// # Errors
    ///
    /// Returns the reporter's failure; the closing timing lines are not printed.
    pub fn render(&self, df: &DataFrame, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "\n{}\n", self.heading)?;
        let start = Instant::now();

        (self.run)(df, out)?;

        let elapsed = start.elapsed();
        tracing::debug!(report = self.name, ?elapsed, "report finished");
        writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
        writeln!(out, "{SEPARATOR}")?;
        Ok(())
    }
}

/// # Errors
///
/// Returns the first reporter failure; later reporters do not run.
pub fn run_reports(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    for report in &REPORTS {
        report.render(df, out)?;
    }
    Ok(())
}

/// Looks up `name` and checks its type, turning both a missing column and a
/// wrong type into [`ExplorerError::Precondition`].
pub(crate) fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
    expected: &str,
    accept: impl Fn(&DataType) -> bool,
) -> Result<&'a Column> {
    let column = df
        .column(name)
        .map_err(|_| ExplorerError::Precondition(format!("column '{name}' is missing")))?;
    if !accept(column.dtype()) {
        return Err(ExplorerError::Precondition(format!(
            "column '{name}' should be {expected} but is {}",
            column.dtype()
        )));
    }
    Ok(column)
}

/// Name of the group size column produced by [`value_counts`].
pub(crate) const COUNT: &str = "count";

/// Counts each distinct combination of `keys`, skipping rows where any key is
/// null. Rows come most frequent first, ties in ascending key order.
pub(crate) fn value_counts(lf: LazyFrame, keys: &[&str]) -> Result<DataFrame> {
    let key_exprs: Vec<Expr> = keys.iter().map(|&key| col(key)).collect();
    let present = key_exprs
        .iter()
        .map(|key| key.clone().is_not_null())
        .reduce(|all, next| all.and(next))
        .unwrap_or_else(|| lit(true));

    let mut order = vec![col(COUNT)];
    order.extend(key_exprs.iter().cloned());
    let mut descending = vec![true];
    descending.extend(keys.iter().map(|_| false));

    let counts = lf
        .filter(present)
        .group_by(key_exprs)
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort_by_exprs(
            order,
            SortMultipleOptions::default().with_order_descending_multi(descending),
        )
        .collect()?;
    Ok(counts)
}

/// Value counts of a column read as text, most frequent first.
pub(crate) fn text_counts(df: &DataFrame, name: &str) -> Result<Vec<(String, u64)>> {
    let text = df
        .clone()
        .lazy()
        .select([col(name).cast(DataType::String)]);
    let counts = value_counts(text, &[name])?;

    let values = counts.column(name)?.as_materialized_series().str()?;
    let sizes = counts.column(COUNT)?.as_materialized_series().u64()?;
    Ok(values
        .into_iter()
        .zip(sizes)
        .filter_map(|(value, size)| Some((value?.to_owned(), size?)))
        .collect())
}

/// Most frequent value of a text column, lowest on ties.
pub(crate) fn text_mode(df: &DataFrame, name: &str) -> Result<String> {
    text_counts(df, name)?
        .into_iter()
        .next()
        .map(|(value, _)| value)
        .ok_or_else(|| empty(name))
}

pub(crate) fn empty(name: &str) -> ExplorerError {
    ExplorerError::EmptyColumn(name.to_owned())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::loader::{START_TIME, TRIP_DURATION};

    #[test]
    fn test_require_column_reports_missing_and_mistyped() {
        let df = df!(TRIP_DURATION => &["long", "short"]).unwrap();

        let missing = require_column(&df, START_TIME, "a datetime", |_| true);
        assert!(matches!(missing, Err(ExplorerError::Precondition(msg)) if msg.contains("missing")));

        let mistyped =
            require_column(&df, TRIP_DURATION, "numeric", DataType::is_primitive_numeric);
        assert!(matches!(mistyped, Err(ExplorerError::Precondition(msg)) if msg.contains("numeric")));
    }

    #[test]
    fn test_value_counts_order_count_then_value() {
        let df = df!(
            "kind" => &["Customer", "Subscriber", "Dependent", "Subscriber", "Customer", "Subscriber"]
        )
        .unwrap();
        assert_eq!(
            text_counts(&df, "kind").unwrap(),
            vec![
                ("Subscriber".to_owned(), 3),
                ("Customer".to_owned(), 2),
                ("Dependent".to_owned(), 1)
            ]
        );
    }

    #[test]
    fn test_text_mode_skips_nulls_and_breaks_ties_low() {
        let df = df!("station" => &[Some("b"), None, None, None, Some("a"), Some("b"), Some("a")])
            .unwrap();
        assert_eq!(text_mode(&df, "station").unwrap(), "a");
    }

    #[test]
    fn test_pair_counts_drop_incomplete_rows() {
        let df = df!(
            "from" => &[Some("A"), None, None, Some("B"), Some("A")],
            "to" => &[Some("B"), Some("C"), Some("C"), Some("A"), Some("B")]
        )
        .unwrap();
        let counts = value_counts(df.lazy(), &["from", "to"]).unwrap();
        assert_eq!(counts.height(), 2);
        let sizes = counts.column(COUNT).unwrap().as_materialized_series().u64().unwrap();
        assert_eq!(sizes.get(0), Some(2));
        assert_eq!(sizes.get(1), Some(1));
    }

    #[test]
    fn test_text_mode_of_empty_column_fails() {
        let df = df!("station" => Vec::<String>::new()).unwrap();
        assert!(matches!(text_mode(&df, "station"), Err(ExplorerError::EmptyColumn(_))));
    }

    #[test]
    fn test_render_stops_before_timing_on_failure() {
        let df = df!("unrelated" => &[1, 2]).unwrap();
        let mut out = Vec::new();

        assert!(run_reports(&df, &mut out).is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(!text.contains("This took"), "{text}");
        assert!(!text.contains("Popular Stations"), "later reports must not run");
    }
}
