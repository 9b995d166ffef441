use super::require_column;
use crate::error::Result;
use crate::loader::TRIP_DURATION;
use polars::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationTotals {
    /// Seconds summed over every trip
    pub total: f64,
    /// `None` when the table is empty
    pub mean: Option<f64>,
}

/// # Errors
///
/// Fails with [`crate::error::ExplorerError::Precondition`] unless
/// `Trip Duration` is numeric.
pub fn compute(df: &DataFrame) -> Result<DurationTotals> {
    let column = require_column(df, TRIP_DURATION, "numeric", DataType::is_primitive_numeric)?;
    let seconds = column.as_materialized_series().cast(&DataType::Float64)?;
    let ca = seconds.f64()?;

    Ok(DurationTotals {
        total: ca.sum().unwrap_or(0.0),
        mean: ca.mean(),
    })
}

pub fn report(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    let totals = compute(df)?;
    writeln!(out, "The total travel time is {:.0} seconds", totals.total)?;
    writeln!(
        out,
        "The average travel time is {:.2} seconds",
        totals.mean.unwrap_or(f64::NAN)
    )?;
    Ok(())
}
