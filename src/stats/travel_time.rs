use super::{empty, require_column, value_counts};
use crate::error::{ExplorerError, Result};
use crate::filters::{day_name, month_name};
use crate::loader::START_TIME;
use polars::prelude::*;
use std::io::Write;

/// Most common start month (1 = January), weekday (Monday = 0) and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelTimes {
    pub month: u32,
    pub weekday: u32,
    pub hour: u32,
}

/// # Errors
///
/// Fails with [`ExplorerError::Precondition`] unless `Start Time` is a
/// datetime column, and with [`ExplorerError::EmptyColumn`] on an empty table.
pub fn compute(df: &DataFrame) -> Result<TravelTimes> {
    require_column(df, START_TIME, "a datetime", |dtype| {
        matches!(dtype, DataType::Datetime(_, _))
    })?;

    let parts = df.clone().lazy().select([
        col(START_TIME).dt().month().cast(DataType::UInt32).alias("month"),
        col(START_TIME).dt().weekday().cast(DataType::UInt32).alias("weekday"),
        col(START_TIME).dt().hour().cast(DataType::UInt32).alias("hour"),
    ]);

    let iso_weekday = mode_of(parts.clone(), "weekday")?;
    Ok(TravelTimes {
        month: mode_of(parts.clone(), "month")?,
        weekday: iso_weekday.checked_sub(1).ok_or_else(|| empty(START_TIME))?,
        hour: mode_of(parts, "hour")?,
    })
}

fn mode_of(parts: LazyFrame, name: &str) -> Result<u32> {
    let counts = value_counts(parts, &[name])?;
    counts
        .column(name)?
        .as_materialized_series()
        .u32()?
        .get(0)
        .ok_or_else(|| empty(START_TIME))
}

pub fn report(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    let times = compute(df)?;
    let month = month_name(times.month)
        .ok_or_else(|| ExplorerError::Other(format!("no month numbered {}", times.month)))?;
    let day = day_name(times.weekday)
        .ok_or_else(|| ExplorerError::Other(format!("no weekday numbered {}", times.weekday)))?;

    writeln!(out, "The most common month is {month}")?;
    writeln!(out, "The most common day is {day}")?;
    writeln!(out, "The most common hour is {}", times.hour)?;
    Ok(())
}
