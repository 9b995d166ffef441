use super::{empty, require_column, text_counts, value_counts};
use crate::error::Result;
use crate::loader::{BIRTH_YEAR, GENDER, USER_TYPE};
use polars::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Value counts, most frequent first
    pub user_types: Vec<(String, u64)>,
    pub genders: Vec<(String, u64)>,
    pub birth_years: BirthYears,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthYears {
    pub earliest: f64,
    pub latest: f64,
    /// Mode over birth years rounded to whole years. Years outside the
    /// `i64` range take no part in it.
    pub most_common: i64,
}

/// # Errors
///
/// Fails with [`crate::error::ExplorerError::Precondition`] when `Birth Year`
/// is missing or not numeric (the Washington dataset has neither `Gender` nor
/// `Birth Year`), or when `Gender` is missing.
pub fn compute(df: &DataFrame) -> Result<UserProfile> {
    let birth_year =
        require_column(df, BIRTH_YEAR, "numeric", DataType::is_primitive_numeric)?;
    require_column(df, GENDER, "present", |_| true)?;

    let user_types = text_counts(df, USER_TYPE)?;
    let genders = text_counts(df, GENDER)?;

    let years = birth_year.as_materialized_series().cast(&DataType::Float64)?;
    let years = years.f64()?;
    let birth_years = match (years.min(), years.max(), most_common_year(df)?) {
        (Some(earliest), Some(latest), Some(most_common)) => BirthYears {
            earliest,
            latest,
            most_common,
        },
        _ => return Err(empty(BIRTH_YEAR)),
    };

    Ok(UserProfile {
        user_types,
        genders,
        birth_years,
    })
}

/// Rounds half up, then casts; the non-strict cast turns years that do not
/// fit an `i64` into nulls, which the count skips.
fn most_common_year(df: &DataFrame) -> Result<Option<i64>> {
    let year = col(BIRTH_YEAR).cast(DataType::Float64) + lit(0.5);
    let rounded = df
        .clone()
        .lazy()
        .select([year.floor().cast(DataType::Int64).alias(BIRTH_YEAR)]);
    let counts = value_counts(rounded, &[BIRTH_YEAR])?;
    Ok(counts.column(BIRTH_YEAR)?.as_materialized_series().i64()?.get(0))
}

fn write_counts(out: &mut dyn Write, counts: &[(String, u64)]) -> std::io::Result<()> {
    let width = counts.iter().map(|(value, _)| value.len()).max().unwrap_or(0);
    for (value, count) in counts {
        writeln!(out, "{value:<width$}    {count}")?;
    }
    Ok(())
}

pub fn report(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    let profile = compute(df)?;

    writeln!(out, "The counts of user types:")?;
    write_counts(out, &profile.user_types)?;

    writeln!(out, "\n\nThe counts of gender:")?;
    write_counts(out, &profile.genders)?;
    writeln!(out)?;

    let years = profile.birth_years;
    writeln!(out, "The earliest year of birth is {:.0}.", years.earliest)?;
    writeln!(out, "The latest year of birth is {:.0}.", years.latest)?;
    writeln!(out, "The most common year of birth is {}.", years.most_common)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::error::ExplorerError;
    use crate::loader::TRIP_DURATION;

    fn riders() -> DataFrame {
        df!(
            USER_TYPE => &["Subscriber", "Customer", "Subscriber", "Customer", "Subscriber"],
            GENDER => &[Some("Male"), None, Some("Female"), None, Some("Male")],
            BIRTH_YEAR => &[Some(1985.0), None, Some(1990.0), None, Some(1985.0)]
        )
        .unwrap()
    }

    #[test]
    fn test_profile_counts_and_years() {
        let profile = compute(&riders()).unwrap();
        assert_eq!(
            profile.user_types,
            vec![("Subscriber".to_owned(), 3), ("Customer".to_owned(), 2)]
        );
        assert_eq!(
            profile.genders,
            vec![("Male".to_owned(), 2), ("Female".to_owned(), 1)]
        );
        assert_eq!(
            profile.birth_years,
            BirthYears {
                earliest: 1985.0,
                latest: 1990.0,
                most_common: 1985
            }
        );
    }

    #[test]
    fn test_missing_birth_year_violates_precondition() {
        let df = df!(
            USER_TYPE => &["Subscriber"],
            TRIP_DURATION => &[600]
        )
        .unwrap();
        let err = compute(&df).unwrap_err();
        assert!(
            matches!(&err, ExplorerError::Precondition(msg) if msg.contains(BIRTH_YEAR)),
            "{err}"
        );
    }

    #[test]
    fn test_year_mode_rounds_and_ties_low() {
        let df = df!(
            USER_TYPE => &["Subscriber"; 4],
            GENDER => &["Male"; 4],
            BIRTH_YEAR => &[1990.4, 1989.6, 1975.0, 1975.2]
        )
        .unwrap();
        let years = compute(&df).unwrap().birth_years;
        assert_eq!(years.most_common, 1975);
        assert!((years.earliest - 1975.0).abs() < f64::EPSILON);
        assert!((years.latest - 1990.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_year_is_left_out_of_mode() {
        let df = df!(
            USER_TYPE => &["Subscriber"; 3],
            GENDER => &["Female"; 3],
            BIRTH_YEAR => &[1.0e300, 1.0e300, 1988.0]
        )
        .unwrap();
        assert_eq!(compute(&df).unwrap().birth_years.most_common, 1988);

        let unusable = df!(
            USER_TYPE => &["Subscriber"],
            GENDER => &["Female"],
            BIRTH_YEAR => &[f64::MAX]
        )
        .unwrap();
        assert!(matches!(compute(&unusable), Err(ExplorerError::EmptyColumn(_))));
    }

    #[test]
    fn test_report_layout() {
        let mut out = Vec::new();
        report(&riders(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("The counts of user types:\nSubscriber    3\nCustomer      2\n"), "{text}");
        assert!(text.contains("The counts of gender:\nMale      2\nFemale    1\n"), "{text}");
        assert!(text.ends_with(
            "The earliest year of birth is 1985.\nThe latest year of birth is 1990.\nThe most common year of birth is 1985.\n"
        ));
    }
}
