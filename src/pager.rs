use crate::console::Console;
use crate::error::Result;
use crate::filters::SEPARATOR;
use polars::prelude::DataFrame;
use std::io::{BufRead, Write};

/// Shows `df` in pages of `page_size` rows, asking before each further page.
///
/// Stops without asking once the last row has been shown. An empty table
/// prints a single empty page followed by the end notice.
///
/// # Errors
///
/// Propagates console read and write failures.
pub fn show_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    df: &DataFrame,
    page_size: usize,
) -> Result<()> {
    let total = df.height();
    let mut page = 0;

    loop {
        let offset = page * page_size;
        let rows = df.slice(i64::try_from(offset).unwrap_or(i64::MAX), page_size);
        writeln!(
            console.out(),
            "Showing the data [{}:{}] out of {total}",
            offset + 1,
            offset + page_size
        )?;
        writeln!(console.out(), "{rows}")?;

        page += 1;
        if page * page_size >= total {
            writeln!(console.out(), "\nThere is no more data to show.")?;
            break;
        }
        if !console.confirm("Continue to next page? Enter yes or no. (default to no)")? {
            break;
        }
    }

    tracing::debug!(pages = page, rows = total, "raw data pager closed");
    writeln!(console.out(), "{SEPARATOR}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use polars::prelude::*;
    use std::io::Cursor;

    fn rows(n: i64) -> DataFrame {
        df!("trip" => (1..=n).collect::<Vec<_>>()).unwrap()
    }

    fn page(df: &DataFrame, answers: &str) -> String {
        let mut console = Console::new(Cursor::new(answers.to_owned()), Vec::new());
        show_raw_data(&mut console, df, 5).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_twelve_rows_make_three_pages() {
        let out = page(&rows(12), "yes\nY\n");
        assert!(out.contains("Showing the data [1:5] out of 12"));
        assert!(out.contains("Showing the data [6:10] out of 12"));
        assert!(out.contains("Showing the data [11:15] out of 12"));
        assert_eq!(out.matches("Continue to next page?").count(), 2);
        assert!(out.contains("There is no more data to show."));
        assert!(out.contains("shape: (2, 1)"), "last page holds two rows: {out}");
    }

    #[test]
    fn test_declining_stops_paging() {
        let out = page(&rows(12), "no\n");
        assert_eq!(out.matches("Showing the data").count(), 1);
        assert!(!out.contains("There is no more data"));
    }

    #[test]
    fn test_exact_multiple_needs_no_extra_prompt() {
        let out = page(&rows(10), "y\n");
        assert_eq!(out.matches("Showing the data").count(), 2);
        assert_eq!(out.matches("Continue to next page?").count(), 1);
    }

    #[test]
    fn test_empty_table_shows_one_empty_page() {
        let out = page(&rows(0), "");
        assert!(out.contains("Showing the data [1:5] out of 0"));
        assert!(out.contains("There is no more data to show."));
        assert!(!out.contains("Continue to next page?"));
    }
}
