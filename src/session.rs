//! The interactive loop: prompt, load, optionally page, report, ask to restart.
//!
//! ```text
//! Prompting ─> Loading ─┬─> OfferingRawData ─┬─> Paging ─┐
//!     ^                 │                    └───────────┴─> Reporting ─> AskingRestart ─┬─> Finished
//!     └─────────────────┴ (load failed)                                                  │
//!     └──────────────────────────────────────────────────────────────────── (yes) ───────┘
//! ```
//!
//! Failures are values: a load error sends the user back to the prompts, a
//! report error is printed and the loop moves on to the restart question.
//! Closing the input ends the session from any state.

use crate::config::ExplorerSettings;
use crate::console::Console;
use crate::error::{ExplorerError, Result};
use crate::filters::{TripFilters, get_filters};
use crate::loader::load_data;
use crate::pager::show_raw_data;
use crate::stats::run_reports;
use polars::prelude::DataFrame;
use std::io::{BufRead, Write};

enum SessionState {
    Prompting,
    Loading(TripFilters),
    OfferingRawData(DataFrame),
    Paging(DataFrame),
    Reporting(DataFrame),
    AskingRestart,
    Finished,
}

pub struct Session<'a, R, W> {
    settings: &'a ExplorerSettings,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(settings: &'a ExplorerSettings, console: Console<R, W>) -> Self {
        Self { settings, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs iterations until the user declines to restart or input closes.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures escape; data and statistics failures are
    /// reported to the user and handled inside the loop.
    pub fn run(&mut self) -> Result<()> {
        let mut state = SessionState::Prompting;
        loop {
            state = match self.step(state) {
                Ok(SessionState::Finished) | Err(ExplorerError::Aborted) => break,
                Ok(next) => next,
                Err(err) => return Err(err),
            };
        }
        tracing::info!("session finished");
        Ok(())
    }

    fn step(&mut self, state: SessionState) -> Result<SessionState> {
        let next = match state {
            SessionState::Prompting => SessionState::Loading(get_filters(&mut self.console)?),
            SessionState::Loading(filters) => match load_data(self.settings, &filters) {
                Ok(df) => SessionState::OfferingRawData(df),
                Err(err) => {
                    tracing::warn!(%err, city = %filters.city, "load failed");
                    writeln!(self.console.out(), "Load data failed, please try again.")?;
                    SessionState::Prompting
                }
            },
            SessionState::OfferingRawData(df) => {
                if self.console.confirm(
                    "Would you like to checkout the raw data? Enter yes or no. (default to no)",
                )? {
                    SessionState::Paging(df)
                } else {
                    SessionState::Reporting(df)
                }
            }
            SessionState::Paging(df) => {
                show_raw_data(&mut self.console, &df, self.settings.page_size)?;
                SessionState::Reporting(df)
            }
            SessionState::Reporting(df) => {
                if let Err(err) = run_reports(&df, self.console.out()) {
                    tracing::warn!(%err, "statistics failed");
                    let out = self.console.out();
                    writeln!(
                        out,
                        "Something went wrong while analyzing the data, the error is:\n"
                    )?;
                    writeln!(out, "{err}")?;
                }
                SessionState::AskingRestart
            }
            SessionState::AskingRestart => {
                if self
                    .console
                    .confirm("Would you like to restart? Enter yes or no. (default to no)")?
                {
                    SessionState::Prompting
                } else {
                    SessionState::Finished
                }
            }
            SessionState::Finished => SessionState::Finished,
        };
        Ok(next)
    }
}
