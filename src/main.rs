//! # Bikeshare Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings, apply flag overrides
//!   ├─> Initialize logging (file + stderr)
//!   └─> Run the interactive session on stdin/stdout
//! ```
//!
//! With no flags the program reads the three city CSV files from the current
//! directory and shows raw data five rows at a time.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stderr)] // logging setup failures, before tracing exists

mod cli;

use anyhow::{Context as _, Result};
use bikeshare::config::load_settings;
use bikeshare::console::Console;
use bikeshare::logging;
use bikeshare::session::Session;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let settings = cli.apply(
        load_settings(cli.config.as_deref()).context("Failed to load settings")?,
    );
    settings.validate().context("Invalid settings")?;

    if let Err(err) = logging::init(settings.log_to_file) {
        eprintln!("Logging disabled: {err:#}");
    }
    tracing::info!(?settings, "starting bikeshare explorer");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());

    Session::new(&settings, console)
        .run()
        .context("Terminal I/O failed")?;
    Ok(())
}
