use bikeshare::config::ExplorerSettings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data interactively")]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Rows per page when browsing raw data
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Path to a JSON settings file. Defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags take precedence over the settings file.
    pub fn apply(&self, mut settings: ExplorerSettings) -> ExplorerSettings {
        if let Some(dir) = &self.data_dir {
            settings.data_dir.clone_from(dir);
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        settings
    }
}
