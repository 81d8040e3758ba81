use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, TripError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Rank the busiest pickup zones and hour slots in a trip log
#[derive(Parser, Debug, Clone)]
#[command(
    name = "trip-analyzer",
    about = "Rank the busiest pickup zones and hour slots in a trip log",
    version
)]
pub struct Settings {
    /// Trip-log CSV file (first line is treated as a header)
    pub csv_path: PathBuf,

    /// Number of zones to list (zero or negative lists none)
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    pub top_zones: i64,

    /// Number of (zone, hour) slots to list (zero or negative lists none)
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    pub top_slots: i64,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Check that the CSV path points at an existing file.
    ///
    /// The analyzer itself tolerates a missing file; this lets the binary
    /// tell the operator why the rankings came back empty.
    pub fn validate(&self) -> Result<()> {
        if !self.csv_path.is_file() {
            return Err(TripError::Config(format!(
                "CSV path is not a readable file: {}",
                self.csv_path.display()
            )));
        }
        Ok(())
    }

    /// Whether results should be printed as JSON.
    pub fn json_output(&self) -> bool {
        self.format == "json"
    }

    /// `--debug` overrides log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
