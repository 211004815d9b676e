//! Pattern and repository arguments shared by `preview` and `generate`

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args};

use crate::patterns::{Font, PatternRequest};
use crate::services::settings::Settings;
use crate::services::validation::parse_date;
use crate::types::{CommitLevel, GistoryError, Result};

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.0)
}

/// Which pattern to draw
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("method")
        .required(true)
        .args(["daily", "random", "pattern_file", "image", "text", "raw"])
))]
pub struct PatternArgs {
    /// First day of the pattern (YYYY-MM-DD). GitHub weeks start on Sunday.
    #[arg(long, value_parser = parse_date_arg)]
    pub start_date: NaiveDate,

    /// Same number of commits every day until --end-date
    #[arg(long)]
    pub daily: bool,

    /// Random number of commits every day until --end-date
    #[arg(long)]
    pub random: bool,

    /// Text file of digits 0-4, one line per weekday
    #[arg(long, value_name = "FILE")]
    pub pattern_file: Option<PathBuf>,

    /// Image; darker pixels get more commits
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Text written with --font
    #[arg(long)]
    pub text: Option<String>,

    /// Digits 0-4, one per day
    #[arg(long, value_name = "DIGITS")]
    pub raw: Option<String>,

    /// Last day for --daily and --random (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end_date: Option<NaiveDate>,

    /// Level for --daily and --text
    #[arg(long, value_enum, default_value_t = CommitLevel::Many)]
    pub commit_count: CommitLevel,

    /// Font for --text
    #[arg(long, value_enum, default_value_t = Font::SubwayTracker)]
    pub font: Font,

    /// Seed for --random, for reproducible patterns
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PatternArgs {
    fn require_end_date(&self, method: &str) -> Result<NaiveDate> {
        self.end_date.ok_or_else(|| {
            GistoryError::InvalidArg(format!("--end-date is required for --{method}"))
        })
    }

    /// Turn the selected method into a pattern request
    pub fn to_request(&self) -> Result<PatternRequest> {
        if self.daily {
            return Ok(PatternRequest::Daily {
                end_date: self.require_end_date("daily")?,
                commit_count: self.commit_count,
            });
        }
        if self.random {
            return Ok(PatternRequest::Random {
                end_date: self.require_end_date("random")?,
                seed: self.seed,
            });
        }
        if let Some(path) = &self.pattern_file {
            return Ok(PatternRequest::PatternFile { path: path.clone() });
        }
        if let Some(path) = &self.image {
            return Ok(PatternRequest::Image { path: path.clone() });
        }
        if let Some(text) = &self.text {
            return Ok(PatternRequest::Text {
                text: text.clone(),
                font: self.font,
                commit_count: self.commit_count,
            });
        }
        if let Some(raw) = &self.raw {
            return Ok(PatternRequest::Raw {
                pattern: raw.clone(),
            });
        }
        Err(GistoryError::InvalidArg("No pattern method selected".into()))
    }
}

/// Repository settings. Unset values come from saved settings, then from
/// the global git config.
#[derive(Args, Debug, Default)]
pub struct RepoArgs {
    /// Repository directory name
    #[arg(long)]
    pub repo_name: Option<String>,

    /// GitHub user name (commit author)
    #[arg(long)]
    pub user_name: Option<String>,

    /// Commit author email; must match your GitHub account
    #[arg(long)]
    pub email: Option<String>,

    /// Branch to commit on
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit timezone, like +0700 or -0430
    #[arg(long, allow_hyphen_values = true)]
    pub timezone: Option<String>,

    /// Directory the repository is created in
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl RepoArgs {
    /// Override `settings` with every argument that was given
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(v) = self.repo_name {
            settings.repo_name = v;
        }
        if let Some(v) = self.user_name {
            settings.user_name = v;
        }
        if let Some(v) = self.email {
            settings.email = v;
        }
        if let Some(v) = self.branch {
            settings.branch = v;
        }
        if let Some(v) = self.timezone {
            settings.timezone = v;
        }
        if self.output_dir.is_some() {
            settings.output_dir = self.output_dir;
        }
        settings
    }
}
