//! Persisted defaults for the repository form
//!
//! Stored as JSON in `~/.gistory/settings.json`. Missing author fields fall
//! back to the global git config.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::validation::{
    format_timezone, parse_timezone, validate_author_name, validate_branch, validate_email,
    validate_name,
};
use crate::types::{GistoryError, RepoSettings, Result};

const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "gistory.log";

/// Saved form defaults. Fields are kept as entered so a half-filled form
/// can round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repo_name: String,
    pub user_name: String,
    pub email: String,
    pub branch: String,
    /// `+HHMM` / `-HHMM`
    pub timezone: String,
    /// Where repositories are created; current directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_name: "gistory-art".to_string(),
            user_name: String::new(),
            email: String::new(),
            branch: "main".to_string(),
            // Local UTC offset at startup
            timezone: format_timezone(*Local::now().offset()),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Fill empty author fields from the global git config (`user.name`,
    /// `user.email`). Missing config is not an error.
    pub fn fill_from_git_config(&mut self) {
        let config = match git2::Config::open_default() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("no git config available: {e}");
                return;
            }
        };
        self.fill_from(&config);
    }

    fn fill_from(&mut self, config: &git2::Config) {
        if self.user_name.is_empty() {
            if let Ok(name) = config.get_string("user.name") {
                self.user_name = name;
            }
        }
        if self.email.is_empty() {
            if let Ok(email) = config.get_string("user.email") {
                self.email = email;
            }
        }
    }

    /// Validate every field and build the writer settings
    pub fn to_repo_settings(&self) -> Result<RepoSettings> {
        let invalid = |field: &str, msg: String| GistoryError::InvalidArg(format!("{field}: {msg}"));

        validate_name(&self.repo_name).map_err(|e| invalid("repo name", e.0))?;
        validate_author_name(&self.user_name).map_err(|e| invalid("user name", e.0))?;
        validate_email(&self.email).map_err(|e| invalid("email", e.0))?;
        validate_branch(&self.branch).map_err(|e| invalid("branch", e.0))?;
        let timezone = parse_timezone(&self.timezone).map_err(|e| invalid("timezone", e.0))?;

        Ok(RepoSettings {
            name: self.repo_name.clone(),
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            branch: self.branch.clone(),
            timezone,
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

/// Reads and writes the settings file
pub struct SettingsService {
    dir: PathBuf,
}

impl SettingsService {
    /// Create a new service using the default directory (`~/.gistory/`)
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| GistoryError::Config("Cannot determine home directory".into()))?;
        let dir = base_dirs.home_dir().join(".gistory");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Create a service with a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable
    pub fn load(&self) -> Settings {
        let path = self.settings_path();
        if !path.exists() {
            return Settings::default();
        }

        match fs::read_to_string(&path)
            .map_err(GistoryError::from)
            .and_then(|content| {
                serde_json::from_str(&content).map_err(|e| GistoryError::Parse(e.to_string()))
            }) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring {}: {e}", path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| GistoryError::Config(format!("Failed to serialize settings: {e}")))?;
        fs::write(self.settings_path(), content)?;
        tracing::debug!("saved settings to {}", self.settings_path().display());
        Ok(())
    }
}
