//! Form state: field values, focus and live validation

use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate};

use crate::patterns::{Font, PatternRequest, MAX_TEXT_LEN};
use crate::services::settings::Settings;
use crate::services::validation::{
    parse_date, parse_timezone, require_filled, validate_author_name, validate_branch,
    validate_date_range, validate_email, validate_name, FormErrors, ValidationError,
};
use crate::types::CommitLevel;

use super::widgets::tabs::Tab;

/// Default pattern length when the form opens
const DEFAULT_WEEKS: i64 = 52;

/// A form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StartDate,
    EndDate,
    CommitCount,
    Font,
    Text,
    FilePath,
    RepoName,
    UserName,
    Email,
    Branch,
    Timezone,
}

/// Repository fields, shared by every tab
pub const REPO_FIELDS: [Field; 5] = [
    Field::RepoName,
    Field::UserName,
    Field::Email,
    Field::Branch,
    Field::Timezone,
];

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::StartDate => "Start date",
            Self::EndDate => "End date",
            Self::CommitCount => "Commits per day",
            Self::Font => "Font",
            Self::Text => "Text",
            Self::FilePath => "File path",
            Self::RepoName => "Repo name",
            Self::UserName => "User name",
            Self::Email => "Email",
            Self::Branch => "Branch",
            Self::Timezone => "Timezone",
        }
    }

    /// Key used for validation messages
    pub fn key(self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::CommitCount => "commit_count",
            Self::Font => "font",
            Self::Text => "text",
            Self::FilePath => "file_path",
            Self::RepoName => "repo_name",
            Self::UserName => "user_name",
            Self::Email => "email",
            Self::Branch => "branch",
            Self::Timezone => "timezone",
        }
    }

    /// Select fields cycle with Left/Right instead of taking text input
    pub fn is_select(self) -> bool {
        matches!(self, Self::CommitCount | Self::Font)
    }

    /// Pattern fields for a tab
    pub fn method_fields(tab: Tab) -> &'static [Field] {
        match tab {
            Tab::Daily => &[Field::StartDate, Field::EndDate, Field::CommitCount],
            Tab::Random => &[Field::StartDate, Field::EndDate],
            Tab::PatternFile | Tab::Image => &[Field::StartDate, Field::FilePath],
            Tab::Text => &[
                Field::StartDate,
                Field::Text,
                Field::Font,
                Field::CommitCount,
            ],
            Tab::Manual => &[Field::StartDate, Field::EndDate],
        }
    }

    /// Pattern fields followed by repository fields
    pub fn all_for(tab: Tab) -> Vec<Field> {
        Self::method_fields(tab)
            .iter()
            .chain(REPO_FIELDS.iter())
            .copied()
            .collect()
    }
}

/// Editable form values
#[derive(Debug, Clone)]
pub struct FormState {
    pub start_date: String,
    pub end_date: String,
    pub commit_count: CommitLevel,
    pub font: Font,
    pub text: String,
    pub file_path: String,
    pub repo_name: String,
    pub user_name: String,
    pub email: String,
    pub branch: String,
    pub timezone: String,
    focus: usize,
    errors: FormErrors,
}

/// Sunday on or before `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

impl FormState {
    /// Form prefilled from saved settings, covering the last year
    pub fn new(settings: &Settings, today: NaiveDate) -> Self {
        let start = week_start(today - Duration::weeks(DEFAULT_WEEKS));
        Self {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: today.format("%Y-%m-%d").to_string(),
            commit_count: CommitLevel::Few,
            font: Font::default(),
            text: String::new(),
            file_path: String::new(),
            repo_name: settings.repo_name.clone(),
            user_name: settings.user_name.clone(),
            email: settings.email.clone(),
            branch: settings.branch.clone(),
            timezone: settings.timezone.clone(),
            focus: 0,
            errors: FormErrors::new(),
        }
    }

    /// Current values as persisted settings
    pub fn settings(&self, output_dir: Option<PathBuf>) -> Settings {
        Settings {
            repo_name: self.repo_name.clone(),
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            branch: self.branch.clone(),
            timezone: self.timezone.clone(),
            output_dir,
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    // ========== Focus ==========

    pub fn focused(&self, tab: Tab) -> Field {
        let fields = Field::all_for(tab);
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self, tab: Tab) {
        let len = Field::all_for(tab).len();
        self.focus = (self.focus.min(len - 1) + 1) % len;
    }

    pub fn focus_prev(&mut self, tab: Tab) {
        let len = Field::all_for(tab).len();
        self.focus = (self.focus.min(len - 1) + len - 1) % len;
    }

    /// Keep focus in range after switching tabs
    pub fn clamp_focus(&mut self, tab: Tab) {
        self.focus = self.focus.min(Field::all_for(tab).len() - 1);
    }

    // ========== Editing ==========

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::StartDate => Some(&mut self.start_date),
            Field::EndDate => Some(&mut self.end_date),
            Field::Text => Some(&mut self.text),
            Field::FilePath => Some(&mut self.file_path),
            Field::RepoName => Some(&mut self.repo_name),
            Field::UserName => Some(&mut self.user_name),
            Field::Email => Some(&mut self.email),
            Field::Branch => Some(&mut self.branch),
            Field::Timezone => Some(&mut self.timezone),
            Field::CommitCount | Field::Font => None,
        }
    }

    /// Display value of a field
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::StartDate => self.start_date.clone(),
            Field::EndDate => self.end_date.clone(),
            Field::CommitCount => self.commit_count.name().to_string(),
            Field::Font => self.font.name().to_string(),
            Field::Text => self.text.clone(),
            Field::FilePath => self.file_path.clone(),
            Field::RepoName => self.repo_name.clone(),
            Field::UserName => self.user_name.clone(),
            Field::Email => self.email.clone(),
            Field::Branch => self.branch.clone(),
            Field::Timezone => self.timezone.clone(),
        }
    }

    /// Type a character into the focused text field. Returns false for
    /// select fields.
    pub fn insert_char(&mut self, tab: Tab, c: char) -> bool {
        let field = self.focused(tab);
        match self.text_mut(field) {
            Some(value) => {
                value.push(c);
                self.revalidate(tab);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self, tab: Tab) {
        let field = self.focused(tab);
        if let Some(value) = self.text_mut(field) {
            value.pop();
            self.revalidate(tab);
        }
    }

    /// Cycle the focused select field
    pub fn cycle(&mut self, tab: Tab, forward: bool) {
        match self.focused(tab) {
            Field::CommitCount => {
                self.commit_count = if forward {
                    self.commit_count.next()
                } else {
                    self.commit_count.prev()
                };
            }
            Field::Font => {
                let fonts = Font::ALL;
                let pos = fonts.iter().position(|f| *f == self.font).unwrap_or(0);
                let next = if forward {
                    (pos + 1) % fonts.len()
                } else {
                    (pos + fonts.len() - 1) % fonts.len()
                };
                self.font = fonts[next];
            }
            _ => {}
        }
    }

    // ========== Validation ==========

    /// Re-run validation for every field of `tab`
    pub fn revalidate(&mut self, tab: Tab) {
        self.errors.clear();
        let fields = Field::all_for(tab);

        let start = self
            .errors
            .check(Field::StartDate.key(), parse_date(&self.start_date));
        if fields.contains(&Field::EndDate) {
            let end = self
                .errors
                .check(Field::EndDate.key(), parse_date(&self.end_date));
            if let (Some(start), Some(end)) = (start, end) {
                self.errors
                    .check(Field::EndDate.key(), validate_date_range(start, end));
            }
        }
        if fields.contains(&Field::Text) {
            self.errors.check(Field::Text.key(), validate_text(&self.text));
        }
        if fields.contains(&Field::FilePath) {
            self.errors
                .check(Field::FilePath.key(), validate_file(&self.file_path));
        }

        self.errors
            .check(Field::RepoName.key(), validate_name(&self.repo_name));
        self.errors
            .check(Field::UserName.key(), validate_author_name(&self.user_name));
        self.errors
            .check(Field::Email.key(), validate_email(&self.email));
        self.errors
            .check(Field::Branch.key(), validate_branch(&self.branch));
        self.errors
            .check(Field::Timezone.key(), parse_timezone(&self.timezone));
    }

    /// Ready to generate: every field filled and valid
    pub fn check_complete(&mut self, tab: Tab) -> Result<(), ValidationError> {
        let values: Vec<String> = Field::all_for(tab)
            .into_iter()
            .filter(|f| !f.is_select())
            .map(|f| self.value(f))
            .collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        require_filled(&refs)?;

        self.revalidate(tab);
        match self.errors.iter().next() {
            None => Ok(()),
            Some((field, msg)) => Err(ValidationError(format!("{field}: {msg}"))),
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date).ok()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        parse_date(&self.end_date).ok()
    }

    /// Build the pattern request for `tab`, or None while its fields are
    /// incomplete
    pub fn pattern_request(
        &self,
        tab: Tab,
        manual: &[CommitLevel],
        seed: u64,
    ) -> Option<(NaiveDate, PatternRequest)> {
        let start = self.start()?;
        let request = match tab {
            Tab::Daily => PatternRequest::Daily {
                end_date: self.end()?,
                commit_count: self.commit_count,
            },
            Tab::Random => PatternRequest::Random {
                end_date: self.end()?,
                seed: Some(seed),
            },
            Tab::PatternFile | Tab::Image if self.file_path.trim().is_empty() => return None,
            Tab::PatternFile => PatternRequest::PatternFile {
                path: PathBuf::from(self.file_path.trim()),
            },
            Tab::Image => PatternRequest::Image {
                path: PathBuf::from(self.file_path.trim()),
            },
            Tab::Text if self.text.is_empty() => return None,
            Tab::Text => PatternRequest::Text {
                text: self.text.clone(),
                font: self.font,
                commit_count: self.commit_count,
            },
            Tab::Manual => PatternRequest::Manual {
                levels: manual.to_vec(),
            },
        };
        Some((start, request))
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len == 0 || len > MAX_TEXT_LEN {
        Err(ValidationError(format!(
            "Text must be 1 to {MAX_TEXT_LEN} characters"
        )))
    } else {
        Ok(())
    }
}

fn validate_file(path: &str) -> Result<(), ValidationError> {
    let path = path.trim();
    if path.is_empty() {
        Err(ValidationError("Choose a file".to_string()))
    } else if !std::path::Path::new(path).is_file() {
        Err(ValidationError("File not found".to_string()))
    } else {
        Ok(())
    }
}
