//! Form field validation
//!
//! Each validator returns the message shown next to the field on failure.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use regex::Regex;
use thiserror::Error;

use crate::patterns::MAX_SPAN_DAYS;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]{1,64}$").expect("valid regex"));
static BRANCH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._/-]{1,64}$").expect("valid regex"));
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});
static TIMEZONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-][0-9]{4}$").expect("valid regex"));
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));
// git rejects '<' and '>' in an identity, and newlines would split the header
static AUTHOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^<>\r\n]{1,64}$").expect("valid regex"));

pub const NAME_MESSAGE: &str = r#"Alphanumeric and "-._". No more than 64 chars"#;
pub const BRANCH_MESSAGE: &str = r#"Alphanumeric and "-._/". No more than 64 chars"#;
pub const AUTHOR_MESSAGE: &str = r#"No "<>" or line breaks. No more than 64 chars"#;
pub const EMAIL_MESSAGE: &str = "Invalid email address";
pub const TIMEZONE_MESSAGE: &str = "Timezone must have format like +0700 -0430";
pub const DATE_MESSAGE: &str = "Date must have format YYYY-MM-DD";
pub const DATE_SPAN_MESSAGE: &str = "Pattern may span at most 100 years.";
pub const DATE_ORDER_MESSAGE: &str = "End date must come after start date.";
pub const SUNDAY_MESSAGE: &str = "Must be a Sunday.";
pub const REQUIRED_MESSAGE: &str = "Please fill in all fields";

/// A field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: &str) -> Self {
        Self(msg.to_string())
    }
}

/// Repository name, and the GitHub account in the push guide
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if NAME_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(NAME_MESSAGE))
    }
}

/// Commit author name. Free text, since git `user.name` is usually a full name.
pub fn validate_author_name(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() && AUTHOR_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(AUTHOR_MESSAGE))
    }
}

pub fn validate_branch(value: &str) -> Result<(), ValidationError> {
    if BRANCH_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(BRANCH_MESSAGE))
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(EMAIL_MESSAGE))
    }
}

/// Parse a `+HHMM` / `-HHMM` offset
pub fn parse_timezone(value: &str) -> Result<FixedOffset, ValidationError> {
    if !TIMEZONE_REGEX.is_match(value) {
        return Err(ValidationError::new(TIMEZONE_MESSAGE));
    }

    let sign = if value.starts_with('-') { -1 } else { 1 };
    let hours: i32 = value[1..3]
        .parse()
        .map_err(|_| ValidationError::new(TIMEZONE_MESSAGE))?;
    let minutes: i32 = value[3..5]
        .parse()
        .map_err(|_| ValidationError::new(TIMEZONE_MESSAGE))?;
    if minutes >= 60 {
        return Err(ValidationError::new(TIMEZONE_MESSAGE));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| ValidationError::new(TIMEZONE_MESSAGE))
}

pub fn validate_timezone(value: &str) -> Result<(), ValidationError> {
    parse_timezone(value).map(|_| ())
}

/// Format an offset the way [`parse_timezone`] reads it
pub fn format_timezone(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let minutes = secs.abs() / 60;
    format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
}

/// Parse a `YYYY-MM-DD` date with a four-digit year
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if !DATE_REGEX.is_match(value) {
        return Err(ValidationError::new(DATE_MESSAGE));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::new(DATE_MESSAGE))
}

/// `end` must not precede `start`, and the range is capped at
/// [`MAX_SPAN_DAYS`]
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        Err(ValidationError::new(DATE_ORDER_MESSAGE))
    } else if (end - start).num_days() >= MAX_SPAN_DAYS {
        Err(ValidationError::new(DATE_SPAN_MESSAGE))
    } else {
        Ok(())
    }
}

pub fn validate_sunday(date: NaiveDate) -> Result<(), ValidationError> {
    if date.weekday() == Weekday::Sun {
        Ok(())
    } else {
        Err(ValidationError::new(SUNDAY_MESSAGE))
    }
}

/// Every value must be non-empty after trimming
pub fn require_filled(values: &[&str]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        Err(ValidationError::new(REQUIRED_MESSAGE))
    } else {
        Ok(())
    }
}

/// Per-field validation messages for a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`, clearing any earlier message
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.errors.remove(field);
                Some(value)
            }
            Err(e) => {
                self.errors.insert(field, e.0);
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// (field, message) pairs, sorted by field
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Name / branch tests ==========

    #[test]
    fn test_validate_name() {
        assert!(validate_name("my-art.repo_1").is_ok());
        assert!(validate_name(&"a".repeat(64)).is_ok());
        assert_eq!(
            validate_name(&"a".repeat(65)).unwrap_err().to_string(),
            NAME_MESSAGE
        );
        assert!(validate_name("").is_err());
        assert!(validate_name("has space").is_err());
        assert!(validate_name("slash/name").is_err());
    }

    #[test]
    fn test_validate_author_name_allows_full_names() {
        assert!(validate_author_name("Mona Lisa").is_ok());
        assert!(validate_author_name("José O'Brien-Smith").is_ok());
        assert!(validate_author_name(&"a".repeat(64)).is_ok());
        for bad in ["", "   ", "Mona <mona>", "two\nlines"] {
            assert_eq!(
                validate_author_name(bad).unwrap_err().to_string(),
                AUTHOR_MESSAGE,
                "{bad:?}"
            );
        }
        assert!(validate_author_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_branch_allows_slash() {
        assert!(validate_branch("feature/art").is_ok());
        assert_eq!(
            validate_branch("bad branch").unwrap_err().to_string(),
            BRANCH_MESSAGE
        );
    }

    // ========== Email tests ==========

    #[test]
    fn test_validate_email() {
        assert!(validate_email("octo.cat+gh@example.co").is_ok());
        assert!(validate_email("octo@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert_eq!(
            validate_email("nope").unwrap_err().to_string(),
            EMAIL_MESSAGE
        );
    }

    // ========== Timezone tests ==========

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            parse_timezone("+0700").unwrap(),
            FixedOffset::east_opt(7 * 3600).unwrap()
        );
        assert_eq!(
            parse_timezone("-0430").unwrap(),
            FixedOffset::west_opt(4 * 3600 + 30 * 60).unwrap()
        );
        assert_eq!(parse_timezone("+0000").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_timezone_invalid() {
        for bad in ["0700", "+700", "+07:00", "+0760", "+2400", "UTC"] {
            assert_eq!(
                parse_timezone(bad).unwrap_err().to_string(),
                TIMEZONE_MESSAGE,
                "{bad}"
            );
        }
    }

    #[test]
    fn test_format_timezone() {
        assert_eq!(format_timezone(FixedOffset::east_opt(7 * 3600).unwrap()), "+0700");
        assert_eq!(
            format_timezone(FixedOffset::west_opt(4 * 3600 + 30 * 60).unwrap()),
            "-0430"
        );
        assert_eq!(format_timezone(parse_timezone("+0545").unwrap()), "+0545");
    }

    // ========== Date tests ==========

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-07").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
        );
        assert_eq!(parse_date("07/01/2024").unwrap_err().0, DATE_MESSAGE);
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_date_needs_four_digit_year() {
        for bad in ["+200000-01-01", "-2024-01-07", "20240-01-07", "2024-1-7", "24-01-07"] {
            assert_eq!(parse_date(bad).unwrap_err().0, DATE_MESSAGE, "{bad}");
        }
        assert!(parse_date(" 2024-01-07 ").is_ok());
    }

    #[test]
    fn test_validate_date_range() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(validate_date_range(a, a).is_ok());
        assert!(validate_date_range(a, b).is_ok());
        assert_eq!(validate_date_range(b, a).unwrap_err().0, DATE_ORDER_MESSAGE);
    }

    #[test]
    fn test_validate_date_range_caps_span() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let last_ok = start + chrono::Duration::days(MAX_SPAN_DAYS - 1);
        assert!(validate_date_range(start, last_ok).is_ok());
        assert_eq!(
            validate_date_range(start, last_ok + chrono::Duration::days(1))
                .unwrap_err()
                .0,
            DATE_SPAN_MESSAGE
        );
        let far = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(validate_date_range(start, far).is_err());
    }

    #[test]
    fn test_validate_sunday() {
        assert!(validate_sunday(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()).is_ok());
        assert_eq!(
            validate_sunday(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
                .unwrap_err()
                .0,
            SUNDAY_MESSAGE
        );
    }

    #[test]
    fn test_require_filled() {
        assert!(require_filled(&["a", "b"]).is_ok());
        assert_eq!(require_filled(&["a", "  "]).unwrap_err().0, REQUIRED_MESSAGE);
    }

    // ========== FormErrors tests ==========

    #[test]
    fn test_form_errors_check_sets_and_clears() {
        let mut errors = FormErrors::new();
        assert!(errors.check("email", validate_email("bad")).is_none());
        assert_eq!(errors.get("email"), Some(EMAIL_MESSAGE));
        assert!(!errors.is_empty());

        assert_eq!(errors.check("email", validate_email("a@b.io")), Some(()));
        assert!(errors.get("email").is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_form_errors_returns_parsed_value() {
        let mut errors = FormErrors::new();
        let tz = errors.check("timezone", parse_timezone("+0100"));
        assert_eq!(tz.map(|t| t.local_minus_utc()), Some(3600));
    }

    #[test]
    fn test_form_errors_iter_sorted() {
        let mut errors = FormErrors::new();
        errors.check("timezone", validate_timezone("x"));
        errors.check("branch", validate_branch(""));
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["branch", "timezone"]);
        errors.clear();
        assert!(errors.is_empty());
    }
}
