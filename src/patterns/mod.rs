//! Pattern sources: everything that turns user input into per-day levels

mod daily;
mod file;
pub mod font;
mod image;
mod random;
mod text;

pub use daily::DailyPattern;
pub use file::{read_pattern_file, PatternFile};
pub use font::Font;
pub use self::image::ImagePattern;
pub use random::RandomPattern;
pub use text::{TextPattern, MAX_TEXT_LEN};

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{parse_digits, CommitLevel, GistoryError, Result};

/// Something that produces one level per day, starting at a given date
pub trait PatternSource: Send + Sync {
    /// Method name used in logs (e.g., "daily")
    fn name(&self) -> &str;

    /// Generate levels; `levels[i]` is the level of `start + i` days
    fn generate(&self, start: NaiveDate) -> Result<Vec<CommitLevel>>;
}

/// Digits typed or pasted directly, one per day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPattern {
    pattern: String,
}

impl RawPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl PatternSource for RawPattern {
    fn name(&self) -> &str {
        "raw"
    }

    fn generate(&self, _start: NaiveDate) -> Result<Vec<CommitLevel>> {
        Ok(parse_digits(&self.pattern))
    }
}

/// Longest day range a date-range pattern may cover
pub const MAX_SPAN_DAYS: i64 = 100 * 366;

/// Ensure `end` is not before `start` and the range is at most
/// [`MAX_SPAN_DAYS`] long, returning the inclusive day count
pub(crate) fn days_between(start: NaiveDate, end: NaiveDate) -> Result<usize> {
    if end < start {
        return Err(GistoryError::InvalidArg(
            "end date must be on or after start date".to_string(),
        ));
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_SPAN_DAYS {
        return Err(GistoryError::InvalidArg(format!(
            "date range may cover at most {MAX_SPAN_DAYS} days"
        )));
    }
    Ok(days as usize)
}

/// Pattern request, one variant per input method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum PatternRequest {
    /// Same level every day in a date range
    Daily {
        end_date: NaiveDate,
        commit_count: CommitLevel,
    },
    /// Random level every day in a date range
    Random {
        end_date: NaiveDate,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Text rendered with a bitmap font
    Text {
        text: String,
        font: Font,
        commit_count: CommitLevel,
    },
    /// Grayscale image scaled to 7 rows
    Image { path: PathBuf },
    /// Text file of 0-4 digits, one line per weekday
    PatternFile { path: PathBuf },
    /// Digit string, one per day
    Raw { pattern: String },
    /// Levels edited cell by cell
    Manual { levels: Vec<CommitLevel> },
}

impl PatternRequest {
    /// Method name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily { .. } => "daily",
            Self::Random { .. } => "random",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::PatternFile { .. } => "pattern-file",
            Self::Raw { .. } => "raw",
            Self::Manual { .. } => "manual",
        }
    }

    /// Generate the level sequence for a pattern starting at `start`
    pub fn generate(&self, start: NaiveDate) -> Result<Vec<CommitLevel>> {
        if start.weekday() != Weekday::Sun {
            tracing::warn!(
                "{start} is not a Sunday. GitHub starts a week on Sunday, so the pattern will be shifted"
            );
        }

        let levels = match self {
            Self::Daily {
                end_date,
                commit_count,
            } => DailyPattern::new(*end_date, *commit_count).generate(start)?,
            Self::Random { end_date, seed } => {
                let source = match seed {
                    Some(seed) => RandomPattern::with_seed(*end_date, *seed),
                    None => RandomPattern::new(*end_date),
                };
                source.generate(start)?
            }
            Self::Text {
                text,
                font,
                commit_count,
            } => TextPattern::new(text.clone(), *font, *commit_count).generate(start)?,
            Self::Image { path } => ImagePattern::new(path.clone()).generate(start)?,
            Self::PatternFile { path } => PatternFile::new(path.clone()).generate(start)?,
            Self::Raw { pattern } => RawPattern::new(pattern.clone()).generate(start)?,
            Self::Manual { levels } => levels.clone(),
        };

        tracing::debug!(
            method = self.name(),
            days = levels.len(),
            "generated pattern starting {start}"
        );
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_raw_pattern() {
        let levels = RawPattern::new("0123x4").generate(date(2024, 1, 7)).unwrap();
        assert_eq!(levels.len(), 6);
        assert_eq!(levels[4], CommitLevel::Zero);
        assert_eq!(levels[5], CommitLevel::ALot);
    }

    #[test]
    fn test_days_between_inclusive() {
        assert_eq!(days_between(date(2024, 1, 7), date(2024, 1, 7)).unwrap(), 1);
        assert_eq!(days_between(date(2024, 1, 7), date(2024, 1, 13)).unwrap(), 7);
    }

    #[test]
    fn test_days_between_caps_span() {
        let start = date(2000, 1, 1);
        let last = start + chrono::Duration::days(MAX_SPAN_DAYS - 1);
        assert_eq!(days_between(start, last).unwrap(), MAX_SPAN_DAYS as usize);

        let err = days_between(start, last + chrono::Duration::days(1)).unwrap_err();
        assert!(matches!(err, GistoryError::InvalidArg(_)));
        assert!(PatternRequest::Daily {
            end_date: NaiveDate::MAX,
            commit_count: CommitLevel::Few,
        }
        .generate(start)
        .is_err());
    }

    #[test]
    fn test_days_between_rejects_reversed() {
        let err = days_between(date(2024, 1, 8), date(2024, 1, 7)).unwrap_err();
        assert!(matches!(err, GistoryError::InvalidArg(_)));
    }

    #[test]
    fn test_request_dispatch_daily() {
        let req = PatternRequest::Daily {
            end_date: date(2024, 1, 20),
            commit_count: CommitLevel::Many,
        };
        let levels = req.generate(date(2024, 1, 7)).unwrap();
        assert_eq!(levels, vec![CommitLevel::Many; 14]);
    }

    #[test]
    fn test_request_dispatch_manual_passthrough() {
        let levels = vec![CommitLevel::Few, CommitLevel::ALot];
        let req = PatternRequest::Manual {
            levels: levels.clone(),
        };
        assert_eq!(req.generate(date(2024, 1, 7)).unwrap(), levels);
    }

    #[test]
    fn test_request_names() {
        let req = PatternRequest::Raw {
            pattern: "1".into(),
        };
        assert_eq!(req.name(), "raw");
        let req = PatternRequest::PatternFile {
            path: PathBuf::from("p.txt"),
        };
        assert_eq!(req.name(), "pattern-file");
    }

    #[test]
    fn test_request_json_tagged_by_method() {
        let json = r#"{"method":"Daily","end_date":"2024-02-01","commit_count":"Few"}"#;
        let req: PatternRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            PatternRequest::Daily {
                end_date: date(2024, 2, 1),
                commit_count: CommitLevel::Few,
            }
        );
    }

    #[test]
    fn test_request_json_random_seed_optional() {
        let json = r#"{"method":"Random","end_date":"2024-02-01"}"#;
        let req: PatternRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req, PatternRequest::Random { seed: None, .. }));
    }
}
