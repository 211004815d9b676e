//! Pattern files: a grid of 0-4 digits, one line per weekday
//!
//! ```text
//! 0444440
//! 0400040
//! 0444440
//! ```
//!
//! At most seven non-empty lines are read. Short rows are padded with zeros
//! to the longest row and missing rows are filled with zeros.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::font::CHAR_HEIGHT;
use super::PatternSource;
use crate::types::{parse_digits, CommitLevel, GistoryError, Result};

pub struct PatternFile {
    path: PathBuf,
}

impl PatternFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternSource for PatternFile {
    fn name(&self) -> &str {
        "pattern-file"
    }

    fn generate(&self, _start: NaiveDate) -> Result<Vec<CommitLevel>> {
        read_pattern_file(&self.path)
    }
}

/// Read a pattern file and flatten it column by column
pub fn read_pattern_file(path: &Path) -> Result<Vec<CommitLevel>> {
    let content = fs::read_to_string(path)?;
    parse_pattern(&content)
}

/// Parse pattern file content
pub fn parse_pattern(content: &str) -> Result<Vec<CommitLevel>> {
    let mut rows: Vec<Vec<CommitLevel>> = content
        .lines()
        .filter(|line| !line.is_empty())
        .take(CHAR_HEIGHT)
        .map(parse_digits)
        .collect();

    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .ok_or_else(|| GistoryError::InvalidData("Empty pattern file".to_string()))?;

    for row in rows.iter_mut() {
        row.resize(width, CommitLevel::Zero);
    }
    rows.resize(CHAR_HEIGHT, vec![CommitLevel::Zero; width]);

    Ok((0..width)
        .flat_map(|x| rows.iter().map(move |row| row[x]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use CommitLevel::*;

    #[test]
    fn test_parse_full_grid_column_major() {
        let levels = parse_pattern("01\n12\n23\n34\n40\n01\n12\n").unwrap();
        assert_eq!(
            levels,
            vec![Zero, Few, Some, Many, ALot, Zero, Few, Few, Some, Many, ALot, Zero, Few, Some]
        );
    }

    #[test]
    fn test_parse_pads_short_rows_and_missing_rows() {
        let levels = parse_pattern("44\n4\n").unwrap();
        assert_eq!(levels.len(), 2 * CHAR_HEIGHT);
        // Column 0: 4, 4, then zeros
        assert_eq!(&levels[..3], &[ALot, ALot, Zero]);
        // Column 1: 4, padded 0, then zeros
        assert_eq!(&levels[7..9], &[ALot, Zero]);
        assert!(levels[9..].iter().all(|l| *l == Zero));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_extra_rows() {
        let levels = parse_pattern("1\n\n1\n1\n1\n1\n1\n1\n4\n").unwrap();
        assert_eq!(levels, vec![Few; 7]);
    }

    #[test]
    fn test_parse_invalid_chars_are_zero() {
        let levels = parse_pattern("1x9").unwrap();
        assert_eq!(&levels[..1], &[Few]);
        assert_eq!(levels[7], Zero);
        assert_eq!(levels[14], Zero);
    }

    #[test]
    fn test_parse_empty_content() {
        let err = parse_pattern("\n\n").unwrap_err();
        assert!(matches!(err, GistoryError::InvalidData(ref m) if m == "Empty pattern file"));
    }

    #[test]
    fn test_read_pattern_file_crlf() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "12\r\n34\r\n").unwrap();

        let levels = read_pattern_file(file.path()).unwrap();
        assert_eq!(levels.len(), 14);
        assert_eq!(&levels[..2], &[Few, Many]);
        assert_eq!(&levels[7..9], &[Some, ALot]);
    }

    #[test]
    fn test_read_pattern_file_missing() {
        let err = PatternFile::new("/nonexistent/pattern.txt")
            .generate(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
            .unwrap_err();
        assert!(matches!(err, GistoryError::Io(_)));
    }
}
