//! Commit intensity buckets

use serde::{Deserialize, Serialize};

/// Commit intensity for a single calendar day.
///
/// Ordered from no commits to the most commits. The same value drives both
/// how many commits get written for a day and which color the preview uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum CommitLevel {
    /// No commits
    #[default]
    Zero,
    /// 1 commit
    Few,
    /// 2 commits
    Some,
    /// 3 commits
    Many,
    /// 4 commits
    #[value(name = "a-lot")]
    ALot,
}

impl CommitLevel {
    /// All levels in ascending order
    pub const ALL: [CommitLevel; 5] = [
        CommitLevel::Zero,
        CommitLevel::Few,
        CommitLevel::Some,
        CommitLevel::Many,
        CommitLevel::ALot,
    ];

    /// Next level in cyclic order (ALot wraps back to Zero)
    pub fn next(self) -> Self {
        match self {
            Self::Zero => Self::Few,
            Self::Few => Self::Some,
            Self::Some => Self::Many,
            Self::Many => Self::ALot,
            Self::ALot => Self::Zero,
        }
    }

    /// Previous level in cyclic order (Zero wraps to ALot)
    pub fn prev(self) -> Self {
        match self {
            Self::Zero => Self::ALot,
            Self::Few => Self::Zero,
            Self::Some => Self::Few,
            Self::Many => Self::Some,
            Self::ALot => Self::Many,
        }
    }

    /// Number of commits written for a day at this level
    pub fn commits(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::Few => 1,
            Self::Some => 2,
            Self::Many => 3,
            Self::ALot => 4,
        }
    }

    /// Parse a pattern digit. Anything outside '0'..='4' is treated as Zero.
    pub fn from_digit(c: char) -> Self {
        match c {
            '1' => Self::Few,
            '2' => Self::Some,
            '3' => Self::Many,
            '4' => Self::ALot,
            _ => Self::Zero,
        }
    }

    /// Pattern digit for this level
    pub fn to_digit(self) -> char {
        match self {
            Self::Zero => '0',
            Self::Few => '1',
            Self::Some => '2',
            Self::Many => '3',
            Self::ALot => '4',
        }
    }

    /// Word used in tooltips ("<label> commits on <date>")
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "No",
            Self::Few => "Few",
            Self::Some => "Some",
            Self::Many => "Many",
            Self::ALot => "A lot of",
        }
    }

    /// Display name for select fields
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::Few => "Few",
            Self::Some => "Some",
            Self::Many => "Many",
            Self::ALot => "A lot",
        }
    }

    /// 3-character cell for plain-text output (2 blocks + 1 space for gap).
    /// Uses distinct block characters for colorblind accessibility.
    pub fn to_cell_str(self) -> &'static str {
        match self {
            Self::Zero => "░░ ",
            Self::Few => "▒▒ ",
            Self::Some => "▓▓ ",
            Self::Many => "██ ",
            Self::ALot => "▀▀ ",
        }
    }
}

/// Parse a raw digit string into levels, one per character
pub fn parse_digits(raw: &str) -> Vec<CommitLevel> {
    raw.chars().map(CommitLevel::from_digit).collect()
}
