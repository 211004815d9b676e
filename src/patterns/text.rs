//! Text rendered through a bitmap font

use chrono::NaiveDate;

use super::font::{Font, Pixel, CHAR_HEIGHT};
use super::PatternSource;
use crate::types::{CommitLevel, GistoryError, Result};

/// Maximum number of characters accepted
pub const MAX_TEXT_LEN: usize = 64;

pub struct TextPattern {
    text: String,
    font: Font,
    level: CommitLevel,
}

impl TextPattern {
    pub fn new(text: impl Into<String>, font: Font, level: CommitLevel) -> Self {
        Self {
            text: text.into(),
            font,
            level,
        }
    }
}

impl PatternSource for TextPattern {
    fn name(&self) -> &str {
        "text"
    }

    fn generate(&self, _start: NaiveDate) -> Result<Vec<CommitLevel>> {
        let len = self.text.chars().count();
        if len == 0 || len > MAX_TEXT_LEN {
            return Err(GistoryError::InvalidArg(format!(
                "Text must be 1 to {MAX_TEXT_LEN} characters"
            )));
        }

        let mut levels = Vec::new();
        for ch in self.text.chars() {
            let glyph = self.font.glyph(ch).ok_or_else(|| {
                GistoryError::InvalidArg(format!(
                    "Text only accepts {}",
                    self.font.supported_chars()
                ))
            })?;

            levels.extend(glyph.pixels_by_column().map(|p| match p {
                Pixel::On => self.level,
                Pixel::Off => CommitLevel::Zero,
            }));
            // Spacer column between characters
            levels.extend(std::iter::repeat(CommitLevel::Zero).take(CHAR_HEIGHT));
        }

        Ok(levels)
    }
}
