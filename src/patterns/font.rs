//! Bitmap fonts for text patterns
//!
//! Glyphs are seven pixels tall, one pixel per weekday row. Font assets are
//! plain text: a character line (or `space`) followed by seven rows of `x`
//! (on) and `.` (off), blocks separated by blank lines.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{GistoryError, Result};

/// Glyph height in pixels (one per day of the week)
pub const CHAR_HEIGHT: usize = 7;

const SUBWAY_TRACKER_SRC: &str = include_str!("../../assets/subway_tracker.font");

static SUBWAY_TRACKER: LazyLock<BTreeMap<char, Glyph>> =
    LazyLock::new(|| match parse_font(SUBWAY_TRACKER_SRC) {
        Ok(glyphs) => glyphs,
        Err(e) => {
            tracing::error!("SubwayTracker font asset is malformed: {e}");
            BTreeMap::new()
        }
    });

/// A single font pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    On,
    Off,
}

/// A character bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    /// Row-major, `CHAR_HEIGHT * width` pixels
    pixels: Vec<Pixel>,
}

impl Glyph {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixels column by column, top to bottom within each column
    pub fn pixels_by_column(&self) -> impl Iterator<Item = Pixel> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..CHAR_HEIGHT).map(move |y| self.pixels[y * self.width + x]))
    }
}

/// Available fonts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Font {
    #[default]
    SubwayTracker,
}

impl Font {
    /// All fonts, in display order
    pub const ALL: [Font; 1] = [Font::SubwayTracker];

    pub fn name(self) -> &'static str {
        match self {
            Font::SubwayTracker => "SubwayTracker",
        }
    }

    fn glyphs(self) -> &'static BTreeMap<char, Glyph> {
        match self {
            Font::SubwayTracker => &SUBWAY_TRACKER,
        }
    }

    /// Look up a character. Letters are case-insensitive.
    pub fn glyph(self, ch: char) -> Option<&'static Glyph> {
        self.glyphs().get(&ch.to_ascii_uppercase())
    }

    /// Human-readable list of supported characters
    pub fn supported_chars(self) -> String {
        let chars: String = self
            .glyphs()
            .keys()
            .filter(|c| **c != ' ')
            .collect();
        format!("<space> {chars}")
    }
}

/// Parse a font asset into glyphs
pub fn parse_font(src: &str) -> Result<BTreeMap<char, Glyph>> {
    let mut glyphs = BTreeMap::new();

    let lines: Vec<&str> = src
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.starts_with('#'))
        .collect();

    for block in lines.split(|l| l.is_empty()) {
        if block.is_empty() {
            continue;
        }

        let ch = match block[0] {
            "space" => ' ',
            token => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(GistoryError::Parse(format!(
                            "invalid glyph header {token:?}"
                        )))
                    }
                }
            }
        };

        let rows = &block[1..];
        if rows.len() != CHAR_HEIGHT {
            return Err(GistoryError::Parse(format!(
                "glyph {ch:?} has {} rows, expected {CHAR_HEIGHT}",
                rows.len()
            )));
        }

        let width = rows[0].len();
        let mut pixels = Vec::with_capacity(width * CHAR_HEIGHT);
        for row in rows {
            if row.len() != width {
                return Err(GistoryError::Parse(format!(
                    "glyph {ch:?} has rows of different width"
                )));
            }
            for b in row.bytes() {
                pixels.push(match b {
                    b'x' => Pixel::On,
                    b'.' => Pixel::Off,
                    _ => {
                        return Err(GistoryError::Parse(format!(
                            "glyph {ch:?} contains invalid pixel {:?}",
                            b as char
                        )))
                    }
                });
            }
        }

        glyphs.insert(ch, Glyph { width, pixels });
    }

    Ok(glyphs)
}
