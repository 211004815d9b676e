//! Images scaled down to seven rows, darker pixels mean more commits

use std::path::PathBuf;

use chrono::NaiveDate;
use image::imageops::{self, FilterType};
use image::GrayImage;
use rayon::prelude::*;

use super::font::CHAR_HEIGHT;
use super::PatternSource;
use crate::types::{CommitLevel, GistoryError, Result};

pub struct ImagePattern {
    path: PathBuf,
}

impl ImagePattern {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternSource for ImagePattern {
    fn name(&self) -> &str {
        "image"
    }

    fn generate(&self, _start: NaiveDate) -> Result<Vec<CommitLevel>> {
        let img = image::open(&self.path)
            .map_err(|e| GistoryError::InvalidData(format!("Failed to load image: {e}")))?;
        Ok(levels_from_gray(&img.to_luma8()))
    }
}

/// Map a normalized brightness in `[0, 1]` to a level
pub fn brightness_level(brightness: f32) -> CommitLevel {
    match brightness {
        b if b < 0.2 => CommitLevel::ALot,
        b if b < 0.4 => CommitLevel::Many,
        b if b < 0.6 => CommitLevel::Some,
        b if b < 0.8 => CommitLevel::Few,
        _ => CommitLevel::Zero,
    }
}

/// Resize to seven rows keeping the aspect ratio, then read column by column
pub fn levels_from_gray(gray: &GrayImage) -> Vec<CommitLevel> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let rows = CHAR_HEIGHT as u32;
    let new_width = ((width as f32 * rows as f32 / height as f32).round() as u32).max(1);
    let resized = imageops::resize(gray, new_width, rows, FilterType::Lanczos3);

    (0..new_width)
        .into_par_iter()
        .flat_map_iter(|x| {
            let resized = &resized;
            (0..rows).map(move |y| brightness_level(resized.get_pixel(x, y)[0] as f32 / 255.0))
        })
        .collect()
}
