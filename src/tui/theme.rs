//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::types::CommitLevel;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, focused fields)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date text color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Success toasts, spinner
    pub fn success(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Warning toasts
    pub fn warning(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208), // orange (ANSI 256)
            Self::Light => Color::Indexed(166), // dark orange (ANSI 256)
        }
    }

    /// Validation messages, error toasts
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Background of the preview cell under the cursor
    pub fn cursor(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(226), // bright yellow
            Self::Light => Color::Indexed(202), // orange
        }
    }

    /// Contribution cell color per commit level
    pub fn level_color(self, level: CommitLevel) -> Color {
        match self {
            Self::Dark => match level {
                CommitLevel::Zero => Color::Indexed(236),
                CommitLevel::Few => Color::Indexed(22),
                CommitLevel::Some => Color::Indexed(28),
                CommitLevel::Many => Color::Indexed(34),
                CommitLevel::ALot => Color::Indexed(40),
            },
            Self::Light => match level {
                CommitLevel::Zero => Color::Indexed(254),
                CommitLevel::Few => Color::Indexed(194),
                CommitLevel::Some => Color::Indexed(157),
                CommitLevel::Many => Color::Indexed(71),
                CommitLevel::ALot => Color::Indexed(28),
            },
        }
    }
}
