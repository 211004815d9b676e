//! Draw on a GitHub contribution graph with backdated commits

pub mod cli;
pub mod patterns;
pub mod services;
pub mod tui;
pub mod types;
