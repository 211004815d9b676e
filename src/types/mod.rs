//! Type definitions for gistory

mod cell;
mod error;
mod level;
mod settings;

pub use cell::Cell;
pub use error::*;
pub use level::{parse_digits, CommitLevel};
pub use settings::RepoSettings;
