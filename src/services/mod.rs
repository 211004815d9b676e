//! Grid building, validation, settings and repository writing

pub mod calendar;
pub mod repo_writer;
pub mod settings;
pub mod toast;
pub mod validation;

pub use calendar::{build_cells, on_activate};
pub use repo_writer::{RepoSummary, RepoWriter};
pub use settings::{Settings, SettingsService};
pub use toast::{ToastKind, ToastQueue};
