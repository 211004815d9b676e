//! Interactive terminal UI

pub mod app;
pub mod form;
pub mod theme;
pub mod widgets;

pub use app::run;
