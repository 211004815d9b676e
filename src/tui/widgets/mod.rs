//! TUI widgets

pub mod form;
pub mod help;
pub mod preview;
pub mod quit_confirm;
pub mod spinner;
pub mod tabs;
pub mod toasts;
