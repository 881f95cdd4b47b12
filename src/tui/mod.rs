//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Disease selection menu
//! - Per-disease input forms
//! - Prediction result display

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
