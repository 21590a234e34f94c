//! DragDeck Application
//!
//! A native board of card lists wired to the drag controller: egui draws the
//! board, the core's grid host answers hit-tests, and raw pointer input is
//! translated into controller events.

mod app;
mod theme;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use ui::UiAction;
