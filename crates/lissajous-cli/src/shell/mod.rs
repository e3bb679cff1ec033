//! The interactive shell around the generator.
//!
//! - `form` - parameter fields and their input masks
//! - `dialog` - the save prompt
//! - `app` - state, key handling, update/save actions
//! - `ui` - ratatui drawing

pub mod app;
pub mod dialog;
pub mod form;
pub mod ui;

pub use app::App;
pub use ui::draw;
