//! Shared UI components

mod button;
mod error_dialog;

pub use button::render_button;
pub use error_dialog::render_error_dialog;
