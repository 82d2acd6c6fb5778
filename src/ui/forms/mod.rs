//! Form rendering

mod entry_form;
mod field_renderer;

pub use entry_form::draw_entry_create;
