//! Form rendering
//!
//! - `field_renderer`: one control per field type
//! - `form_view`: the open form with its action panel

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
