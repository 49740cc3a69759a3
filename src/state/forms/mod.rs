//! Form domain layer
//!
//! - `form_state`: the controller owning one form's values/errors/touched
//! - `field`: which control each field type gets and the edits it accepts
//! - `session`: focus, blur and the actions row for the terminal host

mod field;
mod form_state;
mod session;

pub use field::{display_value, Control, FieldEdit};
pub use form_state::FormController;
pub use session::{FormAction, FormSession};
