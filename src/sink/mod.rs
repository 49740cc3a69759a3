//! Destinations for saved and submitted form values
//!
//! The engine only hands finished snapshots to a sink; what the sink does
//! with them is outside the form engine.

mod json_file;
mod log;
mod traits;

pub use json_file::JsonFileSink;
pub use log::LogSink;
pub use traits::FormSink;

#[cfg(test)]
pub use traits::MockFormSink;
