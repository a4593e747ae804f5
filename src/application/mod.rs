//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod display;
pub mod error;
pub mod error_ext;
pub mod json;
pub mod rows;
pub mod services;
pub mod turtle;

pub use display::to_display_tree;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use json::render_json;
pub use rows::parse_rows;
pub use turtle::{emit_lines, render_turtle, TurtleEmitter};
