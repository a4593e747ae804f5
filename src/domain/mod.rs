//! Domain layer: entities and classification logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod identifier;
pub mod vocabulary;

pub use builder::{TreeBuilder, TreeResult};
pub use entities::*;
pub use error::DomainError;
pub use identifier::NodePath;
pub use vocabulary::extract_links;
