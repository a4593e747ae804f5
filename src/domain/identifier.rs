//! Key derivation for dotted REACS identifiers.
//!
//! A node is stored under a chain of keys starting below its section. The
//! chain is derived from the identifier segments:
//!
//! | id         | level    | keys                          |
//! |------------|----------|-------------------------------|
//! | `12`       | class    | `12`                          |
//! | `12.3`     | subclass | `12`, `3`                     |
//! | `12.34`    | group    | `12`, `3`, `34`               |
//! | `12.34.5`  | subgroup | `12`, `3`, `34`, `5`          |
//! | `12.34.56` | species  | `12`, `3`, `34`, `5`, `56`    |
//!
//! A one-character second segment marks a subclass, anything longer a group;
//! the third segment decides subgroup versus species the same way. Subclass
//! and subgroup keys are the first character of the segment they are taken
//! from. Lookups are key-equality sensitive, so these rules must not drift.

use crate::domain::entities::Level;
use crate::domain::error::DomainError;

/// Maximum number of dot-separated segments.
pub const MAX_SEGMENTS: usize = 3;

/// Position of a node below its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    pub level: Level,
    /// Keys from the class down to the node itself.
    pub keys: Vec<String>,
}

impl NodePath {
    /// Derive level and key chain from a dotted identifier.
    pub fn parse(id: &str, line: u64) -> Result<Self, DomainError> {
        let malformed = |reason: &str| DomainError::MalformedIdentifier {
            line,
            id: id.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = id.split('.').collect();
        if parts.len() > MAX_SEGMENTS {
            return Err(malformed("more than 3 dot-separated segments"));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(malformed("empty segment"));
        }

        let path = match parts.as_slice() {
            [class] => Self {
                level: Level::Class,
                keys: vec![class.to_string()],
            },
            [class, second] if is_single(second) => Self {
                level: Level::Subclass,
                keys: vec![class.to_string(), first_char(second)],
            },
            [class, group] => Self {
                level: Level::Group,
                keys: vec![class.to_string(), first_char(group), group.to_string()],
            },
            [class, group, third] => {
                let level = if is_single(third) {
                    Level::Subgroup
                } else {
                    Level::Species
                };
                let mut keys = vec![
                    class.to_string(),
                    first_char(group),
                    group.to_string(),
                    first_char(third),
                ];
                if level == Level::Species {
                    keys.push(third.to_string());
                }
                Self { level, keys }
            }
            _ => return Err(malformed("unexpected id format")),
        };
        Ok(path)
    }

    /// Keys of the immediate parent (empty for a class, whose parent is the section).
    pub fn parent_keys(&self) -> &[String] {
        &self.keys[..self.keys.len() - 1]
    }

    /// The node's own key within its parent.
    pub fn key(&self) -> &str {
        &self.keys[self.keys.len() - 1]
    }
}

fn is_single(segment: &str) -> bool {
    segment.chars().count() == 1
}

fn first_char(segment: &str) -> String {
    segment.chars().take(1).collect()
}
