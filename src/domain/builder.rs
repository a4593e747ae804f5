//! Tree builder for inserting classification rows into the hierarchy.

use tracing::{debug, trace, warn};

use crate::domain::entities::{Node, Row, Taxonomy};
use crate::domain::error::DomainError;
use crate::domain::identifier::NodePath;
use crate::domain::vocabulary::extract_links;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs the classification tree from rows in file order.
///
/// The first row seen for a letter defines that letter's section and nothing
/// else. Every later row for the letter is placed by its identifier, and its
/// whole ancestor chain must already be present.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    taxonomy: Taxonomy,
    rows_seen: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete tree from rows, stopping at the first structural error.
    pub fn build<'a>(rows: impl IntoIterator<Item = &'a Row>) -> TreeResult<Taxonomy> {
        let mut builder = Self::new();
        for row in rows {
            builder.insert(row)?;
        }
        debug!("build: {} rows, {} sections", builder.rows_seen, builder.taxonomy.sections.len());
        Ok(builder.finish())
    }

    /// Insert one row.
    pub fn insert(&mut self, row: &Row) -> TreeResult<()> {
        self.rows_seen += 1;
        let links = extract_links(row);

        if !self.taxonomy.sections.contains_key(&row.letter) {
            trace!("line {}: new section {}", row.line, row.letter);
            self.taxonomy
                .sections
                .insert(row.letter.clone(), Node::section(&row.name, links));
            return Ok(());
        }

        let path = NodePath::parse(&row.id, row.line)?;
        let missing = |depth: usize| DomainError::MissingAncestor {
            line: row.line,
            id: row.id.clone(),
            level: path.level,
            path: std::iter::once(row.letter.as_str())
                .chain(path.keys[..=depth].iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join("/"),
        };

        let mut parent = self.taxonomy.sections.get_mut(&row.letter).ok_or_else(|| {
            DomainError::MissingAncestor {
                line: row.line,
                id: row.id.clone(),
                level: path.level,
                path: row.letter.clone(),
            }
        })?;
        for (depth, key) in path.parent_keys().iter().enumerate() {
            parent = parent.children.get_mut(key).ok_or_else(|| missing(depth))?;
        }

        let key = path.key();
        if parent.children.contains_key(key) {
            warn!(
                "line {}: {} '{}' redefines key '{}', dropping its children",
                row.line, path.level, row.id, key
            );
        } else {
            trace!("line {}: {} {} -> {}", row.line, path.level, row.id, key);
        }
        parent
            .children
            .insert(key, Node::new(path.level, &row.id, &row.name, links));
        Ok(())
    }

    /// Number of rows processed so far.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn finish(self) -> Taxonomy {
        self.taxonomy
    }
}
