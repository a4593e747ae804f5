//! JSON rendering of the classification tree.

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Taxonomy;

/// Compact JSON document keyed by section letter, children in first-seen order.
pub fn render_json(taxonomy: &Taxonomy) -> ApplicationResult<String> {
    serde_json::to_string(taxonomy).map_err(|e| ApplicationError::Serialize {
        message: format!("json: {e}"),
    })
}
