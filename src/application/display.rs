//! Tree rendering for terminal display.

use termtree::Tree;

use crate::domain::{Node, Taxonomy};

/// Build a printable tree of the classification.
///
/// `letter` restricts output to one section; `max_depth` limits how many
/// levels below the sections are shown (0 = sections only).
pub fn to_display_tree(taxonomy: &Taxonomy, letter: Option<&str>, max_depth: Option<usize>) -> Tree<String> {
    let sections = taxonomy
        .sections
        .iter()
        .filter(|(key, _)| letter.map_or(true, |l| l == *key))
        .map(|(key, section)| node_tree(key, section, 0, max_depth));
    Tree::new("REACS".to_string()).with_leaves(sections)
}

fn node_tree(key: &str, node: &Node, depth: usize, max_depth: Option<usize>) -> Tree<String> {
    let label = format!("{} {}", node.id.as_deref().unwrap_or(key), node.name);
    let mut tree = Tree::new(label);
    if max_depth.map_or(true, |max| depth < max) {
        for (child_key, child) in node.children.iter() {
            tree.push(node_tree(child_key, child, depth + 1, max_depth));
        }
    }
    tree
}
