//! Domain entities: core data structures

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::domain::error::DomainError;
use crate::domain::identifier::NodePath;

/// Hierarchy level of a REACS node.
///
/// Identifier depth determines the level:
/// ```text
/// ХХ        class
/// ХХ.Х      subclass
/// ХХ.ХХ     group
/// ХХ.ХХ.Х   subgroup
/// ХХ.ХХ.ХХ  species
/// ```
/// Sections sit above classes and are keyed by their letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Section,
    Class,
    Subclass,
    Group,
    Subgroup,
    Species,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Section,
        Level::Class,
        Level::Subclass,
        Level::Group,
        Level::Subgroup,
        Level::Species,
    ];

    /// JSON key holding this level's children.
    pub fn children_key(self) -> Option<&'static str> {
        match self {
            Level::Section => Some("classes"),
            Level::Class => Some("subclasses"),
            Level::Subclass => Some("groups"),
            Level::Group => Some("subgroups"),
            Level::Subgroup => Some("spices"),
            Level::Species => None,
        }
    }

    /// Number of key segments from the section down to a node of this level.
    pub fn depth(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Section => "section",
            Level::Class => "class",
            Level::Subclass => "subclass",
            Level::Group => "group",
            Level::Subgroup => "subgroup",
            Level::Species => "species",
        };
        f.write_str(name)
    }
}

/// Equivalent STIX industry sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StixLink {
    pub name_en: String,
    pub name_ru: String,
    pub aliases_ru: Vec<String>,
}

/// Equivalent MISP industry taxonomy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MispLink {
    pub name_en: String,
    pub name_ru: String,
}

/// Vocabulary links contributed by a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyLinks {
    pub stix: Vec<StixLink>,
    pub misp: Vec<MispLink>,
}

/// One record of the classification table.
///
/// Optional vocabulary columns hold comma-joined lists; `None` and `Some("")`
/// are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the source file
    pub line: u64,
    pub letter: String,
    pub id: String,
    pub name: String,
    pub stix_name_en: Option<String>,
    pub stix_name_ru: Option<String>,
    pub stix_name_syn_ru: Option<String>,
    pub other_name_en: Option<String>,
    pub other_name_ru: Option<String>,
}

impl Row {
    pub fn new(letter: impl Into<String>, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Attach STIX columns (English names, Russian name, Russian aliases).
    pub fn with_stix(mut self, name_en: &str, name_ru: &str, syn_ru: &str) -> Self {
        self.stix_name_en = Some(name_en.to_string());
        self.stix_name_ru = Some(name_ru.to_string());
        self.stix_name_syn_ru = Some(syn_ru.to_string());
        self
    }

    /// Attach MISP columns (English names, Russian name).
    pub fn with_misp(mut self, name_en: &str, name_ru: &str) -> Self {
        self.other_name_en = Some(name_en.to_string());
        self.other_name_ru = Some(name_ru.to_string());
        self
    }
}

/// Children of a node, keyed by identifier segment, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildMap {
    entries: Vec<(String, Node)>,
}

impl ChildMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, n)| n)
    }

    /// Insert a node. An existing key keeps its position and returns the old node.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for ChildMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// A node of the classification at any level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub level: Level,
    /// Dotted identifier as given in the source; `None` for sections.
    pub id: Option<String>,
    pub name: String,
    pub links: VocabularyLinks,
    pub children: ChildMap,
}

impl Node {
    pub fn section(name: impl Into<String>, links: VocabularyLinks) -> Self {
        Self {
            level: Level::Section,
            id: None,
            name: name.into(),
            links,
            children: ChildMap::new(),
        }
    }

    pub fn new(
        level: Level,
        id: impl Into<String>,
        name: impl Into<String>,
        links: VocabularyLinks,
    ) -> Self {
        Self {
            level,
            id: Some(id.into()),
            name: name.into(),
            links,
            children: ChildMap::new(),
        }
    }

    /// Visit this node and all descendants depth-first, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for (_, child) in self.children.iter() {
            child.walk(visit);
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 5)?;
        state.serialize_field("name", &self.name)?;
        match &self.id {
            Some(id) => state.serialize_field("id", id)?,
            None => state.skip_field("id")?,
        }
        state.serialize_field("stix-equivalents", &self.links.stix)?;
        state.serialize_field("misp-equivalents", &self.links.misp)?;
        if let Some(key) = self.level.children_key() {
            state.serialize_field(key, &self.children)?;
        }
        state.end()
    }
}

/// The complete classification: sections keyed by letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    pub sections: ChildMap,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, letter: &str) -> Option<&Node> {
        self.sections.get(letter)
    }

    /// Resolve a node by section letter and dotted identifier.
    pub fn find(&self, letter: &str, id: &str) -> Result<Option<&Node>, DomainError> {
        let path = NodePath::parse(id, 0)?;
        let mut current = match self.sections.get(letter) {
            Some(section) => section,
            None => return Ok(None),
        };
        for key in &path.keys {
            current = match current.children.get(key) {
                Some(child) => child,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }

    /// Visit every node depth-first in emission order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        for (_, section) in self.sections.iter() {
            section.walk(visit);
        }
    }

    /// Number of nodes at each level, in hierarchy order.
    pub fn count_by_level(&self) -> Vec<(Level, usize)> {
        let mut counts = [0usize; 6];
        self.walk(&mut |node: &Node| counts[node.level.depth()] += 1);
        Level::ALL.iter().map(|l| (*l, counts[l.depth()])).collect()
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        self.walk(&mut |node: &Node| {
            if node.children.is_empty() {
                leaves += 1;
            }
        });
        leaves
    }
}
