//! RDF/Turtle emission for the classification tree.
//!
//! The output layout (header, line breaks, tab continuations) is consumed by
//! downstream tooling as-is and must stay byte-stable.

use tracing::debug;

use crate::domain::{Level, Node, Taxonomy};

pub const SKG_PREFIX: &str = "sec-kg";
pub const REACS_PREFIX: &str = "reacs";

const NAMED_INDIVIDUAL: &str = "owl:NamedIndividual";
const PARENT_REL: &str = "d3f:has-parent";
const ID_REL: &str = "reacs:reacs-id";
const NAME_REL: &str = "d3f:name";
const ALIAS_REL: &str = "sec-kg:aliases";

/// Fixed ontology preamble: prefixes, class hierarchy, `reacs-id` property.
pub const HEADER: &str = "
@prefix reacs: <http://sec-kg.org/ontologies/reacs#> .
@prefix d3f: <http://d3fend.mitre.org/ontologies/d3fend.owl#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix sec-kg: <http://sec-kg.org/ontologies/sec-kg#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix stix: <http://docs.oasis-open.org/ns/cti/stix#> .


<http://sec-kg.org/ontologies/reacs> a owl:Ontology .

sec-kg:REACSClassifier a owl:Class .
stix:IndustrySector a owl:Class .
sec-kg:Industry a owl:Class .

reacs:REACSSection a owl:Class ;
    rdfs:subClassOf sec-kg:REACSClassifier .

reacs:REACSClass a owl:Class ;
    rdfs:subClassOf reacs:REACSSection .

reacs:REACSSubClass a owl:Class ;
    rdfs:subClassOf reacs:REACSClass .

reacs:REACSGroup a owl:Class ;
    rdfs:subClassOf reacs:REACSSubClass .

reacs:REACSSubGroup a owl:Class ;
    rdfs:subClassOf reacs:REACSGroup .

reacs:REACSSpecies a owl:Class ;
    rdfs:subClassOf reacs:REACSSubGroup .


reacs:reacs-id
  rdf:type owl:DatatypeProperty ;
  rdfs:range xsd:string ;
  rdfs:subPropertyOf owl:topDataProperty .
  \n";

/// Per-level naming: IRI slug and ontology class.
struct LevelNames {
    slug: &'static str,
    class: &'static str,
}

fn names(level: Level) -> LevelNames {
    let (slug, class) = match level {
        Level::Section => ("section", "reacs:REACSSection"),
        Level::Class => ("class", "reacs:REACSClass"),
        Level::Subclass => ("subclass", "reacs:REACSSubClass"),
        Level::Group => ("group", "reacs:REACSGroup"),
        Level::Subgroup => ("subgroup", "reacs:REACSSubGroup"),
        Level::Species => ("spice", "reacs:REACSSpecies"),
    };
    LevelNames { slug, class }
}

/// IRI of a node; sections use their letter, every other level its dotted id.
pub fn node_iri(level: Level, ident: &str) -> String {
    format!("{}:reacs-{}--{}", REACS_PREFIX, names(level).slug, ident)
}

/// IRI of a STIX sector individual derived from its English name.
pub fn stix_iri(name_en: &str) -> String {
    format!("{}:stix-sector--{}", SKG_PREFIX, name_en.replace(' ', "-"))
}

/// IRI of a MISP industry individual derived from its English name.
pub fn misp_iri(name_en: &str) -> String {
    format!("{}:misp-sector--{}", SKG_PREFIX, name_en.replace(' ', "-"))
}

/// Escape a string for a double-quoted Turtle literal.
fn literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Collects statement lines while walking the tree.
#[derive(Debug, Default)]
pub struct TurtleEmitter {
    lines: Vec<String>,
}

impl TurtleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every section, each followed by its descendants.
    pub fn emit_taxonomy(&mut self, taxonomy: &Taxonomy) {
        for (letter, section) in taxonomy.sections.iter() {
            self.emit_node(letter, section, None);
        }
        debug!("emit_taxonomy: {} lines", self.lines.len());
    }

    /// Emit a node, its vocabulary links and then its children in key order.
    fn emit_node(&mut self, key: &str, node: &Node, parent_iri: Option<&str>) {
        let ident = node.id.as_deref().unwrap_or(key);
        let iri = node_iri(node.level, ident);
        let class = names(node.level).class;

        self.push(format!("{iri} a {class} ,"));
        self.push(format!("\t\t{NAMED_INDIVIDUAL} ;"));
        if let (Some(parent), Some(id)) = (parent_iri, node.id.as_deref()) {
            self.push(format!("\t{PARENT_REL} {parent} ;"));
            self.push(format!("\t{ID_REL} \"{}\" ;", literal(id)));
        }
        self.push(format!("\t{NAME_REL} \"{}\"@ru .", literal(&node.name)));

        self.emit_links(node, &iri);

        for (child_key, child) in node.children.iter() {
            self.emit_node(child_key, child, Some(iri.as_str()));
        }
    }

    fn emit_links(&mut self, node: &Node, iri: &str) {
        for stix in &node.links.stix {
            let sector = stix_iri(&stix.name_en);
            self.push_equivalent(&sector, "stix:IndustrySector", &stix.name_en, &stix.name_ru, iri);
            for alias in &stix.aliases_ru {
                self.push(format!("{sector} {ALIAS_REL} \"{}\"@ru .", literal(alias)));
            }
        }

        for misp in &node.links.misp {
            let industry = misp_iri(&misp.name_en);
            let class = format!("{SKG_PREFIX}:Industry");
            self.push_equivalent(&industry, &class, &misp.name_en, &misp.name_ru, iri);
        }
    }

    /// Typed individual with bilingual names and a two-way `owl:sameAs`.
    fn push_equivalent(&mut self, other: &str, class: &str, name_en: &str, name_ru: &str, iri: &str) {
        self.push(format!("{other} a {class} ,"));
        self.push(format!("\t\t{NAMED_INDIVIDUAL} ;"));
        self.push(format!("\t{NAME_REL} \"{}\"@en ,", literal(name_en)));
        self.push(format!("\t\t\"{}\"@ru ;", literal(name_ru)));
        self.push(format!("\towl:sameAs {iri} ."));
        self.push(format!("{iri} owl:sameAs {other} ."));
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Statement lines for a tree, without the header.
pub fn emit_lines(taxonomy: &Taxonomy) -> Vec<String> {
    let mut emitter = TurtleEmitter::new();
    emitter.emit_taxonomy(taxonomy);
    emitter.into_lines()
}

/// Complete Turtle document: header followed by one line per statement.
pub fn render_turtle(taxonomy: &Taxonomy) -> String {
    assemble(&emit_lines(taxonomy))
}

/// Prefix statement lines with the header, terminating each with a newline.
pub fn assemble(lines: &[String]) -> String {
    let body_len: usize = lines.iter().map(|l| l.len() + 1).sum();
    let mut out = String::with_capacity(HEADER.len() + body_len);
    out.push_str(HEADER);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
