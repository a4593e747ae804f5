//! Conversion of the REACS industry classification into a nested JSON tree
//! and an RDF/Turtle ontology cross-referenced to STIX and MISP vocabularies.
//!
//! The pipeline is a single batch pass:
//! table rows → [`domain::TreeBuilder`] → [`domain::Taxonomy`] →
//! [`application::render_json`] and [`application::render_turtle`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{render_json, render_turtle, ApplicationError, ApplicationResult};
pub use domain::{DomainError, Level, Node, Row, Taxonomy, TreeBuilder};
