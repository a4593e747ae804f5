//! Conversion service
//!
//! Runs the two-stage pipeline: table → tree → JSON and Turtle artifacts.
//! Artifacts are only written once both renderings have succeeded, and then
//! as one unit: both files are replaced or neither is.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::json::render_json;
use crate::application::rows::parse_rows;
use crate::application::turtle::{assemble, emit_lines};
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Level, Row, Taxonomy, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Both renderings of one tree, held in memory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub taxonomy: Taxonomy,
    pub rows: usize,
    pub json: String,
    pub turtle: String,
    /// Statement lines after the header
    pub triple_lines: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub json_path: PathBuf,
    pub turtle_path: PathBuf,
    pub rows: usize,
    pub counts: Vec<(Level, usize)>,
    pub leaves: usize,
    pub triple_lines: usize,
}

/// Service converting the classification table into its artifacts.
pub struct ConversionService {
    fs: Arc<dyn FileSystem>,
}

impl ConversionService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse the input table.
    pub fn read_rows(&self, settings: &Settings) -> ApplicationResult<Vec<Row>> {
        let input = settings.input_path();
        debug!("read_rows: {}", input.display());
        let content = self.fs.read_to_string(&input).input_context(&input)?;
        parse_rows(&content, settings.delimiter_byte()?)
    }

    /// Build the tree without rendering anything.
    pub fn load(&self, settings: &Settings) -> ApplicationResult<Taxonomy> {
        let rows = self.read_rows(settings)?;
        Ok(TreeBuilder::build(&rows)?)
    }

    /// Build the tree and render both artifacts in memory.
    pub fn render(&self, settings: &Settings) -> ApplicationResult<Artifacts> {
        let rows = self.read_rows(settings)?;
        let taxonomy = TreeBuilder::build(&rows)?;
        info!("tree built: {} rows, {} sections", rows.len(), taxonomy.sections.len());

        let json = render_json(&taxonomy)?;

        let lines = emit_lines(&taxonomy);
        let turtle = assemble(&lines);
        info!("turtle emitted: {} lines", lines.len());

        Ok(Artifacts {
            taxonomy,
            rows: rows.len(),
            json,
            turtle,
            triple_lines: lines.len(),
        })
    }

    /// Run the full pipeline and write both artifacts.
    #[instrument(skip(self, settings))]
    pub fn run(&self, settings: &Settings) -> ApplicationResult<ConversionReport> {
        let artifacts = self.render(settings)?;

        let build_dir = &settings.build_dir;
        if !self.fs.is_dir(build_dir) {
            self.fs
                .create_dir_all(build_dir)
                .with_path_context("create build dir", build_dir)?;
        }

        let json_path = settings.json_path();
        let turtle_path = settings.turtle_path();
        self.fs
            .write_atomic_all(&[
                (json_path.as_path(), artifacts.json.as_str()),
                (turtle_path.as_path(), artifacts.turtle.as_str()),
            ])
            .output_context(build_dir)?;
        info!(
            "wrote {} and {}",
            json_path.display(),
            turtle_path.display()
        );

        Ok(ConversionReport {
            input: settings.input_path(),
            json_path,
            turtle_path,
            rows: artifacts.rows,
            counts: artifacts.taxonomy.count_by_level(),
            leaves: artifacts.taxonomy.leaf_count(),
            triple_lines: artifacts.triple_lines,
        })
    }
}
