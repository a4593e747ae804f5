//! Reading classification rows from delimited text.

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, Row};

/// Columns every input file must declare.
pub const REQUIRED_COLUMNS: [&str; 3] = ["letter", "id", "name"];

/// Record as it appears in the file; every column may be blank.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    letter: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "stix-name-en", default)]
    stix_name_en: Option<String>,
    #[serde(rename = "stix-name-ru", default)]
    stix_name_ru: Option<String>,
    #[serde(rename = "stix-name-syn-ru", default)]
    stix_name_syn_ru: Option<String>,
    #[serde(rename = "other-name-en", default)]
    other_name_en: Option<String>,
    #[serde(rename = "other-name-ru", default)]
    other_name_ru: Option<String>,
}

impl RawRow {
    fn into_row(self, line: u64) -> ApplicationResult<Row> {
        let letter = self
            .letter
            .filter(|l| !l.is_empty())
            .ok_or(DomainError::MissingField { line, field: "letter" })?;
        Ok(Row {
            line,
            letter,
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            stix_name_en: self.stix_name_en,
            stix_name_ru: self.stix_name_ru,
            stix_name_syn_ru: self.stix_name_syn_ru,
            other_name_en: self.other_name_en,
            other_name_ru: self.other_name_ru,
        })
    }
}

/// Parse all rows of a delimited table with a header line.
pub fn parse_rows(content: &str, delimiter: u8) -> ApplicationResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(csv_err)?.clone();
    check_columns(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawRow = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push(raw.into_row(line)?);
    }
    debug!("parse_rows: {} rows", rows.len());
    Ok(rows)
}

fn check_columns(headers: &StringRecord) -> ApplicationResult<()> {
    for field in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == field) {
            return Err(DomainError::MissingField { line: 1, field }.into());
        }
    }
    Ok(())
}

fn csv_err(e: csv::Error) -> ApplicationError {
    ApplicationError::InvalidInput {
        message: e.to_string(),
    }
}
