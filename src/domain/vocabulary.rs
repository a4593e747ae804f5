//! Extraction of STIX and MISP equivalents from a row.

use crate::domain::entities::{MispLink, Row, StixLink, VocabularyLinks};

/// Build the vocabulary links for a row.
///
/// MISP links are only extracted when the row carries STIX English names.
/// The source data never lists a MISP entry without a STIX one, and the
/// published artifacts rely on that pairing.
pub fn extract_links(row: &Row) -> VocabularyLinks {
    let stix_names = split_list(row.stix_name_en.as_deref());
    if stix_names.is_empty() {
        return VocabularyLinks::default();
    }

    let name_ru = row.stix_name_ru.clone().unwrap_or_default();
    let aliases_ru = split_list(row.stix_name_syn_ru.as_deref());
    let stix = stix_names
        .into_iter()
        .map(|name_en| StixLink {
            name_en,
            name_ru: name_ru.clone(),
            aliases_ru: aliases_ru.clone(),
        })
        .collect();

    let misp_ru = row.other_name_ru.clone().unwrap_or_default();
    let misp = split_list(row.other_name_en.as_deref())
        .into_iter()
        .map(|name_en| MispLink {
            name_en,
            name_ru: misp_ru.clone(),
        })
        .collect();

    VocabularyLinks { stix, misp }
}

/// Split a comma-joined cell, dropping empty segments.
fn split_list(field: Option<&str>) -> Vec<String> {
    field
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
