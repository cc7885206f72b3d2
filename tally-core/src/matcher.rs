//! Utterance scanning against the catalog.
//!
//! A two-stage containment scan: a category is considered only when its
//! name appears somewhere in the utterance, and item names are matched
//! only inside such categories. The numeric literal is extracted once per
//! utterance and shared by every item match, so an utterance naming two
//! items but one number assigns that number to both. That mirrors the
//! product behavior this engine reproduces; see the crate docs.

use crate::catalog::{Catalog, CategoryId, ItemId};
use serde::{Deserialize, Serialize};

/// A (category, item, value) triple produced by scanning an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub category_id: CategoryId,
    pub item_id: ItemId,
    /// The literal number text as it appeared in the utterance.
    pub value: String,
}

/// Result of scanning one utterance.
///
/// Candidates appear in (category order, item order) as scanned; there is
/// no ranking or disambiguation.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    pub candidates: Vec<CandidateMatch>,
}

impl MatchReport {
    /// Whether the scan produced at least one candidate.
    pub fn any_found(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Scan an utterance against the catalog.
///
/// Matching is case-insensitive substring containment. An item whose name
/// appears in the utterance still produces no candidate unless a numeric
/// literal exists somewhere in the utterance.
pub fn scan(utterance: &str, catalog: &Catalog) -> MatchReport {
    let text = utterance.to_lowercase();
    if text.trim().is_empty() {
        return MatchReport::default();
    }

    let literal = extract_numeric_literal(&text);

    let mut candidates = Vec::new();
    for category in catalog.categories() {
        // Hard gate: items are only considered when their category is
        // also mentioned.
        if !text.contains(&category.name.to_lowercase()) {
            continue;
        }

        for item in &category.items {
            if !text.contains(&item.name.to_lowercase()) {
                continue;
            }
            let Some(value) = literal else {
                continue;
            };
            candidates.push(CandidateMatch {
                category_id: category.id,
                item_id: item.id,
                value: value.to_string(),
            });
        }
    }

    MatchReport { candidates }
}

/// Extract the first numeric literal from the text.
///
/// A literal is a contiguous run of decimal digits, optionally continuing
/// with a single `.` followed by more digits: "2000", "2.5", the "60" in
/// "60kg". A trailing bare `.` is not consumed.
pub fn extract_numeric_literal(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }

    Some(&text[start..end])
}
