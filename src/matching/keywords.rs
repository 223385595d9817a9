//! Keyword overlap between a matched internal/external pair, shown alongside
//! the similarity score.

use std::collections::BTreeSet;

use crate::domain::researcher::Researcher;

/// Split comma-separated free text into a set of cleaned keywords.
///
/// Tokens shorter than three characters are noise and dropped.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| keyword.len() > 2)
        .collect()
}

/// Pick up to `top_n` keywords relevant to an internal/external pair.
///
/// Exact overlaps between the internal side's research areas and the external
/// side's sought expertise and focus come first; the remainder is padded from
/// either side. The result is sorted for stable display.
pub fn relevant_keywords(internal: &Researcher, external: &Researcher, top_n: usize) -> Vec<String> {
    let internal_keywords = extract_keywords(&internal.primary_areas);

    let mut external_keywords = extract_keywords(&external.expertise_sought);
    external_keywords.extend(extract_keywords(&external.organization_focus));

    let exact: BTreeSet<String> = internal_keywords
        .intersection(&external_keywords)
        .cloned()
        .collect();

    let mut result: Vec<String> = if exact.is_empty() {
        internal_keywords
            .union(&external_keywords)
            .take(top_n)
            .cloned()
            .collect()
    } else {
        let mut picked: Vec<String> = exact.iter().cloned().collect();
        let remaining = internal_keywords
            .union(&external_keywords)
            .filter(|keyword| !exact.contains(*keyword))
            .cloned();
        picked.extend(remaining.take(top_n.saturating_sub(picked.len())));
        picked.truncate(top_n);
        picked
    };

    result.sort();
    result
}
