//! Featured-list matching
//!
//! Scanned file extensions are mapped to candidate languages through the
//! capability index. A featured entry is recommended when its `onLanguage`
//! list shares a language with the candidates. Entries without `onLanguage`
//! never match, whatever languages they contribute.

use crate::capability::CapabilityIndex;
use lodestar_core::types::FeaturedEntry;
use std::collections::HashSet;
use tracing::debug;

/// Featured extension IDs relevant to the scanned extensions, in featured-list
/// order with duplicates removed
pub fn match_featured<I, S>(
    scanned: I,
    index: &CapabilityIndex,
    featured: &[FeaturedEntry],
) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates: HashSet<&str> = scanned
        .into_iter()
        .flat_map(|ext| index.languages_for_file_extension(ext.as_ref()))
        .map(String::as_str)
        .collect();

    if candidates.is_empty() {
        debug!("No scanned file extension maps to a known language");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let recommended: Vec<String> = featured
        .iter()
        .filter(|entry| entry.targets_any(&candidates))
        .filter(|entry| seen.insert(entry.id.as_str()))
        .map(|entry| entry.id.clone())
        .collect();

    debug!(
        "Matched {} featured extensions for languages {:?}",
        recommended.len(),
        candidates
    );
    recommended
}
