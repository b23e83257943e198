//! Fuzzy name search across folders and notes.
//!
//! Queries are split on whitespace and lowercased; an entity matches when every
//! token fuzzy-matches its name (Skim algorithm). Hits carry the summed score and
//! the matched character ranges so a display layer can highlight them.

use crate::domain::entity::{EntityId, EntityKind};
use crate::domain::store::ContentStore;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// One folder or note whose name matches a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub score: i64,
    /// `(start, end)` character index ranges (exclusive end) of matched characters.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl ContentStore {
    /// Finds folders and notes whose names match `query`, best match first.
    ///
    /// An empty or whitespace-only query matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::domain::ContentStore;
    ///
    /// let store = ContentStore::seeded();
    /// let hits = store.search("meet");
    /// assert_eq!(hits[0].name, "Meeting Notes");
    /// ```
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let _span = tracing::debug_span!("search", query_len = query.len()).entered();

        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let candidates = self
            .folders()
            .filter(|folder| !folder.is_root())
            .map(|folder| (&folder.id, EntityKind::Folder, folder.name.as_str()))
            .chain(
                self.notes()
                    .map(|note| (&note.id, EntityKind::Note, note.name.as_str())),
            );

        let mut hits: Vec<SearchHit> = candidates
            .filter_map(|(id, kind, name)| {
                let mut score = 0;
                let mut indices = Vec::new();

                for token in &tokens {
                    let (token_score, token_indices) = matcher.fuzzy_indices(name, token)?;
                    score += token_score;
                    indices.extend(token_indices);
                }

                Some(SearchHit {
                    id: id.clone(),
                    kind,
                    name: name.to_string(),
                    score,
                    highlight_ranges: coalesce_ranges(indices),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

        tracing::debug!(hits = hits.len(), "search complete");
        hits
    }
}

/// Merges matched character indices into contiguous `(start, end)` ranges.
fn coalesce_ranges(mut indices: Vec<usize>) -> Vec<(usize, usize)> {
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesce_merges_runs() {
        assert_eq!(coalesce_ranges(vec![0, 1, 2, 5, 6, 9]), vec![(0, 3), (5, 7), (9, 10)]);
        assert_eq!(coalesce_ranges(vec![3, 1, 2, 2]), vec![(1, 4)]);
        assert!(coalesce_ranges(vec![]).is_empty());
    }

    #[test]
    fn empty_query_finds_nothing() {
        let store = ContentStore::seeded();
        assert!(store.search("").is_empty());
        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn every_token_must_match() {
        let store = ContentStore::seeded();
        let hits = store.search("web ideas");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "webapp");
        assert_eq!(hits[0].kind, EntityKind::Note);

        assert!(store.search("zzzz").is_empty());
    }

    #[test]
    fn search_covers_folders_and_is_case_insensitive() {
        let store = ContentStore::seeded();
        let hits = store.search("WORK");
        assert!(hits
            .iter()
            .any(|hit| hit.id.as_str() == "work" && hit.kind == EntityKind::Folder));
        let work = hits.iter().find(|hit| hit.id.as_str() == "work").unwrap();
        assert_eq!(work.highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn ranges_index_the_displayed_name() {
        let mut store = ContentStore::new();
        let root = store.root_id().clone();
        let id = store.create_folder(&root, "İİ Notes").unwrap();

        let hits = store.search("NOTES");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
        assert_eq!(hits[0].highlight_ranges, vec![(3, 8)]);
    }
}
