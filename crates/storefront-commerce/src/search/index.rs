//! Field index over a list of searchable items.

use std::sync::Arc;

use tracing::debug;

use super::matcher::Matcher;

/// Items that expose named text fields to the search index.
pub trait Searchable {
    /// Text of `field`, or `None` if the item has no such field.
    fn field_text(&self, field: &str) -> Option<&str>;
}

/// One ranked search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the item in the indexed list.
    pub index: usize,
    /// Combined score; lower is better.
    pub score: f64,
}

#[derive(Debug, Clone)]
struct FieldEntry {
    text: String,
    norm: f64,
}

/// Index over a fixed field set of an item list.
///
/// Holds the list by `Arc` so it can tell whether it was built for a given
/// list without comparing contents.
pub struct SearchIndex<T> {
    items: Arc<Vec<T>>,
    fields: Vec<String>,
    records: Vec<Vec<Option<FieldEntry>>>,
    matcher: Arc<dyn Matcher>,
}

impl<T: Searchable> SearchIndex<T> {
    /// Build an index of `fields` over `items`.
    ///
    /// Empty field values are left out and never match.
    pub fn build(items: Arc<Vec<T>>, fields: &[&str], matcher: Arc<dyn Matcher>) -> Self {
        let records = items
            .iter()
            .map(|item| {
                fields
                    .iter()
                    .map(|field| {
                        item.field_text(field)
                            .filter(|text| !text.trim().is_empty())
                            .map(|text| FieldEntry {
                                text: text.to_string(),
                                norm: field_norm(text),
                            })
                    })
                    .collect()
            })
            .collect();

        debug!(
            items = items.len(),
            fields = fields.len(),
            "search index built"
        );

        Self {
            items,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            records,
            matcher,
        }
    }

    /// Whether this index was built over exactly this list and field set.
    pub fn is_built_for(&self, items: &Arc<Vec<T>>, fields: &[&str]) -> bool {
        Arc::ptr_eq(&self.items, items)
            && self.fields.len() == fields.len()
            && self.fields.iter().zip(fields).all(|(a, b)| a == b)
    }

    pub fn items(&self) -> &Arc<Vec<T>> {
        &self.items
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ranked hits for `query`.
    ///
    /// An empty or whitespace-only query returns every item with a zero
    /// score in list order. Any other query is matched as typed, spaces
    /// included, and only matching items are returned, sorted by score
    /// with ties kept in list order.
    pub fn search_scored(&self, query: &str) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return (0..self.items.len())
                .map(|index| SearchHit { index, score: 0.0 })
                .collect();
        }

        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.score_record(query, record)
                    .map(|score| SearchHit { index, score })
            })
            .collect();

        // stable: equal scores keep list order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }

    /// Positions of matching items, best first.
    pub fn search_indices(&self, query: &str) -> Vec<usize> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.index)
            .collect()
    }

    /// Matching items, best first.
    pub fn search(&self, query: &str) -> Vec<&T> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| &self.items[hit.index])
            .collect()
    }

    fn score_record(&self, pattern: &str, record: &[Option<FieldEntry>]) -> Option<f64> {
        let mut matched = false;
        let mut total = 1.0;

        for entry in record.iter().flatten() {
            if let Some(score) = self.matcher.score(pattern, &entry.text) {
                let base = if score == 0.0 { f64::EPSILON } else { score };
                total *= base.powf(entry.norm);
                matched = true;
            }
        }

        matched.then_some(total)
    }
}

impl<T> std::fmt::Debug for SearchIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("items", &self.items.len())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Length norm of a field value: `1 / sqrt(tokens)` rounded to three places.
fn field_norm(text: &str) -> f64 {
    let tokens = text.split_whitespace().count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
