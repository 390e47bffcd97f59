//! Query state over a searchable list.

use std::sync::Arc;

use super::index::{SearchIndex, Searchable};
use super::matcher::{FuzzyMatcher, Matcher};

/// Current query and its ranked results over a shared item list.
///
/// The index is rebuilt only when the list identity or the field set
/// changes. Results are recomputed when the query or the index changes.
pub struct SearchState<T> {
    fields: Vec<&'static str>,
    matcher: Arc<dyn Matcher>,
    index: Option<SearchIndex<T>>,
    query: String,
    results: Vec<usize>,
    builds: usize,
}

impl<T: Searchable> SearchState<T> {
    /// Create an empty state searching `fields` with the default matcher.
    pub fn new(fields: &[&'static str]) -> Self {
        Self::with_matcher(fields, Arc::new(FuzzyMatcher::default()))
    }

    pub fn with_matcher(fields: &[&'static str], matcher: Arc<dyn Matcher>) -> Self {
        Self {
            fields: fields.to_vec(),
            matcher,
            index: None,
            query: String::new(),
            results: Vec::new(),
            builds: 0,
        }
    }

    /// Point the state at a list, rebuilding the index if it is a new one.
    pub fn set_items(&mut self, items: Arc<Vec<T>>) {
        if self.is_current(&items) {
            return;
        }
        self.index = Some(SearchIndex::build(
            items,
            &self.fields,
            self.matcher.clone(),
        ));
        self.builds += 1;
        self.refresh();
    }

    /// Change the searched field set, rebuilding if it differs.
    pub fn set_fields(&mut self, fields: &[&'static str]) {
        if self.fields == fields {
            return;
        }
        self.fields = fields.to_vec();
        if let Some(index) = self.index.take() {
            let items = index.items().clone();
            self.index = Some(SearchIndex::build(
                items,
                &self.fields,
                self.matcher.clone(),
            ));
            self.builds += 1;
        }
        self.refresh();
    }

    /// Replace the query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Ranked results for the current query.
    pub fn results(&self) -> Vec<&T> {
        match &self.index {
            Some(index) => self.results.iter().map(|&i| &index.items()[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// How many times an index has been built.
    pub fn index_builds(&self) -> usize {
        self.builds
    }

    fn is_current(&self, items: &Arc<Vec<T>>) -> bool {
        self.index
            .as_ref()
            .is_some_and(|index| index.is_built_for(items, &self.fields))
    }

    fn refresh(&mut self) {
        self.results = match &self.index {
            Some(index) => index.search_indices(&self.query),
            None => Vec::new(),
        };
    }
}

impl<T> std::fmt::Debug for SearchState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchState")
            .field("fields", &self.fields)
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("builds", &self.builds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, PRODUCT_SEARCH_FIELDS};

    fn catalog() -> Arc<Vec<Product>> {
        Arc::new(vec![
            Product::new(1, "Essence Mascara Lash Princess", 9.99)
                .with_brand("Essence")
                .with_category("beauty"),
            Product::new(2, "Eyeshadow Palette with Mirror", 19.99)
                .with_brand("Glamour Beauty")
                .with_category("beauty"),
            Product::new(3, "Apple", 1.99).with_category("groceries"),
        ])
    }

    #[test]
    fn test_empty_query_returns_full_list() {
        let mut state = SearchState::new(&PRODUCT_SEARCH_FIELDS);
        state.set_items(catalog());

        let titles: Vec<_> = state.results().iter().map(|p| p.id.get()).collect();
        assert_eq!(titles, vec![1, 2, 3]);
    }

    #[test]
    fn test_query_filters_and_ranks() {
        let mut state = SearchState::new(&PRODUCT_SEARCH_FIELDS);
        state.set_items(catalog());
        state.set_query("groceries");

        let ids: Vec<_> = state.results().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3]);

        state.set_query("no-such-thing-here");
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_same_list_does_not_rebuild() {
        let items = catalog();
        let mut state = SearchState::new(&PRODUCT_SEARCH_FIELDS);
        state.set_items(items.clone());
        state.set_query("beauty");
        state.set_items(items.clone());
        state.set_query("apple");
        assert_eq!(state.index_builds(), 1);

        state.set_items(catalog());
        assert_eq!(state.index_builds(), 2);
    }

    #[test]
    fn test_field_change_rebuilds() {
        let mut state = SearchState::new(&PRODUCT_SEARCH_FIELDS);
        state.set_items(catalog());
        state.set_query("essence");
        assert_eq!(state.result_count(), 1);

        state.set_fields(&["category"]);
        assert_eq!(state.index_builds(), 2);
        assert_eq!(state.result_count(), 0);

        state.set_fields(&["category"]);
        assert_eq!(state.index_builds(), 2);
    }

    #[test]
    fn test_no_items_no_results() {
        let mut state: SearchState<Product> = SearchState::new(&PRODUCT_SEARCH_FIELDS);
        state.set_query("apple");
        assert!(state.results().is_empty());
        assert_eq!(state.index_builds(), 0);
    }
}
