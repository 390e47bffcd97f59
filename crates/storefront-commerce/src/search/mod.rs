//! Search module.
//!
//! Contains the fuzzy matcher, the field index built over a product list,
//! memoized query state and pagination.

mod index;
mod matcher;
mod paginator;
mod state;

pub use index::{SearchHit, SearchIndex, Searchable};
pub use matcher::{FuzzyMatcher, Matcher, DEFAULT_THRESHOLD, LOCATION_DISTANCE};
pub use paginator::{PageSize, Paginator};
pub use state::SearchState;
