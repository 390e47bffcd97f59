//! Page slicing and navigation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Number of rows shown per page.
///
/// Serialized as its label. Deserializes from a label or a bare integer,
/// so `10`, `"10"`, `-1` and `"all"` are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageSize", into = "String")]
pub enum PageSize {
    /// A fixed number of rows.
    Rows(usize),
    /// Every row on a single page.
    All,
}

impl PageSize {
    /// Sizes offered to the user, in display order.
    pub const OPTIONS: [PageSize; 4] = [
        PageSize::Rows(5),
        PageSize::Rows(10),
        PageSize::Rows(25),
        PageSize::All,
    ];

    /// Row count, or `None` for [`PageSize::All`].
    pub fn rows(&self) -> Option<usize> {
        match self {
            PageSize::Rows(n) => Some(*n),
            PageSize::All => None,
        }
    }

    /// Labels of [`PageSize::OPTIONS`], e.g. for help text.
    pub fn option_labels() -> Vec<String> {
        Self::OPTIONS.iter().map(|s| s.to_string()).collect()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Rows(5)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(n) => write!(f, "{}", n),
            PageSize::All => write!(f, "all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = CommerceError;

    /// Parse one of the offered sizes. `all` and `-1` both mean every row.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "-1" {
            return Ok(PageSize::All);
        }
        let size = s
            .parse::<usize>()
            .ok()
            .map(PageSize::Rows)
            .filter(|size| Self::OPTIONS.contains(size));
        size.ok_or_else(|| CommerceError::InvalidPageSize(s.to_string()))
    }
}

/// A page size as written in a config file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPageSize {
    Number(i64),
    Label(String),
}

impl TryFrom<RawPageSize> for PageSize {
    type Error = CommerceError;

    fn try_from(raw: RawPageSize) -> Result<Self, Self::Error> {
        match raw {
            RawPageSize::Number(n) => n.to_string().parse(),
            RawPageSize::Label(label) => label.parse(),
        }
    }
}

impl From<PageSize> for String {
    fn from(size: PageSize) -> Self {
        size.to_string()
    }
}

/// Zero-based page index plus page size.
///
/// Navigation never wraps and never fails: moving past either end leaves
/// the index where it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page: usize,
    page_size: PageSize,
}

impl Paginator {
    /// Start on the first page with `page_size`.
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 0, page_size }
    }

    /// Current page index (0-based).
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 0;
    }

    /// Number of pages for `total` rows. Never less than one.
    pub fn page_count(&self, total: usize) -> usize {
        match self.page_size.rows() {
            Some(rows) if rows > 0 => total.div_ceil(rows).max(1),
            _ => 1,
        }
    }

    /// Index of the last page for `total` rows.
    pub fn last_page(&self, total: usize) -> usize {
        self.page_count(total) - 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_go_next(&self, total: usize) -> bool {
        self.page < self.last_page(total)
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next(&mut self, total: usize) {
        if self.can_go_next(total) {
            self.page += 1;
        }
    }

    pub fn last(&mut self, total: usize) {
        self.page = self.last_page(total);
    }

    /// Jump to `index`. Out-of-range indices are rejected and leave the
    /// current page unchanged.
    pub fn set_page(&mut self, index: usize, total: usize) -> bool {
        if index > self.last_page(total) {
            return false;
        }
        self.page = index;
        true
    }

    /// Rows of the current page.
    ///
    /// Returns an empty slice when the index lies past the end.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(rows) = self.page_size.rows() else {
            return items;
        };
        let start = self.page.saturating_mul(rows).min(items.len());
        let end = start.saturating_add(rows).min(items.len());
        &items[start..end]
    }

    /// First row number shown (1-based), or 0 when there are none.
    pub fn start_item(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        match self.page_size.rows() {
            Some(rows) => (self.page.saturating_mul(rows) + 1).min(total),
            None => 1,
        }
    }

    /// Last row number shown (1-based).
    pub fn end_item(&self, total: usize) -> usize {
        match self.page_size.rows() {
            Some(rows) => (self.page + 1).saturating_mul(rows).min(total),
            None => total,
        }
    }

    /// Display range, e.g. `"6–10 of 12"`.
    pub fn range_label(&self, total: usize) -> String {
        format!(
            "{}–{} of {}",
            self.start_item(total),
            self.end_item(total),
            total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<usize> {
        (0..12).collect()
    }

    #[test]
    fn test_default_is_five_rows() {
        let p = Paginator::default();
        assert_eq!(p.page(), 0);
        assert_eq!(p.page_size(), PageSize::Rows(5));
    }

    #[test]
    fn test_paginate_pages() {
        let items = items();
        let mut p = Paginator::default();
        assert_eq!(p.paginate(&items), &[0, 1, 2, 3, 4]);

        assert!(p.set_page(2, items.len()));
        assert_eq!(p.paginate(&items), &[10, 11]);

        p.next(items.len());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_all_returns_everything() {
        let items = items();
        let mut p = Paginator::default();
        p.set_page_size(PageSize::All);
        assert_eq!(p.paginate(&items).len(), 12);
        assert_eq!(p.page_count(items.len()), 1);
        assert_eq!(p.range_label(items.len()), "1–12 of 12");
    }

    #[test]
    fn test_set_page_size_resets_index() {
        let mut p = Paginator::default();
        p.last(12);
        assert_eq!(p.page(), 2);
        p.set_page_size(PageSize::Rows(10));
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut p = Paginator::default();
        p.previous();
        assert_eq!(p.page(), 0);
        assert!(!p.can_go_previous());

        p.next(12);
        assert_eq!(p.page(), 1);
        assert!(p.can_go_previous());
        p.last(12);
        assert!(!p.can_go_next(12));
        p.first();
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_set_page_rejects_out_of_range() {
        let mut p = Paginator::default();
        assert!(p.set_page(1, 12));
        assert!(!p.set_page(3, 12));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_page_count() {
        let p = Paginator::new(PageSize::Rows(5));
        assert_eq!(p.page_count(0), 1);
        assert_eq!(p.page_count(5), 1);
        assert_eq!(p.page_count(6), 2);
        assert_eq!(p.page_count(12), 3);
    }

    #[test]
    fn test_range_label() {
        let mut p = Paginator::default();
        assert_eq!(p.range_label(12), "1–5 of 12");
        p.last(12);
        assert_eq!(p.range_label(12), "11–12 of 12");
        assert_eq!(Paginator::default().range_label(0), "0–0 of 0");
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items = items();
        let mut p = Paginator::default();
        p.last(items.len());
        assert!(p.paginate(&items[..3]).is_empty());
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("all".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!("-1".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!(" 25 ".parse::<PageSize>().unwrap(), PageSize::Rows(25));
        assert!("7".parse::<PageSize>().is_err());
        assert!("0".parse::<PageSize>().is_err());
        assert!("many".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_page_size_serde() {
        let json = serde_json::to_string(&PageSize::Rows(10)).unwrap();
        assert_eq!(json, "\"10\"");
        let size: PageSize = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(size, PageSize::All);
        assert_eq!(PageSize::option_labels(), vec!["5", "10", "25", "all"]);
    }

    #[test]
    fn test_page_size_accepts_bare_numbers() {
        let size: PageSize = serde_json::from_str("25").unwrap();
        assert_eq!(size, PageSize::Rows(25));
        let size: PageSize = serde_json::from_str("-1").unwrap();
        assert_eq!(size, PageSize::All);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
        assert!(serde_json::from_str::<PageSize>("true").is_err());
    }
}
