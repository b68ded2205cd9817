//! Query state - the inputs that drive the derived table view

use super::record::EventStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of rows per table page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Date sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest date first
    #[default]
    Ascending,
    /// Newest date first
    Descending,
}

impl SortOrder {
    pub fn toggled(&self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Oldest first",
            SortOrder::Descending => "Newest first",
        }
    }
}

/// Search, filter, sort, and pagination inputs
///
/// Every setter that changes which rows are visible moves the cursor
/// back to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search: String,
    pub status_filter: Option<EventStatus>,
    pub date_filter: Option<NaiveDate>,
    pub sort_order: SortOrder,
    pub page_index: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, SortOrder::default())
    }
}

impl QueryState {
    pub fn new(page_size: usize, sort_order: SortOrder) -> Self {
        Self {
            search: String::new(),
            status_filter: None,
            date_filter: None,
            sort_order,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether any search text or filter is active
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.status_filter.is_some() || self.date_filter.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search & Filters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.page_index = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.page_index = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.page_index = 0;
    }

    pub fn set_status_filter(&mut self, status: Option<EventStatus>) {
        self.status_filter = status;
        self.page_index = 0;
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        self.date_filter = date;
        self.page_index = 0;
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.page_index = 0;
    }

    /// Drop search text and both filters; sort order is kept
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status_filter = None;
        self.date_filter = None;
        self.page_index = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Advance one page, stopping at the last page
    pub fn next_page(&mut self, total_pages: usize) {
        self.page_index = (self.page_index + 1).min(total_pages.saturating_sub(1));
    }

    /// Jump to a page; out-of-range indexes are ignored
    pub fn go_to_page(&mut self, index: usize, total_pages: usize) -> bool {
        if index < total_pages {
            self.page_index = index;
            true
        } else {
            false
        }
    }

    /// Pull the cursor back onto the last page after the row count shrinks
    pub fn clamp_page(&mut self, total_pages: usize) {
        if total_pages == 0 {
            self.page_index = 0;
        } else if self.page_index >= total_pages {
            self.page_index = total_pages - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_at_least_one() {
        let query = QueryState::new(0, SortOrder::Ascending);
        assert_eq!(query.page_size(), 1);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut query = QueryState::default();
        query.page_index = 3;
        query.push_search_char('k');
        assert_eq!(query.page_index, 0);

        query.page_index = 2;
        query.set_status_filter(Some(EventStatus::Complete));
        assert_eq!(query.page_index, 0);

        query.page_index = 2;
        query.toggle_sort_order();
        assert_eq!(query.page_index, 0);
        assert_eq!(query.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_next_page_never_passes_last_page() {
        let mut query = QueryState::default();
        query.next_page(2);
        assert_eq!(query.page_index, 1);
        query.next_page(2);
        assert_eq!(query.page_index, 1);

        // No pages at all keeps the cursor at zero
        let mut empty = QueryState::default();
        empty.next_page(0);
        assert_eq!(empty.page_index, 0);
    }

    #[test]
    fn test_prev_page_stops_at_zero() {
        let mut query = QueryState::default();
        query.prev_page();
        assert_eq!(query.page_index, 0);
    }

    #[test]
    fn test_go_to_page_rejects_out_of_range() {
        let mut query = QueryState::default();
        assert!(query.go_to_page(1, 3));
        assert_eq!(query.page_index, 1);
        assert!(!query.go_to_page(3, 3));
        assert_eq!(query.page_index, 1);
    }

    #[test]
    fn test_clear_filters_keeps_sort_order() {
        let mut query = QueryState::new(5, SortOrder::Descending);
        query.push_search_char('a');
        query.set_date_filter(NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(query.has_filters());

        query.clear_filters();
        assert!(!query.has_filters());
        assert_eq!(query.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_clamp_page() {
        let mut query = QueryState::default();
        query.page_index = 4;
        query.clamp_page(2);
        assert_eq!(query.page_index, 1);
        query.clamp_page(0);
        assert_eq!(query.page_index, 0);
    }
}
