//! Filter, sort, and paginate engine
//!
//! Pure derivation of the visible page from the full record set and the
//! current query state. Nothing here mutates or owns records.

use crate::model::query::{QueryState, SortOrder};
use crate::model::record::EventRecord;

/// The derived view of one table page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    /// Records on the requested page, in display order
    pub rows: Vec<&'a EventRecord>,
    /// Number of pages covering the filtered set (zero when nothing matches)
    pub total_pages: usize,
    /// Number of records passing the filters
    pub filtered_count: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whether a record passes every active filter
pub fn matches(record: &EventRecord, query: &QueryState) -> bool {
    let status_ok = query
        .status_filter
        .map_or(true, |status| record.status == status);
    let date_ok = query.date_filter.map_or(true, |date| record.date == date);
    let search_ok = query.search.is_empty()
        || record
            .event_name
            .to_lowercase()
            .contains(&query.search.to_lowercase());

    status_ok && date_ok && search_ok
}

/// Sort by date in the requested order, then keep the matching records
///
/// The sort is stable, so records sharing a date keep their encounter order.
pub fn filter_and_sort<'a>(records: &'a [EventRecord], query: &QueryState) -> Vec<&'a EventRecord> {
    let mut sorted: Vec<&EventRecord> = records.iter().collect();
    match query.sort_order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    sorted.retain(|record| matches(record, query));
    sorted
}

/// Number of pages needed for `count` rows
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Derive the page at `query.page_index`
pub fn derive_page<'a>(records: &'a [EventRecord], query: &QueryState) -> PageView<'a> {
    let filtered = filter_and_sort(records, query);
    let filtered_count = filtered.len();
    let page_size = query.page_size();

    let start = query.page_index.saturating_mul(page_size);
    let rows = if start >= filtered_count {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(filtered_count);
        filtered[start..end].to_vec()
    };

    PageView {
        rows,
        total_pages: total_pages(filtered_count, page_size),
        filtered_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{EventStatus, RecordId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_records() -> Vec<EventRecord> {
        vec![
            EventRecord::new(1, "Kickoff", date(2024, 1, 1), "Ada", EventStatus::InProgress),
            EventRecord::new(2, "Review", date(2024, 2, 1), "Grace", EventStatus::Complete),
        ]
    }

    fn mixed_records() -> Vec<EventRecord> {
        vec![
            EventRecord::new(1, "Planning Sync", date(2024, 3, 4), "Ada", EventStatus::InProgress),
            EventRecord::new(2, "Design Review", date(2024, 1, 9), "Grace", EventStatus::Complete),
            EventRecord::new(3, "Launch Party", date(2024, 3, 4), "Linus", EventStatus::Complete),
            EventRecord::new(4, "Retro", date(2023, 12, 20), "Ada", EventStatus::InProgress),
            EventRecord::new(5, "Planning Kickoff", date(2024, 2, 14), "Ken", EventStatus::Complete),
            EventRecord::new(6, "Budget Review", date(2024, 1, 9), "Barbara", EventStatus::InProgress),
            EventRecord::new(7, "All Hands", date(2024, 5, 30), "Grace", EventStatus::InProgress),
        ]
    }

    fn ids(rows: &[&EventRecord]) -> Vec<u64> {
        rows.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn test_two_records_single_page_ascending() {
        let records = two_records();
        let query = QueryState::new(5, SortOrder::Ascending);

        let page = derive_page(&records, &query);

        assert_eq!(ids(&page.rows), vec![1, 2]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filtered_count, 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = two_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.search = "kick".to_string();

        let filtered = filter_and_sort(&records, &query);
        assert_eq!(ids(&filtered), vec![1]);

        query.search = "REV".to_string();
        let filtered = filter_and_sort(&records, &query);
        assert_eq!(ids(&filtered), vec![2]);
    }

    #[test]
    fn test_status_filter() {
        let records = two_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.status_filter = Some(EventStatus::Complete);

        let filtered = filter_and_sort(&records, &query);
        assert_eq!(ids(&filtered), vec![2]);
    }

    #[test]
    fn test_date_filter_is_exact() {
        let records = mixed_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.date_filter = Some(date(2024, 1, 9));

        let filtered = filter_and_sort(&records, &query);
        // Same date: encounter order preserved
        assert_eq!(ids(&filtered), vec![2, 6]);
    }

    #[test]
    fn test_filters_combine_as_conjunction() {
        let records = mixed_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.search = "planning".to_string();
        query.status_filter = Some(EventStatus::Complete);

        let filtered = filter_and_sort(&records, &query);
        assert_eq!(ids(&filtered), vec![5]);
    }

    #[test]
    fn test_filtered_output_is_exactly_the_matching_set() {
        let records = mixed_records();
        let statuses = [None, Some(EventStatus::Complete), Some(EventStatus::InProgress)];
        let dates = [None, Some(date(2024, 3, 4)), Some(date(2030, 1, 1))];
        let searches = ["", "review", "PLAN", "zzz"];

        for status in statuses {
            for day in dates {
                for search in searches {
                    let mut query = QueryState::default();
                    query.status_filter = status;
                    query.date_filter = day;
                    query.search = search.to_string();

                    let filtered = filter_and_sort(&records, &query);
                    let filtered_ids: Vec<RecordId> = filtered.iter().map(|r| r.id).collect();

                    for record in &records {
                        assert_eq!(
                            matches(record, &query),
                            filtered_ids.contains(&record.id),
                            "record {} with query {:?}",
                            record.id,
                            query
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_orders_are_monotonic_and_stable() {
        let records = mixed_records();

        let asc = filter_and_sort(&records, &QueryState::new(5, SortOrder::Ascending));
        assert!(asc.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(ids(&asc), vec![4, 2, 6, 5, 1, 3, 7]);

        let desc = filter_and_sort(&records, &QueryState::new(5, SortOrder::Descending));
        assert!(desc.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(ids(&desc), vec![7, 1, 3, 5, 2, 6, 4]);
    }

    #[test]
    fn test_pages_cover_filtered_set_exactly_once() {
        let records = mixed_records();

        for page_size in 1..=8 {
            let mut query = QueryState::new(page_size, SortOrder::Descending);
            let expected = ids(&filter_and_sort(&records, &query));

            let total = derive_page(&records, &query).total_pages;
            let mut concatenated = Vec::new();
            for index in 0..total {
                query.page_index = index;
                let page = derive_page(&records, &query);
                assert!(!page.is_empty());
                assert!(page.rows.len() <= page_size);
                concatenated.extend(ids(&page.rows));
            }

            assert_eq!(concatenated, expected, "page size {}", page_size);
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let records = two_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.page_index = 4;

        let page = derive_page(&records, &query);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filtered_count, 2);
    }

    #[test]
    fn test_no_matches_means_zero_pages() {
        let records = two_records();
        let mut query = QueryState::new(5, SortOrder::Ascending);
        query.search = "nothing like this".to_string();

        let page = derive_page(&records, &query);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.filtered_count, 0);
    }

    #[test]
    fn test_derive_page_is_deterministic() {
        let records = mixed_records();
        let mut query = QueryState::new(3, SortOrder::Ascending);
        query.search = "e".to_string();
        query.page_index = 1;

        let first = derive_page(&records, &query);
        let second = derive_page(&records, &query);
        assert_eq!(first, second);
    }
}
