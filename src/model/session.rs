//! Session - owner of the record set, the query state, and the detail selection
//!
//! The engine only ever borrows from here. Row interactions (edit, delete,
//! mark complete) go through the session, and every one of them closes the
//! detail view.

use super::query::QueryState;
use super::record::{EventRecord, EventStatus, RecordId};
use super::summary::Summary;
use crate::services::engine::{self, PageView};
use tracing::{debug, info};

/// The kind of change applied to the record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Edit,
    Delete,
    MarkComplete,
}

impl Mutation {
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::Edit => "Updated",
            Mutation::Delete => "Deleted",
            Mutation::MarkComplete => "Marked complete",
        }
    }
}

/// In-memory state for one run of the application
#[derive(Debug, Clone, Default)]
pub struct Session {
    records: Vec<EventRecord>,
    pub query: QueryState,
    detail: Option<RecordId>,
}

impl Session {
    pub fn new(records: Vec<EventRecord>, query: QueryState) -> Self {
        Self {
            records,
            query,
            detail: None,
        }
    }

    #[cfg(test)]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&EventRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived Views
    // ─────────────────────────────────────────────────────────────────────────

    /// The current page under the current query
    pub fn page(&self) -> PageView<'_> {
        engine::derive_page(&self.records, &self.query)
    }

    /// Every record passing the filters, sorted, without pagination
    pub fn filtered(&self) -> Vec<&EventRecord> {
        engine::filter_and_sort(&self.records, &self.query)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Detail View
    // ─────────────────────────────────────────────────────────────────────────

    /// Select a record for the detail view; unknown ids leave it closed
    pub fn open_detail(&mut self, id: RecordId) -> bool {
        if self.get(id).is_some() {
            self.detail = Some(id);
            true
        } else {
            false
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    #[cfg(test)]
    pub fn detail_open(&self) -> bool {
        self.detail.is_some()
    }

    /// The record currently shown in the detail view
    pub fn selected(&self) -> Option<&EventRecord> {
        self.detail.and_then(|id| self.get(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the record sharing `replacement.id`
    ///
    /// The replacement's own id is the lookup key, so an edit can never
    /// move a record onto another identifier. Returns whether a record
    /// was replaced.
    pub fn edit(&mut self, replacement: EventRecord) -> bool {
        let id = replacement.id;
        let mut replacement = Some(replacement);
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .map(|record| {
                if record.id == id {
                    replacement.take().unwrap_or(record)
                } else {
                    record
                }
            })
            .collect();
        let changed = replacement.is_none();
        self.finish(Mutation::Edit, id, changed)
    }

    /// Remove the record with `id`; absent ids are a no-op
    pub fn delete(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .filter(|record| record.id != id)
            .collect();
        let changed = self.records.len() != before;
        self.finish(Mutation::Delete, id, changed)
    }

    /// Set the status of `id` to complete; absent ids are a no-op
    pub fn mark_complete(&mut self, id: RecordId) -> bool {
        let mut changed = false;
        self.records = std::mem::take(&mut self.records)
            .into_iter()
            .map(|record| {
                if record.id == id {
                    changed = true;
                    EventRecord {
                        status: EventStatus::Complete,
                        ..record
                    }
                } else {
                    record
                }
            })
            .collect();
        self.finish(Mutation::MarkComplete, id, changed)
    }

    fn finish(&mut self, mutation: Mutation, id: RecordId, changed: bool) -> bool {
        self.close_detail();
        if changed {
            info!(record = %id, mutation = ?mutation, remaining = self.records.len(), "record set updated");
            let total_pages = engine::total_pages(self.filtered().len(), self.query.page_size());
            self.query.clamp_page(total_pages);
        } else {
            debug!(record = %id, mutation = ?mutation, "no record with this id");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query::SortOrder;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session {
        Session::new(
            vec![
                EventRecord::new(1, "Kickoff", date(2024, 1, 1), "Ada", EventStatus::InProgress),
                EventRecord::new(2, "Review", date(2024, 2, 1), "Grace", EventStatus::Complete),
            ],
            QueryState::new(5, SortOrder::Ascending),
        )
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut session = session();
        assert!(session.delete(RecordId(1)));

        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].id, RecordId(2));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut session = session();
        let before = session.records().to_vec();

        assert!(!session.delete(RecordId(42)));
        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn test_mark_complete_changes_only_status() {
        let mut session = session();
        let before = session.get(RecordId(1)).cloned().unwrap();

        assert!(session.mark_complete(RecordId(1)));

        let after = session.get(RecordId(1)).unwrap();
        assert_eq!(after.status, EventStatus::Complete);
        assert_eq!(after.event_name, before.event_name);
        assert_eq!(after.date, before.date);
        assert_eq!(after.speaker, before.speaker);
        assert_eq!(after.id, before.id);
        // The other record is untouched
        assert_eq!(session.get(RecordId(2)).unwrap().status, EventStatus::Complete);
    }

    #[test]
    fn test_mark_complete_missing_id_is_noop() {
        let mut session = session();
        assert!(!session.mark_complete(RecordId(9)));
        assert_eq!(session.get(RecordId(1)).unwrap().status, EventStatus::InProgress);
    }

    #[test]
    fn test_edit_preserves_identifier_and_cardinality() {
        let mut session = session();
        let replacement = EventRecord::new(
            2,
            "Final Review",
            date(2024, 2, 3),
            "Grace Hopper",
            EventStatus::InProgress,
        );

        assert!(session.edit(replacement.clone()));

        assert_eq!(session.records().len(), 2);
        assert_eq!(session.get(RecordId(2)), Some(&replacement));
        // Position in the underlying set does not move
        assert_eq!(session.records()[1].id, RecordId(2));
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let mut session = session();
        let before = session.records().to_vec();
        let stray = EventRecord::new(3, "Ghost", date(2024, 1, 1), "Nobody", EventStatus::Complete);

        assert!(!session.edit(stray));
        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn test_mutations_close_detail_view() {
        let mut session = session();

        assert!(session.open_detail(RecordId(1)));
        assert_eq!(session.selected().map(|r| r.id), Some(RecordId(1)));
        session.mark_complete(RecordId(1));
        assert!(!session.detail_open());

        session.open_detail(RecordId(2));
        session.delete(RecordId(99));
        assert!(!session.detail_open());

        session.open_detail(RecordId(2));
        let edited = session.get(RecordId(2)).cloned().unwrap();
        session.edit(edited);
        assert!(!session.detail_open());
    }

    #[test]
    fn test_open_detail_unknown_id() {
        let mut session = session();
        assert!(!session.open_detail(RecordId(5)));
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_delete_last_row_on_page_clamps_cursor() {
        let mut session = Session::new(
            vec![
                EventRecord::new(1, "A", date(2024, 1, 1), "x", EventStatus::InProgress),
                EventRecord::new(2, "B", date(2024, 1, 2), "x", EventStatus::InProgress),
                EventRecord::new(3, "C", date(2024, 1, 3), "x", EventStatus::InProgress),
            ],
            QueryState::new(2, SortOrder::Ascending),
        );
        session.query.page_index = 1;
        assert_eq!(session.page().rows.len(), 1);

        session.delete(RecordId(3));

        assert_eq!(session.query.page_index, 0);
        assert_eq!(session.page().rows.len(), 2);
    }

    #[test]
    fn test_page_reflects_mutations() {
        let mut session = session();
        session.query.set_status_filter(Some(EventStatus::Complete));
        assert_eq!(session.page().filtered_count, 1);

        session.mark_complete(RecordId(1));
        assert_eq!(session.page().filtered_count, 2);
        assert_eq!(session.summary().complete, 2);
    }
}
