//! Summary figures shown above the table

use super::record::{EventRecord, EventStatus};

/// Counts across the full record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub complete: usize,
    pub in_progress: usize,
}

impl Summary {
    pub fn from_records(records: &[EventRecord]) -> Self {
        records.iter().fold(Summary::default(), |mut acc, record| {
            acc.total += 1;
            match record.status {
                EventStatus::Complete => acc.complete += 1,
                EventStatus::InProgress => acc.in_progress += 1,
            }
            acc
        })
    }

    /// Share of complete events, 0-100
    pub fn completion_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.complete as f64 * 100.0 / self.total as f64
        }
    }

    /// Title/value pairs in display order
    pub fn boxes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Events", self.total.to_string()),
            ("Complete", self.complete.to_string()),
            ("In Progress", self.in_progress.to_string()),
            ("Completion", format!("{:.0}%", self.completion_percent())),
        ]
    }
}
