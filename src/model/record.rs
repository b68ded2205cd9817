//! Event record - the fixed-shape row shown in the table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for display, filtering input, and export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier assigned by the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl EventStatus {
    pub fn all() -> [EventStatus; 2] {
        [EventStatus::Complete, EventStatus::InProgress]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Complete => "Complete",
            EventStatus::InProgress => "In Progress",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventStatus::Complete => "●",
            EventStatus::InProgress => "◐",
        }
    }

    /// Parse a status label, accepting a few common spellings
    pub fn parse(input: &str) -> Option<EventStatus> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "complete" | "completed" => Some(EventStatus::Complete),
            "inprogress" => Some(EventStatus::InProgress),
            _ => None,
        }
    }

    /// The other status (used by the edit form to cycle values)
    pub fn toggled(&self) -> EventStatus {
        match self {
            EventStatus::Complete => EventStatus::InProgress,
            EventStatus::InProgress => EventStatus::Complete,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One event row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: RecordId,
    pub event_name: String,
    pub date: NaiveDate,
    pub speaker: String,
    pub status: EventStatus,
}

impl EventRecord {
    pub fn new(
        id: u64,
        event_name: impl Into<String>,
        date: NaiveDate,
        speaker: impl Into<String>,
        status: EventStatus,
    ) -> Self {
        Self {
            id: RecordId(id),
            event_name: event_name.into(),
            date,
            speaker: speaker.into(),
            status,
        }
    }

    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn is_complete(&self) -> bool {
        self.status == EventStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_accepts_common_spellings() {
        assert_eq!(EventStatus::parse("Complete"), Some(EventStatus::Complete));
        assert_eq!(EventStatus::parse("completed"), Some(EventStatus::Complete));
        assert_eq!(EventStatus::parse("In Progress"), Some(EventStatus::InProgress));
        assert_eq!(EventStatus::parse("in_progress"), Some(EventStatus::InProgress));
        assert_eq!(EventStatus::parse(" IN-PROGRESS "), Some(EventStatus::InProgress));
        assert_eq!(EventStatus::parse("cancelled"), None);
        assert_eq!(EventStatus::parse(""), None);
    }

    #[test]
    fn test_status_serde_uses_display_labels() {
        let json = serde_json::to_string(&EventStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let status: EventStatus = serde_json::from_str("\"Complete\"").unwrap();
        assert_eq!(status, EventStatus::Complete);
    }

    #[test]
    fn test_record_date_label() {
        let record = EventRecord::new(
            7,
            "Kickoff",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Ada",
            EventStatus::InProgress,
        );

        assert_eq!(record.date_label(), "2024-01-05");
        assert_eq!(record.id.to_string(), "7");
        assert!(!record.is_complete());
    }
}
