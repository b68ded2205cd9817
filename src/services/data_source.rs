//! Data source - loads the initial record set and validates every row
//!
//! Rows arrive loosely typed (JSON, YAML, or CSV) and leave as
//! `EventRecord`s. Anything that cannot be expressed as a record is
//! rejected here, so the rest of the application never sees a malformed
//! date or an unknown status.

use crate::model::record::{EventRecord, EventStatus, RecordId, DATE_FORMAT};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported data file extension: {0} (expected .json, .yaml, .yml or .csv)")]
    UnsupportedFormat(String),
    #[error("record {id}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { id: u64, value: String },
    #[error("record {id}: unknown status '{value}' (expected 'Complete' or 'In Progress')")]
    InvalidStatus { id: u64, value: String },
    #[error("record {id}: event name must not be empty")]
    EmptyName { id: u64 },
    #[error("duplicate record id {0}")]
    DuplicateId(u64),
}

/// A row as it appears in a data file, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: u64,
    #[serde(alias = "eventName")]
    pub event_name: String,
    pub date: String,
    #[serde(default)]
    pub speaker: String,
    pub status: String,
}

impl RawRecord {
    /// Validate into the fixed record shape
    pub fn validate(self) -> Result<EventRecord, DataSourceError> {
        let event_name = self.event_name.trim().to_string();
        if event_name.is_empty() {
            return Err(DataSourceError::EmptyName { id: self.id });
        }

        let date = parse_date(&self.date).ok_or_else(|| DataSourceError::InvalidDate {
            id: self.id,
            value: self.date.clone(),
        })?;

        let status = EventStatus::parse(&self.status).ok_or_else(|| {
            DataSourceError::InvalidStatus {
                id: self.id,
                value: self.status.clone(),
            }
        })?;

        Ok(EventRecord {
            id: RecordId(self.id),
            event_name,
            date,
            speaker: self.speaker.trim().to_string(),
            status,
        })
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Validate a whole batch, enforcing identifier uniqueness
pub fn validate_all(raw: Vec<RawRecord>) -> Result<Vec<EventRecord>, DataSourceError> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|row| {
            if !seen.insert(row.id) {
                return Err(DataSourceError::DuplicateId(row.id));
            }
            row.validate()
        })
        .collect()
}

pub fn from_json_str(contents: &str) -> Result<Vec<EventRecord>, DataSourceError> {
    let raw: Vec<RawRecord> = serde_json::from_str(contents)?;
    validate_all(raw)
}

pub fn from_yaml_str(contents: &str) -> Result<Vec<EventRecord>, DataSourceError> {
    let raw: Vec<RawRecord> = serde_yaml::from_str(contents)?;
    validate_all(raw)
}

/// Read CSV with a header row `id,event_name,date,speaker,status`
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<EventRecord>, DataSourceError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let raw = reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    validate_all(raw)
}

/// Load records from a file, picking the format from its extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>, DataSourceError> {
    let path = path.as_ref();
    let io_error = |source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => from_json_str(&fs::read_to_string(path).map_err(io_error)?),
        "yaml" | "yml" => from_yaml_str(&fs::read_to_string(path).map_err(io_error)?),
        "csv" => from_csv_reader(fs::File::open(path).map_err(io_error)?),
        other => Err(DataSourceError::UnsupportedFormat(other.to_string())),
    }
}

/// Built-in seed list used when no data file is given
pub fn seed_records() -> Vec<EventRecord> {
    let rows: [(u64, &str, (i32, u32, u32), &str, EventStatus); 12] = [
        (1, "Cloud Innovation Summit", (2024, 10, 15), "Jane Doe", EventStatus::Complete),
        (2, "Blockchain Revolution Conference", (2024, 11, 5), "Dr. Peter Smith", EventStatus::InProgress),
        (3, "AI in Healthcare Symposium", (2024, 12, 1), "Dr. Aisha Malik", EventStatus::Complete),
        (4, "Future of Fintech Forum", (2024, 10, 25), "John Lee", EventStatus::Complete),
        (5, "Data Analytics in Business", (2024, 11, 12), "Rachel Moore", EventStatus::Complete),
        (6, "Sustainable Energy Expo", (2024, 9, 28), "Prof. Alan Green", EventStatus::Complete),
        (7, "Web3 Interfaces Workshop", (2024, 10, 10), "Kevin Adams", EventStatus::InProgress),
        (8, "Cybersecurity for Startups", (2024, 11, 19), "Emily Zhang", EventStatus::Complete),
        (9, "Smart Cities Forum", (2024, 10, 18), "Dr. Maria Hernandez", EventStatus::InProgress),
        (10, "Tech Safari Mixer", (2024, 9, 30), "Guest Panel", EventStatus::InProgress),
        (11, "Open Source Maintainers Meetup", (2024, 12, 8), "Chris Park", EventStatus::InProgress),
        (12, "Product Design Sprint", (2024, 11, 5), "Nadia Okafor", EventStatus::Complete),
    ];

    rows.into_iter()
        .filter_map(|(id, name, (y, m, d), speaker, status)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| EventRecord::new(id, name, date, speaker, status))
        })
        .collect()
}
