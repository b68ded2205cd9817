use crate::model::query::{SortOrder, DEFAULT_PAGE_SIZE};
use crate::services::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default number of table rows per exported text page
pub const DEFAULT_ROWS_PER_DOCUMENT_PAGE: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rows shown per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Initial date sort order
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Data file to load instead of the built-in seed list
    #[serde(default)]
    pub data_path: Option<String>,
    /// Directory exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default)]
    pub export_format: ExportFormat,
    /// Rows per page of the plain-text export
    #[serde(default = "default_rows_per_document_page")]
    pub rows_per_document_page: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_rows_per_document_page() -> usize {
    DEFAULT_ROWS_PER_DOCUMENT_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort_order: SortOrder::default(),
            data_path: None,
            export_dir: default_export_dir(),
            export_format: ExportFormat::default(),
            rows_per_document_page: default_rows_per_document_page(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".event-table"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(config_path)
    }
}
